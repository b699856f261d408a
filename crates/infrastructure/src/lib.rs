//! Guest House Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading
//! and logging setup for the binary.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod serialization;

pub use adapters::{HistoryNavigator, ReqwestTransport, SystemClock};
pub use config::{ClientConfig, ConfigError};
pub use logging::init_tracing;
pub use persistence::{FileKeyValueStorage, InMemoryStorage};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
