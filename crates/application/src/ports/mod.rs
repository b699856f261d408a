//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the client core and the outside
//! world. Each port is a trait implemented by adapters in the
//! infrastructure layer.

mod clock;
mod http_transport;
mod navigator;
mod storage;

pub use clock::Clock;
pub use http_transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, TransportError,
};
pub use navigator::Navigator;
pub use storage::{KeyValueStorage, StorageError};
