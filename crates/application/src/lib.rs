//! Guest House Application - Client core services
//!
//! This crate holds the stateful core of the booking client:
//!
//! - [`session::SessionStore`]: the single source of truth for who is
//!   logged in, persisted through the [`ports::KeyValueStorage`] port
//! - [`api::ApiClient`]: the one network boundary, attaching credentials
//!   and recovering from rejected ones
//! - [`auth::AuthService`]: login, registration and logout
//! - [`guard::AccessGuard`]: per-route role checks with login redirects
//!
//! Adapters for the ports live in the infrastructure crate.

pub mod api;
pub mod auth;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod guard;
pub mod ports;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use auth::AuthService;
pub use context::ClientContext;
pub use error::{ApiError, AuthError, SessionError};
pub use guard::{AccessGuard, GuardDecision};
pub use session::{SessionStore, TokenStatus};
