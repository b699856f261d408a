//! Authentication module.
//!
//! The [`AuthService`] turns user-facing credential actions into Session
//! Store mutations, always verified by the server first.

mod service;

pub use service::AuthService;
