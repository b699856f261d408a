//! Session state management.

mod store;

pub use store::{SessionStore, TOKEN_KEY, TokenStatus, USER_KEY};
