//! API Gateway Client.

mod client;

pub use client::{ApiClient, LOGIN_ENDPOINT, with_json};
