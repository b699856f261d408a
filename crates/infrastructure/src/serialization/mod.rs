//! Deterministic JSON for files written by the client.
//!
//! Keys come out sorted (via `BTreeMap`), indented by two spaces and
//! followed by a trailing newline, so the same state always produces the
//! same bytes.

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
