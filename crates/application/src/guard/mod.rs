//! Access Guard.

mod access;

pub use access::{AccessGuard, GuardDecision, decide};
