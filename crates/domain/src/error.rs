//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A route permission was declared with no allowed roles.
    #[error("route permission must allow at least one role")]
    EmptyRoleSet,

    /// A route pattern could not be parsed.
    #[error("invalid route pattern: {0}")]
    InvalidRoutePattern(String),

    /// The role name is not one the platform knows.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The bearer token is not a well-formed signed token.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The stored identity record could not be decoded.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
