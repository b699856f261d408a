//! Application error types

use guesthouse_domain::Role;
use thiserror::Error;

use crate::ports::{StorageError, TransportError};

/// Errors returned by API Gateway Client calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, if any.
        message: Option<String>,
        /// Raw error body.
        body: String,
    },

    /// The credential was rejected; the session has been torn down and the
    /// client sent to the login view. The response must not be processed.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Returns true if the server rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Text suitable for an inline error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors returned by Session Store mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Durable storage failed.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The identity could not be serialized for storage.
    #[error("session serialization failed: {0}")]
    Serialization(String),

    /// The operation needs a logged-in user.
    #[error("no user is logged in")]
    NotAuthenticated,

    /// Role changes need a fresh login.
    #[error("role change from {current} to {requested} requires logging in again")]
    RoleChange {
        /// Role bound to the current token.
        current: Role,
        /// Role of the new identity.
        requested: Role,
    },
}

/// Errors returned by the Auth Service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be committed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The server answered without the identity the session needs.
    #[error("server response is missing the user id")]
    MissingIdentity,

    /// The server answered with a different account than the session's.
    #[error("server returned user {received}, expected {expected}")]
    ForeignIdentity {
        /// Id of the logged-in user.
        expected: i64,
        /// Id in the response.
        received: i64,
    },
}

impl AuthError {
    /// Text suitable for an inline error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}
