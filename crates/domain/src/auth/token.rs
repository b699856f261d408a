//! Bearer tokens and their locally decodable claims.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult};

/// Claims carried in the payload segment of a signed token.
///
/// Only the fields the client acts on are decoded; the signature is never
/// verified locally, the server stays the authority.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TokenClaims {
    /// Subject, usually the user's email.
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at as seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Expiry instant, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Opaque bearer credential issued by the server at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the payload segment without verifying the signature.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedToken`] if the token does not have
    /// three segments or the payload is not base64url-encoded JSON.
    pub fn claims(&self) -> DomainResult<TokenClaims> {
        let mut segments = self.0.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(DomainError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| DomainError::MalformedToken(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::MalformedToken(format!("payload is not JSON: {e}")))
    }

    /// Returns true if the token cannot be used at `now`.
    ///
    /// A token that fails to decode counts as expired. A token without an
    /// `exp` claim never expires on the client side.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.claims() {
            Ok(claims) => claims.exp.is_some_and(|exp| exp <= now.timestamp()),
            Err(_) => true,
        }
    }

    /// Seconds until expiry at `now`, or None if the token has no expiry
    /// or cannot be decoded.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.claims()
            .ok()
            .and_then(|claims| claims.exp)
            .map(|exp| exp - now.timestamp())
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.0.chars().take(8).collect();
        write!(f, "BearerToken({preview}...)")
    }
}
