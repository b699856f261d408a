//! Session and identity types.

use serde::{Deserialize, Serialize};

use super::BearerToken;
use crate::Role;

/// Profile of the authenticated user as cached on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Server-side user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Role granted by the server.
    pub role: Role,
}

impl UserIdentity {
    /// Display name: "First Last", falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Returns true if the identity carries the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// The authenticated actor: token plus identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Credential attached to outgoing requests.
    pub token: BearerToken,
    /// Cached profile.
    pub identity: UserIdentity,
}

impl Session {
    /// Creates a session from a token and identity.
    #[must_use]
    pub const fn new(token: BearerToken, identity: UserIdentity) -> Self {
        Self { token, identity }
    }

    /// Role of the session's user.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.identity.role
    }

    /// Derived from the role on every read, never stored separately.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }
}

/// Observable state of the client session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Durable storage has not been read yet; identity is unknown.
    #[default]
    Resolving,
    /// Nobody is logged in.
    Unauthenticated,
    /// A user is logged in.
    Authenticated(Session),
}

impl SessionState {
    /// Returns the session if authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns true while the identity is still being rehydrated.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// Returns true if the logged-in user is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        match self {
            Self::Authenticated(session) => session.is_admin(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity(role: Role) -> UserIdentity {
        UserIdentity {
            id: 7,
            username: "ana".to_string(),
            email: "a@b.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            role,
        }
    }

    #[test]
    fn test_identity_wire_format() {
        let json = serde_json::to_value(identity(Role::Admin)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "username": "ana",
                "email": "a@b.com",
                "firstName": "Ana",
                "lastName": "Lopez",
                "role": "ADMIN"
            })
        );
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = identity(Role::User);
        assert_eq!(user.display_name(), "Ana Lopez");
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "ana");
    }

    #[test]
    fn test_state_accessors() {
        let session = Session::new(BearerToken::new("t"), identity(Role::Admin));
        let state = SessionState::Authenticated(session);
        assert!(state.is_authenticated());
        assert!(state.is_admin());
        assert_eq!(state.session().map(|s| s.identity.id), Some(7));

        assert!(SessionState::default().is_resolving());
        assert!(!SessionState::Unauthenticated.is_admin());
    }
}
