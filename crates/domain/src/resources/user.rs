use serde::{Deserialize, Serialize};

use super::Audit;
use crate::Role;
use crate::auth::UserIdentity;

/// A user account as managed by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server id; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login name.
    pub username: String,
    /// Only sent when creating or changing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Email address.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Granted role.
    pub role: Role,
    /// Whether the account may log in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Whether the account is unlocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_account_non_locked: Option<bool>,
    /// Number of bookings, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<u32>,
    /// Number of open bookings, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_bookings: Option<u32>,
    /// Audit columns.
    #[serde(flatten)]
    pub audit: Audit,
}

impl User {
    /// The identity fields the session caches, if the account has an id.
    #[must_use]
    pub fn identity(&self) -> Option<UserIdentity> {
        Some(UserIdentity {
            id: self.id?,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
        })
    }
}
