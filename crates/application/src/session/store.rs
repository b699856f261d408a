//! The single source of truth for who is logged in.
//!
//! State lives in memory and is written through to durable storage under
//! two keys that are always set and removed together. Storage is a cache:
//! the token's own expiry claim decides whether it may be used.

use std::sync::Arc;

use guesthouse_domain::{BearerToken, Session, SessionState, UserIdentity};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::SessionError;
use crate::ports::{Clock, KeyValueStorage};

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the serialized identity.
pub const USER_KEY: &str = "user";

#[derive(Debug)]
struct Inner {
    state: SessionState,
    /// Bumped whenever the token changes: login and teardown.
    epoch: u64,
}

/// Shared handle to the client session.
///
/// Cloning is cheap; all clones see the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    changes: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// Creates a store in the [`SessionState::Resolving`] state.
    ///
    /// Call [`restore`](Self::restore) to rehydrate from durable storage.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        let (changes, _) = watch::channel(SessionState::Resolving);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: SessionState::Resolving,
                epoch: 0,
            })),
            storage,
            clock,
            changes: Arc::new(changes),
        }
    }

    /// Rehydrates the session from durable storage.
    ///
    /// Only a matching token/identity pair with an unexpired token yields a
    /// session; anything else is torn down. Does nothing if the session was
    /// already resolved by a login or logout in the meantime.
    pub async fn restore(&self) -> SessionState {
        let mut inner = self.inner.write().await;
        if !inner.state.is_resolving() {
            return inner.state.clone();
        }

        let state = match self.read_stored().await {
            Some(session) if session.token.is_expired_at(self.clock.now()) => {
                info!(user_id = session.identity.id, "Stored token has expired");
                self.wipe_storage().await;
                SessionState::Unauthenticated
            }
            Some(session) => {
                debug!(user_id = session.identity.id, "Session restored");
                SessionState::Authenticated(session)
            }
            None => {
                self.wipe_storage().await;
                SessionState::Unauthenticated
            }
        };

        inner.state = state.clone();
        self.changes.send_replace(state.clone());
        state
    }

    /// Stores a verified token and identity as the current session.
    ///
    /// Both durable keys are written before the in-memory state changes. If
    /// either write fails, neither key is left behind and the state is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written to storage.
    pub async fn set_session(
        &self,
        token: BearerToken,
        identity: UserIdentity,
    ) -> Result<Session, SessionError> {
        let session = Session::new(token, identity);
        let mut inner = self.inner.write().await;

        if let Err(error) = self.persist(&session).await {
            self.wipe_storage().await;
            return Err(error);
        }

        info!(
            user_id = session.identity.id,
            role = %session.role(),
            "Session established"
        );
        inner.state = SessionState::Authenticated(session.clone());
        inner.epoch += 1;
        self.changes.send_replace(inner.state.clone());
        Ok(session)
    }

    /// Removes the session from memory and storage.
    ///
    /// Safe to call when nobody is logged in. Storage failures are logged;
    /// the in-memory session is always cleared.
    pub async fn clear_session(&self) {
        let mut inner = self.inner.write().await;
        self.teardown(&mut inner).await;
    }

    /// Clears the session only if it has not changed since `epoch`.
    ///
    /// Returns true if the session was cleared.
    pub async fn clear_if_epoch(&self, epoch: u64) -> bool {
        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            debug!(
                expected = epoch,
                current = inner.epoch,
                "Session changed since request was issued; keeping it"
            );
            return false;
        }
        self.teardown(&mut inner).await;
        true
    }

    /// Current session state.
    pub async fn get_session(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    /// Replaces the cached identity without a new token.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is logged in, if the role would change, or
    /// if the identity cannot be written to storage.
    pub async fn update_identity(&self, identity: UserIdentity) -> Result<Session, SessionError> {
        let mut inner = self.inner.write().await;
        let SessionState::Authenticated(current) = &inner.state else {
            return Err(SessionError::NotAuthenticated);
        };
        if current.role() != identity.role {
            return Err(SessionError::RoleChange {
                current: current.role(),
                requested: identity.role,
            });
        }

        let session = Session::new(current.token.clone(), identity);
        let user = serde_json::to_string(&session.identity)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.storage.set(USER_KEY, &user).await?;

        debug!(user_id = session.identity.id, "Identity updated");
        inner.state = SessionState::Authenticated(session.clone());
        self.changes.send_replace(inner.state.clone());
        Ok(session)
    }

    /// The session token if it is still within its expiry claim.
    pub async fn valid_token(&self) -> Option<BearerToken> {
        let inner = self.inner.read().await;
        let token = &inner.state.session()?.token;
        if token.is_expired_at(self.clock.now()) {
            debug!("Session token has expired; not using it");
            return None;
        }
        Some(token.clone())
    }

    /// Counter bumped whenever the session token changes.
    pub async fn epoch(&self) -> u64 {
        self.inner.read().await.epoch
    }

    /// Watches session changes (login, logout, identity updates, restore).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.changes.subscribe()
    }

    /// Token status for display.
    pub async fn token_status(&self) -> TokenStatus {
        let inner = self.inner.read().await;
        let Some(session) = inner.state.session() else {
            return TokenStatus::NotAuthenticated;
        };
        let now = self.clock.now();
        if session.token.is_expired_at(now) {
            TokenStatus::Expired
        } else {
            TokenStatus::Valid {
                seconds_remaining: session.token.seconds_until_expiry(now),
            }
        }
    }

    async fn read_stored(&self) -> Option<Session> {
        let token = self.read_key(TOKEN_KEY).await?;
        let user = self.read_key(USER_KEY).await?;
        match serde_json::from_str::<UserIdentity>(&user) {
            Ok(identity) => Some(Session::new(BearerToken::new(token), identity)),
            Err(e) => {
                warn!(error = %e, "Stored identity is unreadable");
                None
            }
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read session storage");
                None
            }
        }
    }

    async fn persist(&self, session: &Session) -> Result<(), SessionError> {
        let user = serde_json::to_string(&session.identity)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.storage.set(TOKEN_KEY, session.token.as_str()).await?;
        self.storage.set(USER_KEY, &user).await?;
        Ok(())
    }

    async fn teardown(&self, inner: &mut Inner) {
        self.wipe_storage().await;
        if inner.state.is_authenticated() {
            info!("Session cleared");
        }
        inner.state = SessionState::Unauthenticated;
        inner.epoch += 1;
        self.changes.send_replace(SessionState::Unauthenticated);
    }

    async fn wipe_storage(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                warn!(key, error = %e, "Failed to remove session key");
            }
        }
    }
}

/// Status of the session token for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// Nobody is logged in.
    NotAuthenticated,
    /// The token is within its expiry claim.
    Valid {
        /// Seconds until expiry, or None if the token has no expiry.
        seconds_remaining: Option<i64>,
    },
    /// The token has expired; the next authenticated call will fail.
    Expired,
}

impl TokenStatus {
    /// Returns true if the token can still be used.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not authenticated".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Valid for {} hours", secs / 3600)
                } else if *secs > 60 {
                    format!("Valid for {} minutes", secs / 60)
                } else {
                    format!("Valid for {secs} seconds")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Valid (no expiry)".to_string(),
            Self::Expired => "Expired".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::{FixedClock, MemoryStorage, identity, token_expiring_in};
    use chrono::Duration;
    use guesthouse_domain::Role;
    use pretty_assertions::assert_eq;

    fn store() -> (SessionStore, Arc<MemoryStorage>, Arc<FixedClock>) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(FixedClock::new());
        let store = SessionStore::new(storage.clone(), clock.clone());
        (store, storage, clock)
    }

    #[tokio::test]
    async fn test_starts_resolving() {
        let (store, _, _) = store();
        assert_eq!(store.get_session().await, SessionState::Resolving);
    }

    #[tokio::test]
    async fn test_set_session_writes_both_keys() {
        let (store, storage, clock) = store();
        let token = token_expiring_in(clock.now(), Duration::hours(1));

        let session = store
            .set_session(token.clone(), identity(Role::Admin))
            .await
            .unwrap();

        assert!(session.is_admin());
        assert!(store.get_session().await.is_admin());
        assert_eq!(storage.value(TOKEN_KEY).as_deref(), Some(token.as_str()));

        let stored: UserIdentity = serde_json::from_str(&storage.value(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.role, Role::Admin);
        assert_eq!(stored, identity(Role::Admin));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_keys() {
        let (store, storage, clock) = store();
        store.restore().await;
        storage.fail_writes(true);

        let result = store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await;

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(storage.keys().is_empty());
        assert_eq!(store.get_session().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let (store, storage, clock) = store();
        store.clear_session().await;
        assert_eq!(store.get_session().await, SessionState::Unauthenticated);

        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await
            .unwrap();
        store.clear_session().await;
        store.clear_session().await;

        assert!(storage.keys().is_empty());
        assert_eq!(store.get_session().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_restore_pair() {
        let (store, storage, clock) = store();
        let token = token_expiring_in(clock.now(), Duration::hours(1));
        storage.insert(TOKEN_KEY, token.as_str());
        storage.insert(
            USER_KEY,
            &serde_json::to_string(&identity(Role::User)).unwrap(),
        );

        let state = store.restore().await;
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().identity.username, "ana");
    }

    #[tokio::test]
    async fn test_restore_single_key_is_absent() {
        let (store, storage, clock) = store();
        let token = token_expiring_in(clock.now(), Duration::hours(1));
        storage.insert(TOKEN_KEY, token.as_str());

        assert_eq!(store.restore().await, SessionState::Unauthenticated);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_restore_identity_without_token_is_absent() {
        let (store, storage, _) = store();
        storage.insert(
            USER_KEY,
            &serde_json::to_string(&identity(Role::Admin)).unwrap(),
        );

        assert_eq!(store.restore().await, SessionState::Unauthenticated);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_restore_expired_token_tears_down() {
        let (store, storage, clock) = store();
        let token = token_expiring_in(clock.now(), Duration::minutes(-10));
        storage.insert(TOKEN_KEY, token.as_str());
        storage.insert(
            USER_KEY,
            &serde_json::to_string(&identity(Role::User)).unwrap(),
        );

        assert_eq!(store.restore().await, SessionState::Unauthenticated);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_restore_does_not_override_login() {
        let (store, _, clock) = store();
        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await
            .unwrap();

        assert!(store.restore().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_update_identity_keeps_token() {
        let (store, storage, clock) = store();
        let token = token_expiring_in(clock.now(), Duration::hours(1));
        store
            .set_session(token.clone(), identity(Role::User))
            .await
            .unwrap();

        let mut renamed = identity(Role::User);
        renamed.first_name = "Anna".to_string();
        let session = store.update_identity(renamed).await.unwrap();

        assert_eq!(session.token, token);
        assert_eq!(session.identity.first_name, "Anna");
        let stored: UserIdentity = serde_json::from_str(&storage.value(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.first_name, "Anna");
    }

    #[tokio::test]
    async fn test_update_identity_rejects_role_change() {
        let (store, _, clock) = store();
        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await
            .unwrap();

        let result = store.update_identity(identity(Role::Admin)).await;
        assert!(matches!(
            result,
            Err(SessionError::RoleChange {
                current: Role::User,
                requested: Role::Admin
            })
        ));
        assert!(!store.get_session().await.is_admin());
    }

    #[tokio::test]
    async fn test_update_identity_requires_session() {
        let (store, _, _) = store();
        let result = store.update_identity(identity(Role::User)).await;
        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_valid_token_checks_expiry_at_use_time() {
        let (store, _, clock) = store();
        store
            .set_session(
                token_expiring_in(clock.now(), Duration::minutes(5)),
                identity(Role::User),
            )
            .await
            .unwrap();

        assert!(store.valid_token().await.is_some());
        assert!(store.token_status().await.is_valid());

        clock.advance(Duration::minutes(6));
        assert!(store.valid_token().await.is_none());
        assert_eq!(store.token_status().await, TokenStatus::Expired);
        // Expiry is not teardown: the server decides.
        assert!(store.get_session().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_clear_if_epoch_ignores_stale_epoch() {
        let (store, _, clock) = store();
        let stale = store.epoch().await;
        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await
            .unwrap();

        assert!(!store.clear_if_epoch(stale).await);
        assert!(store.get_session().await.is_authenticated());

        let current = store.epoch().await;
        assert!(store.clear_if_epoch(current).await);
        assert_eq!(store.get_session().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_identity_update_keeps_epoch() {
        let (store, _, clock) = store();
        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::User),
            )
            .await
            .unwrap();
        let issued = store.epoch().await;

        let mut renamed = identity(Role::User);
        renamed.first_name = "Anna".to_string();
        store.update_identity(renamed).await.unwrap();

        assert_eq!(store.epoch().await, issued);
        assert!(store.clear_if_epoch(issued).await);
        assert_eq!(store.get_session().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (store, _, clock) = store();
        let mut changes = store.subscribe();

        store
            .set_session(
                token_expiring_in(clock.now(), Duration::hours(1)),
                identity(Role::Admin),
            )
            .await
            .unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_admin());

        store.clear_session().await;
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_token_status_display_messages() {
        assert_eq!(
            TokenStatus::NotAuthenticated.display_message(),
            "Not authenticated"
        );
        assert!(
            TokenStatus::Valid {
                seconds_remaining: Some(7200)
            }
            .display_message()
            .contains("hours")
        );
        assert_eq!(TokenStatus::Expired.display_message(), "Expired");
    }
}
