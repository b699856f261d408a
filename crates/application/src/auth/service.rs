//! Login, registration and logout.
//!
//! Every credential action is verified by the server through the
//! [`ApiClient`] before the [`SessionStore`] changes. A failed login or
//! registration never leaves a half-set session behind, and logout always
//! clears the local session even when the server cannot be reached.

use guesthouse_domain::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterForm, ResetPasswordRequest,
    Session, UserIdentity, resources::User,
};
use tracing::{info, warn};

use crate::api::{ApiClient, LOGIN_ENDPOINT, with_json};
use crate::ports::ApiRequest;
use crate::session::SessionStore;
use crate::{AuthError, SessionError};

/// Auth Service: credential actions in front of the Session Store.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Creates the service. The session is the one the client reads from.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Logs in and commits the returned session.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, a transport failure, or a storage
    /// failure. In every case the session is left unauthenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let result = self.try_login(&LoginRequest::new(email, password)).await;
        if let Err(error) = &result {
            warn!(email, error = %error, "Login failed");
            self.session().clear_session().await;
        }
        result
    }

    async fn try_login(&self, credentials: &LoginRequest) -> Result<Session, AuthError> {
        let response: AuthResponse = self.api.post(LOGIN_ENDPOINT, credentials).await?;
        let (token, identity) = response.into_parts();
        let session = self.session().set_session(token, identity).await?;
        info!(user_id = session.identity.id, "Logged in");
        Ok(session)
    }

    /// Creates an account and logs into it.
    ///
    /// The registration response carries no token, so the new account's
    /// credentials are exchanged for one straight away.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login); the session is left unauthenticated
    /// on any failure.
    pub async fn register(&self, form: &RegisterForm) -> Result<Session, AuthError> {
        let created: Result<User, _> = self.api.post("/users/register", form).await;
        match created {
            Ok(user) => {
                info!(username = %user.username, "Account registered");
                self.login(&form.email, &form.password).await
            }
            Err(error) => {
                warn!(email = %form.email, error = %error, "Registration failed");
                self.session().clear_session().await;
                Err(error.into())
            }
        }
    }

    /// Logs out: notifies the server if possible, then clears the session.
    ///
    /// Never fails; the local session is gone when this returns.
    pub async fn logout(&self) {
        if let Err(error) = self.api.execute(ApiRequest::post("/auth/logout")).await {
            warn!(error = %error, "Logout notification failed, continuing with local cleanup");
        }
        self.session().clear_session().await;
        info!("Logged out");
    }

    /// Saves the logged-in user's profile and refreshes the cached identity.
    ///
    /// The target account is always the session's own; the id in `user` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, or a session error if nobody is
    /// logged in or the role would change. Fails without touching the
    /// session if the server omitted the id or answered for another account.
    pub async fn update_profile(&self, user: &User) -> Result<Session, AuthError> {
        let own_id = match self.session().get_session().await.session() {
            Some(session) => session.identity.id,
            None => return Err(SessionError::NotAuthenticated.into()),
        };
        let updated: User = self.api.put(format!("/users/{own_id}"), user).await?;
        let identity: UserIdentity = updated.identity().ok_or(AuthError::MissingIdentity)?;
        if identity.id != own_id {
            warn!(
                expected = own_id,
                received = identity.id,
                "Profile update answered for another account"
            );
            return Err(AuthError::ForeignIdentity {
                expected: own_id,
                received: identity.id,
            });
        }
        Ok(self.session().update_identity(identity).await?)
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection or a transport failure.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let request = with_json(ApiRequest::post("/auth/forgot-password"), &body)?;
        Ok(self.api.execute(request).await?)
    }

    /// Sets a new password using the emailed reset token.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection or a transport failure.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let body = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let request = with_json(ApiRequest::post("/auth/reset-password"), &body)?;
        Ok(self.api.execute(request).await?)
    }
}
