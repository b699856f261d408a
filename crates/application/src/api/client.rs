//! The single network boundary of the client.
//!
//! Every call goes through [`ApiClient::send`], which wraps the transport
//! with two hooks:
//!
//! - before the request: attach the session token as a bearer credential,
//!   but only while its expiry claim is in the future;
//! - after the response: on 401, tear the session down and send the client
//!   to the login view, unless the failing call was the login itself or the
//!   login view is already showing.
//!
//! Everything else passes through untouched. There is no retry, queueing or
//! deduplication.

use std::sync::Arc;

use guesthouse_domain::LOGIN_PATH;
use guesthouse_domain::route::{is_login_path, normalize_path};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ApiError;
use crate::ports::{ApiRequest, ApiResponse, HttpTransport, Navigator};
use crate::session::SessionStore;

/// Path of the login endpoint; its 401s are credential rejections.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

const UNAUTHORIZED: u16 = 401;

/// API Gateway Client: transport plus credential and 401 policy.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    /// The session this client reads its token from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sends a request through both hooks.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response arrived;
    /// - [`ApiError::SessionExpired`] if the credential was rejected and the
    ///   session has been torn down;
    /// - [`ApiError::Status`] for every other non-success status.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let epoch = self.session.epoch().await;
        let request = self.before_request(request).await;

        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.header_value("authorization").is_some(),
            "API request"
        );

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %error,
                    "API request failed"
                );
                return Err(error.into());
            }
        };

        self.after_response(&request, epoch, response).await
    }

    /// Sends a request and decodes a JSON response body.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send), plus [`ApiError::Decode`].
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends a request and returns the body as text.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn fetch_text(&self, request: ApiRequest) -> Result<String, ApiError> {
        Ok(self.send(request).await?.text())
    }

    /// Sends a request and discards the body.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// `GET path` decoded as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T, ApiError> {
        self.fetch(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body, response decoded as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch), plus [`ApiError::Encode`].
    pub async fn post<B, T>(&self, path: impl Into<String>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(with_json(ApiRequest::post(path), body)?).await
    }

    /// `PUT path` with a JSON body, response decoded as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch), plus [`ApiError::Encode`].
    pub async fn put<B, T>(&self, path: impl Into<String>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(with_json(ApiRequest::put(path), body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn delete(&self, path: impl Into<String>) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(path)).await
    }

    async fn before_request(&self, mut request: ApiRequest) -> ApiRequest {
        request.headers.remove("authorization");
        match self.session.valid_token().await {
            Some(token) => request.header("Authorization", token.authorization_header()),
            None => request,
        }
    }

    async fn after_response(
        &self,
        request: &ApiRequest,
        epoch: u64,
        response: ApiResponse,
    ) -> Result<ApiResponse, ApiError> {
        if response.is_success() {
            debug!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "API response"
            );
            return Ok(response);
        }

        warn!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "API error response"
        );

        if response.status == UNAUTHORIZED
            && !is_login_request(request)
            && !is_login_path(&self.navigator.current_path())
            && self.session.clear_if_epoch(epoch).await
        {
            warn!("Credential rejected; session cleared, redirecting to login");
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::SessionExpired);
        }

        Err(status_error(&response))
    }
}

/// Sets a JSON body, mapping encoding failures into [`ApiError::Encode`].
///
/// # Errors
///
/// Returns [`ApiError::Encode`] if `body` cannot be represented as JSON.
pub fn with_json<B: Serialize + ?Sized>(request: ApiRequest, body: &B) -> Result<ApiRequest, ApiError> {
    request
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

fn is_login_request(request: &ApiRequest) -> bool {
    normalize_path(&request.path) == LOGIN_ENDPOINT
}

/// Builds a status error, pulling a human-readable message out of the body.
///
/// JSON bodies contribute their `message` or `error` field; short plain-text
/// bodies are used as-is.
fn status_error(response: &ApiResponse) -> ApiError {
    let body = response.text();
    let message = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(fields)) => ["message", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str))
            .map(str::to_string),
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => {
            let text = body.trim();
            (!text.is_empty() && text.len() <= 200 && !text.starts_with('<'))
                .then(|| text.to_string())
        }
    };

    ApiError::Status {
        status: response.status,
        message,
        body,
    }
}
