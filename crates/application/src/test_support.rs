//! In-memory port implementations shared by the unit tests.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::significant_drop_tightening)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use guesthouse_domain::{BearerToken, Role, UserIdentity};

use crate::ports::{
    ApiRequest, ApiResponse, Clock, HttpTransport, KeyValueStorage, Navigator, StorageError,
    TransportError,
};

pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("Lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("Lock poisoned").get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("Lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("Lock poisoned") = fail;
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().expect("Lock poisoned") {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().expect("Lock poisoned").remove(key);
        Ok(())
    }
}

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("Lock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("Lock poisoned")
    }
}

/// Replays queued responses in order and records every request it sees.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .expect("Lock poisoned")
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, error: TransportError) {
        self.responses
            .lock()
            .expect("Lock poisoned")
            .push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("Lock poisoned").clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests()
            .pop()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("Lock poisoned")
            .push(request.clone());
        self.responses
            .lock()
            .expect("Lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            history: Mutex::new(vec![path.to_string()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().expect("Lock poisoned").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.history
            .lock()
            .expect("Lock poisoned")
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        self.history
            .lock()
            .expect("Lock poisoned")
            .push(path.to_string());
    }
}

/// An unsigned token whose `exp` claim is `now + lifetime`.
pub fn token_expiring_in(now: DateTime<Utc>, lifetime: Duration) -> BearerToken {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub":"a@b.com","exp":{}}}"#,
        (now + lifetime).timestamp()
    ));
    BearerToken::new(format!("{header}.{payload}.sig"))
}

pub fn identity(role: Role) -> UserIdentity {
    UserIdentity {
        id: 7,
        username: "ana".to_string(),
        email: "a@b.com".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        role,
    }
}

pub fn login_body(token: &BearerToken, role: Role) -> serde_json::Value {
    serde_json::json!({
        "token": token.as_str(),
        "id": 7,
        "username": "ana",
        "email": "a@b.com",
        "firstName": "Ana",
        "lastName": "Lopez",
        "role": role.as_str()
    })
}

/// A client with no session, on the home view, over `transport`.
pub fn anonymous_client(transport: std::sync::Arc<ScriptedTransport>) -> crate::api::ApiClient {
    let session = crate::session::SessionStore::new(
        std::sync::Arc::new(MemoryStorage::new()),
        std::sync::Arc::new(FixedClock::new()),
    );
    crate::api::ApiClient::new(
        transport,
        session,
        std::sync::Arc::new(RecordingNavigator::at("/")),
    )
}
