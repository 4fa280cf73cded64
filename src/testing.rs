//! Test doubles for the transport, persistence, navigation and store seams.
//!
//! Every fake appends to a shared `EventLog` so tests can assert the order
//! of side effects (clear → purge → redirect).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::net::error::TransportError;
use crate::net::session::SessionController;
use crate::net::transport::{ApiRequest, ApiResponse, Transport};
use crate::net::types::User;
use crate::state::auth::{AuthState, MemorySessionStore, SessionStore};
use crate::util::navigation::Navigator;
use crate::util::session_storage::SessionPersistence;

pub fn make_user(role: &str) -> User {
    User {
        id: "u-1".to_owned(),
        name: "Asha".to_owned(),
        email: Some("asha@cricb.test".to_owned()),
        phone: None,
        role: role.to_owned(),
        is_superadmin: false,
        is_active: true,
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> ApiResponse {
    ApiResponse { status, body: body.to_string() }
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn count(&self, event: &str) -> usize {
        self.events.lock().unwrap().iter().filter(|e| *e == event).count()
    }
}

// =============================================================
// Transport
// =============================================================

type Hook = Box<dyn Fn() + Send + Sync>;

/// Answers each path from a FIFO of scripted results.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<ApiResponse, TransportError>>>>,
    hooks: Mutex<HashMap<String, Hook>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, path: &str, status: u16, body: serde_json::Value) {
        self.push(path, Ok(json_response(status, body)));
    }

    pub fn fail(&self, path: &str, err: TransportError) {
        self.push(path, Err(err));
    }

    /// Run `hook` whenever a request to `path` is sent, before answering.
    pub fn on_send(&self, path: &str, hook: impl Fn() + Send + Sync + 'static) {
        self.hooks.lock().unwrap().insert(path.to_owned(), Box::new(hook));
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, path: &str) -> usize {
        self.sent.lock().unwrap().iter().filter(|r| r.path == path).count()
    }

    fn push(&self, path: &str, result: Result<ApiResponse, TransportError>) {
        self.responses.lock().unwrap().entry(path.to_owned()).or_default().push_back(result);
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        if let Some(hook) = self.hooks.lock().unwrap().get(&request.path) {
            hook();
        }
        self.responses
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Network(format!("no scripted response for {}", request.path))))
    }
}

// =============================================================
// Store / persistence / navigation
// =============================================================

pub struct RecordingStore {
    inner: MemorySessionStore,
    events: Arc<EventLog>,
}

impl SessionStore for RecordingStore {
    fn snapshot(&self) -> AuthState {
        self.inner.snapshot()
    }

    fn set_user(&self, user: User) {
        self.events.push("set_user");
        self.inner.set_user(user);
    }

    fn set_loading(&self, loading: bool) {
        self.events.push(format!("loading:{loading}"));
        self.inner.set_loading(loading);
    }

    fn clear_user(&self) {
        self.events.push("clear");
        self.inner.clear_user();
    }
}

#[derive(Default)]
pub struct RecordingPersistence {
    stored: Mutex<Option<User>>,
    events: Arc<EventLog>,
}

impl RecordingPersistence {
    pub fn stored(&self) -> Option<User> {
        self.stored.lock().unwrap().clone()
    }

    pub fn preload(&self, user: User) {
        *self.stored.lock().unwrap() = Some(user);
    }
}

impl SessionPersistence for RecordingPersistence {
    fn load(&self) -> Option<User> {
        self.stored()
    }

    fn save(&self, user: &User) {
        self.events.push("save");
        *self.stored.lock().unwrap() = Some(user.clone());
    }

    fn purge(&self) {
        self.events.push("purge");
        *self.stored.lock().unwrap() = None;
    }
}

pub struct RecordingNavigator {
    path: Mutex<String>,
    events: Arc<EventLog>,
}

impl RecordingNavigator {
    pub fn path(&self) -> String {
        self.path.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path()
    }

    fn redirect(&self, path: &str) {
        self.events.push(format!("redirect:{path}"));
        *self.path.lock().unwrap() = path.to_owned();
    }
}

// =============================================================
// Harness
// =============================================================

pub struct Harness {
    pub events: Arc<EventLog>,
    pub store: Arc<RecordingStore>,
    pub transport: Arc<ScriptedTransport>,
    pub persistence: Arc<RecordingPersistence>,
    pub navigator: Arc<RecordingNavigator>,
    pub controller: SessionController,
}

impl Harness {
    /// Signed-out client currently showing `path`.
    pub fn at(path: &str) -> Self {
        let events = Arc::new(EventLog::default());
        let store = Arc::new(RecordingStore { inner: MemorySessionStore::default(), events: events.clone() });
        let transport = Arc::new(ScriptedTransport::default());
        let persistence = Arc::new(RecordingPersistence { stored: Mutex::new(None), events: events.clone() });
        let navigator = Arc::new(RecordingNavigator { path: Mutex::new(path.to_owned()), events: events.clone() });
        let controller = SessionController::new(
            ClientConfig::default(),
            store.clone(),
            transport.clone(),
            persistence.clone(),
            navigator.clone(),
        );
        Self { events, store, transport, persistence, navigator, controller }
    }

    /// Client signed in as `user`, showing `path`, with an empty event log.
    pub fn signed_in_at(path: &str, user: User) -> Self {
        let harness = Self::at(path);
        harness.store.set_user(user);
        harness.events.take();
        harness
    }

    pub fn snapshot(&self) -> AuthState {
        self.store.snapshot()
    }
}
