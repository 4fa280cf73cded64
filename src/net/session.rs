//! Session controller: sign-in, logout, and startup hydration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the wiring between the store, the gateway, the persistence adapter
//! and the evictor, and is provided to the component tree as context. Each
//! handler brackets its I/O with `set_loading(true)` / `set_loading(false)`
//! so guards can tell "not yet known" from "signed out".

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::RwSignal;

use super::api;
use super::error::SessionError;
use super::gateway::HttpGateway;
use super::transport::{FetchTransport, Transport};
use super::types::{SignInRequest, User};
use crate::config::{ClientConfig, Routes};
use crate::state::auth::{AuthState, SessionStore};
use crate::util::eviction::{EvictionReason, SessionEvictor};
use crate::util::navigation::{BrowserNavigator, Navigator};
use crate::util::session_storage::{BrowserSessionStorage, SessionPersistence};

#[derive(Clone)]
pub struct SessionController {
    config: Arc<ClientConfig>,
    store: Arc<dyn SessionStore>,
    persistence: Arc<dyn SessionPersistence>,
    evictor: Arc<SessionEvictor>,
    gateway: Arc<HttpGateway>,
}

impl SessionController {
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport + Send + Sync>,
        persistence: Arc<dyn SessionPersistence>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let evictor = Arc::new(SessionEvictor::new(
            store.clone(),
            persistence.clone(),
            navigator,
            config.routes.clone(),
        ));
        let gateway = Arc::new(HttpGateway::new(transport, store.clone(), evictor.clone(), &config));
        Self { config: Arc::new(config), store, persistence, evictor, gateway }
    }

    /// Controller for the running browser app, backed by the reactive store.
    pub fn browser(config: ClientConfig, auth: RwSignal<AuthState>) -> Self {
        let transport = FetchTransport::new(config.api_base_url.clone());
        let persistence = BrowserSessionStorage::new(config.storage.clone());
        Self::new(config, Arc::new(auth), Arc::new(transport), Arc::new(persistence), Arc::new(BrowserNavigator))
    }

    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }

    pub fn evictor(&self) -> &Arc<SessionEvictor> {
        &self.evictor
    }

    pub fn routes(&self) -> &Routes {
        &self.config.routes
    }

    /// Restore a persisted session at startup.
    pub fn hydrate(&self) -> Option<User> {
        self.store.set_loading(true);
        let restored = self.persistence.load();
        if let Some(user) = restored.clone() {
            log::debug!("restored persisted session for {}", user.id);
            self.store.set_user(user);
        }
        self.store.set_loading(false);
        restored
    }

    /// Sign in and make the returned user the current session.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the server answers `success: false`,
    /// `MissingUser` when it succeeds without a user record, or the gateway
    /// error for HTTP/transport failures.
    pub async fn sign_in(&self, credentials: &SignInRequest) -> Result<User, SessionError> {
        self.store.set_loading(true);
        let result = self.sign_in_inner(credentials).await;
        self.store.set_loading(false);
        if let Err(err) = &result {
            log::info!("sign in failed: {err}");
        }
        result
    }

    async fn sign_in_inner(&self, credentials: &SignInRequest) -> Result<User, SessionError> {
        let response = api::sign_in(&self.gateway, &self.config.endpoints, credentials).await?;
        if !response.success {
            let message = response.message.unwrap_or_else(|| "Sign in failed".to_owned());
            return Err(SessionError::Rejected(message));
        }
        let user = response.user.ok_or(SessionError::MissingUser)?;
        self.store.set_user(user.clone());
        self.persistence.save(&user);
        log::info!("signed in as {} ({})", user.id, user.role);
        Ok(user)
    }

    /// Tell the server, then end the local session regardless of its answer.
    pub async fn logout(&self) {
        self.store.set_loading(true);
        if let Err(err) = api::logout(&self.gateway, &self.config.endpoints).await {
            log::debug!("logout request failed: {err}");
        }
        self.evictor.evict(EvictionReason::Logout);
        self.store.set_loading(false);
    }
}
