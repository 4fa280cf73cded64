//! HTTP gateway: every API call in the client goes through `HttpGateway::send`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a `Transport` and inspects each response before the caller sees it:
//!
//! - 403 carrying the inactive-account marker ends the session (evictor) and
//!   rejects with the original failure. Never retried.
//! - 401 on a request that has not been retried and does not target the
//!   refresh/sign-in/sign-up endpoints triggers exactly one refresh. On
//!   success the original request is re-issued once with `retried` set; its
//!   response is returned as-is (a second 401 is not refreshed again). On
//!   refresh failure the session is evicted and the refresh failure is
//!   returned, since it is the terminal cause.
//! - Everything else passes through unchanged.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent 401s each run their own refresh; attempts are not coalesced.
//! A logout that lands while a refresh is in flight wins: the retry is
//! skipped when the session generation moved and nobody is signed in.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiFailure, GatewayError, TransportError};
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::config::{ClientConfig, Endpoints, InactiveMarkers};
use crate::state::auth::SessionStore;
use crate::util::eviction::{EvictionReason, SessionEvictor};

/// What to do with a response after inspection.
enum Inspection {
    Done(Result<ApiResponse, GatewayError>),
    Refresh(ApiFailure),
}

pub struct HttpGateway {
    transport: Arc<dyn Transport + Send + Sync>,
    store: Arc<dyn SessionStore>,
    evictor: Arc<SessionEvictor>,
    endpoints: Endpoints,
    inactive: InactiveMarkers,
}

impl HttpGateway {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        store: Arc<dyn SessionStore>,
        evictor: Arc<SessionEvictor>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            transport,
            store,
            evictor,
            endpoints: config.endpoints.clone(),
            inactive: config.inactive.clone(),
        }
    }

    /// Send `request`, recovering from one expired-credentials 401.
    ///
    /// # Errors
    ///
    /// Returns the server failure, the transport error, or `SessionEnded`
    /// when a logout raced the refresh.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let response = self.transport.send(&request).await?;
        match self.inspect(&request, response) {
            Inspection::Done(result) => return result,
            Inspection::Refresh(_) => {}
        }

        log::debug!("{} returned 401; refreshing credentials", request.path);
        let generation = self.store.snapshot().generation;
        self.refresh().await?;

        let snapshot = self.store.snapshot();
        if snapshot.generation != generation && !snapshot.is_authenticated {
            log::info!("session ended during refresh; not retrying {}", request.path);
            return Err(GatewayError::SessionEnded);
        }

        request.retried = true;
        request.strip_authorization();
        let response = self.transport.send(&request).await?;
        match self.inspect(&request, response) {
            Inspection::Done(result) => result,
            Inspection::Refresh(failure) => Err(failure.into()),
        }
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`HttpGateway::send`], plus a decode failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.send(ApiRequest::get(path)).await?;
        Ok(response.json()?)
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpGateway::send`], plus encode/decode failures.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, GatewayError> {
        let body = serde_json::to_value(body).map_err(|e| TransportError::Request(e.to_string()))?;
        let response = self.send(ApiRequest::post(path).with_json(body)).await?;
        Ok(response.json()?)
    }

    fn inspect(&self, request: &ApiRequest, response: ApiResponse) -> Inspection {
        if response.is_success() {
            return Inspection::Done(Ok(response));
        }
        let failure = ApiFailure::from_response(&response);
        match failure.status {
            403 if failure.is_account_inactive(&self.inactive) => {
                log::warn!("{} rejected: account inactive", request.path);
                self.evictor.evict(EvictionReason::AccountInactive);
                Inspection::Done(Err(failure.into()))
            }
            401 if !request.retried && !self.endpoints.is_auth_endpoint(&request.path) => {
                Inspection::Refresh(failure)
            }
            _ => Inspection::Done(Err(failure.into())),
        }
    }

    async fn refresh(&self) -> Result<(), GatewayError> {
        let request = ApiRequest::post(self.endpoints.refresh.as_str());
        let failure: GatewayError = match self.transport.send(&request).await {
            Ok(response) if response.is_success() => return Ok(()),
            Ok(response) => {
                let failure = ApiFailure::from_response(&response);
                let reason = if failure.is_account_inactive(&self.inactive) {
                    EvictionReason::AccountInactive
                } else {
                    EvictionReason::RefreshFailed
                };
                log::warn!("credential refresh failed with status {}", failure.status);
                self.evictor.evict(reason);
                failure.into()
            }
            Err(err) => {
                log::warn!("credential refresh failed: {err}");
                self.evictor.evict(EvictionReason::RefreshFailed);
                err.into()
            }
        };
        Err(failure)
    }
}
