//! Typed calls to the auth endpoints, all routed through the gateway.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns the gateway's error unchanged; the session controller
//! decides what a failure means for the store.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::GatewayError;
use super::gateway::HttpGateway;
use super::transport::ApiRequest;
use super::types::{SignInRequest, SignInResponse};
use crate::config::Endpoints;

/// `POST` the credentials to the sign-in endpoint.
///
/// # Errors
///
/// Returns the gateway error for non-2xx responses or transport failures.
pub async fn sign_in(
    gateway: &HttpGateway,
    endpoints: &Endpoints,
    credentials: &SignInRequest,
) -> Result<SignInResponse, GatewayError> {
    gateway.post_json(&endpoints.sign_in, credentials).await
}

/// `POST` to the logout endpoint; the body is ignored.
///
/// # Errors
///
/// Returns the gateway error; callers treat logout as fire-and-forget.
pub async fn logout(gateway: &HttpGateway, endpoints: &Endpoints) -> Result<(), GatewayError> {
    gateway.send(ApiRequest::post(endpoints.logout.as_str())).await.map(|_| ())
}
