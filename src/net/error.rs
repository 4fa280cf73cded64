//! Error types for the HTTP gateway and the session controller.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors describe a single exchange that produced no usable
//! response. `ApiFailure` is a response the server did send with a non-2xx
//! status. Callers display `ApiFailure::display_message`; nothing here is
//! swallowed silently.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use super::transport::ApiResponse;
use super::types::ErrorBody;
use crate::config::InactiveMarkers;

/// Failure of a single request/response exchange.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// A non-2xx response, with whatever the error body told us.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub detail: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
}

impl ApiFailure {
    pub fn from_response(response: &ApiResponse) -> Self {
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
        Self { status: response.status, detail: body.detail, message: body.message, code: body.code }
    }

    /// Whether the body signals an administratively deactivated account.
    ///
    /// The structured `code` matches, or `detail` contains one of the
    /// inactive phrases. Any other `code` does not mask the `detail` check.
    pub fn is_account_inactive(&self, markers: &InactiveMarkers) -> bool {
        if self.code.as_deref() == Some(markers.code.as_str()) {
            return true;
        }
        self.detail
            .as_deref()
            .is_some_and(|detail| markers.detail_substrings.iter().any(|marker| detail.contains(marker.as_str())))
    }

    /// Best human-readable message for forms and toasts.
    pub fn display_message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| status_failed_message(self.status))
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail.as_deref().or(self.message.as_deref()) {
            Some(text) => write!(f, "request failed with status {}: {text}", self.status),
            None => f.write_str(&status_failed_message(self.status)),
        }
    }
}

fn status_failed_message(status: u16) -> String {
    format!("request failed with status {status}")
}

/// What a caller of the gateway sees when a request does not succeed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Api(ApiFailure),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("session ended before the request could be retried")]
    SessionEnded,
}

impl From<ApiFailure> for GatewayError {
    fn from(failure: ApiFailure) -> Self {
        Self::Api(failure)
    }
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(failure) => Some(failure.status),
            Self::Transport(_) | Self::SessionEnded => None,
        }
    }

    pub fn display_message(&self) -> String {
        match self {
            Self::Api(failure) => failure.display_message(),
            other => other.to_string(),
        }
    }
}

/// Outcome of the sign-in / logout handlers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The server answered `success: false`.
    #[error("sign in rejected: {0}")]
    Rejected(String),
    #[error("sign in succeeded without a user record")]
    MissingUser,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::MissingUser => self.to_string(),
            Self::Gateway(err) => err.display_message(),
        }
    }
}
