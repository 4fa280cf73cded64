//! Client configuration: API endpoints, route paths, and persisted-state names.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway, the route guards, and the persistence adapters all key off
//! the same paths and names, so they are collected here with typed defaults.
//! The API base URL is the only value read from the build environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "";
pub const SIGN_IN_ROUTE: &str = "/signin";
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// REST endpoints consumed by the session core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub sign_in: String,
    pub sign_up: String,
    pub refresh: String,
    pub logout: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sign_in: "/api/auth/signin".to_owned(),
            sign_up: "/api/auth/signup".to_owned(),
            refresh: "/api/auth/refresh".to_owned(),
            logout: "/api/auth/logout".to_owned(),
        }
    }
}

impl Endpoints {
    /// Whether `path` targets an endpoint that must never trigger a refresh
    /// (refresh itself, sign-in, sign-up).
    pub fn is_auth_endpoint(&self, path: &str) -> bool {
        let path = strip_query(path);
        [&self.refresh, &self.sign_in, &self.sign_up]
            .into_iter()
            .any(|endpoint| path.ends_with(endpoint.as_str()))
    }
}

/// Client-side navigation targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routes {
    pub sign_in: String,
    pub unauthorized: String,
    /// Additional paths treated as sign-in screens (no forced navigation away).
    pub sign_in_aliases: Vec<String>,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            sign_in: SIGN_IN_ROUTE.to_owned(),
            unauthorized: UNAUTHORIZED_ROUTE.to_owned(),
            sign_in_aliases: vec!["/login".to_owned()],
        }
    }
}

impl Routes {
    /// Whether the browser is already on a sign-in screen.
    pub fn is_sign_in(&self, path: &str) -> bool {
        let path = strip_query(path);
        std::iter::once(&self.sign_in)
            .chain(self.sign_in_aliases.iter())
            .any(|route| path == route || path.strip_prefix(route.as_str()).is_some_and(|rest| rest.starts_with('/')))
    }
}

/// Names of the persisted copies of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    /// `localStorage` key holding the serialized session.
    pub session: String,
    /// Broader persisted-root key, purged together with the session.
    pub root: String,
    /// Auth cookies expired on purge.
    pub cookies: Vec<String>,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            session: "persist:auth".to_owned(),
            root: "persist:root".to_owned(),
            cookies: vec!["access_token".to_owned(), "refresh_token".to_owned()],
        }
    }
}

/// How a deactivated account is recognized in error bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InactiveMarkers {
    /// Structured `code` value; authoritative when present.
    pub code: String,
    /// Legacy fallback: case-sensitive substrings of `detail`.
    pub detail_substrings: Vec<String>,
}

impl Default for InactiveMarkers {
    fn default() -> Self {
        Self {
            code: "account_inactive".to_owned(),
            detail_substrings: vec!["User account is inactive".to_owned(), "inactive".to_owned()],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub endpoints: Endpoints,
    pub routes: Routes,
    pub storage: StorageKeys,
    pub inactive: InactiveMarkers,
}

impl ClientConfig {
    /// Build config with the API base URL baked in at compile time.
    ///
    /// Optional:
    /// - `CRICB_API_BASE_URL`: origin prefix for API calls (default: same origin)
    pub fn from_build_env() -> Self {
        Self::with_api_base_url(option_env!("CRICB_API_BASE_URL"))
    }

    pub fn with_api_base_url(raw: Option<&str>) -> Self {
        Self { api_base_url: parse_base_url(raw), ..Self::default() }
    }
}

fn parse_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_owned()
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}
