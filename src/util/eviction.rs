//! The hard-kill sequence that ends a session from anywhere in the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway (inactive account, failed refresh), every route guard
//! (deactivated user observed), and logout all funnel through
//! `SessionEvictor::evict`. The order is fixed: clear the store, purge the
//! persisted copies, then navigate to sign-in unless already there.
//!
//! Eviction is idempotent per session generation. Guards re-render and
//! concurrent responses arrive while the first eviction is still
//! navigating; those repeat calls find the same generation and do nothing.

#[cfg(test)]
#[path = "eviction_test.rs"]
mod eviction_test;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Routes;
use crate::state::auth::SessionStore;
use crate::util::navigation::{Navigator, on_sign_in_route};
use crate::util::session_storage::SessionPersistence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionReason {
    /// The backend reported the account as deactivated.
    AccountInactive,
    /// A 401 could not be recovered by refreshing credentials.
    RefreshFailed,
    /// A route guard saw `is_active == false` in the session.
    DeactivatedUser,
    Logout,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AccountInactive => "account inactive",
            Self::RefreshFailed => "refresh failed",
            Self::DeactivatedUser => "deactivated user",
            Self::Logout => "logout",
        })
    }
}

pub struct SessionEvictor {
    store: Arc<dyn SessionStore>,
    persistence: Arc<dyn SessionPersistence>,
    navigator: Arc<dyn Navigator>,
    routes: Routes,
    /// Generation left behind by the last completed eviction.
    evicted_generation: Mutex<Option<u64>>,
}

impl SessionEvictor {
    pub fn new(
        store: Arc<dyn SessionStore>,
        persistence: Arc<dyn SessionPersistence>,
        navigator: Arc<dyn Navigator>,
        routes: Routes,
    ) -> Self {
        Self { store, persistence, navigator, routes, evicted_generation: Mutex::new(None) }
    }

    /// Clear, purge, navigate. Returns `false` if this session end was
    /// already handled.
    pub fn evict(&self, reason: EvictionReason) -> bool {
        let had_session = {
            let snapshot = self.store.snapshot();
            snapshot.is_authenticated || snapshot.user.is_some()
        };
        if had_session {
            self.store.clear_user();
        }

        let generation = self.store.snapshot().generation;
        {
            let mut evicted = self.evicted_generation.lock().unwrap_or_else(PoisonError::into_inner);
            if *evicted == Some(generation) {
                log::debug!("session already evicted ({reason}); skipping");
                return false;
            }
            *evicted = Some(generation);
        }

        self.persistence.purge();

        if on_sign_in_route(self.navigator.as_ref(), &self.routes) {
            log::info!("session evicted ({reason}); already on sign-in");
        } else {
            log::info!("session evicted ({reason}); redirecting to {}", self.routes.sign_in);
            self.navigator.redirect(&self.routes.sign_in);
        }
        true
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }
}

impl fmt::Debug for SessionEvictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvictor").field("routes", &self.routes).finish_non_exhaustive()
    }
}
