//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the HTTP gateway, and the session controller. The
//! store exposes exactly three transitions and performs no I/O; network,
//! storage and navigation happen around a transition, never inside it.
//!
//! DESIGN
//! ======
//! `generation` advances on every `set_user` and on every `clear_user` that
//! actually ends a session. It is the liveness token compared across an
//! `await`: a caller that recorded generation N can tell whether the session
//! it acted for still exists.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{PoisonError, RwLock};

use leptos::prelude::*;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// An auth operation (sign-in, logout, hydration) is in flight.
    pub loading: bool,
    pub generation: u64,
}

impl AuthState {
    /// Initial state before persisted-session hydration has run.
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Reset to signed-out. Returns `false` when there was nothing to clear.
    pub fn clear_user(&mut self) -> bool {
        if self.user.is_none() && !self.is_authenticated {
            return false;
        }
        self.user = None;
        self.is_authenticated = false;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Holds a user and is flagged authenticated.
    pub fn is_live(&self) -> bool {
        self.is_authenticated && self.user.is_some()
    }
}

/// Process-wide session store, injected wherever the session is read or
/// changed.
pub trait SessionStore: Send + Sync {
    fn snapshot(&self) -> AuthState;
    fn set_user(&self, user: User);
    fn set_loading(&self, loading: bool);
    fn clear_user(&self);
}

/// The reactive store used by the Leptos app.
impl SessionStore for RwSignal<AuthState> {
    fn snapshot(&self) -> AuthState {
        self.try_get_untracked().unwrap_or_default()
    }

    fn set_user(&self, user: User) {
        self.update(|state| state.set_user(user));
    }

    fn set_loading(&self, loading: bool) {
        self.update(|state| state.set_loading(loading));
    }

    fn clear_user(&self) {
        self.update(|state| {
            state.clear_user();
        });
    }
}

/// Non-reactive store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RwLock<AuthState>,
}

impl MemorySessionStore {
    pub fn new(state: AuthState) -> Self {
        Self { state: RwLock::new(state) }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl SessionStore for MemorySessionStore {
    fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_user(&self, user: User) {
        self.with_state(|state| state.set_user(user));
    }

    fn set_loading(&self, loading: bool) {
        self.with_state(|state| state.set_loading(loading));
    }

    fn clear_user(&self) {
        self.with_state(|state| {
            state.clear_user();
        });
    }
}
