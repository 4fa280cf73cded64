//! Route-guard decisions shared by every protected route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guard variant runs the same sequence (loading, unauthenticated,
//! deactivated) and differs only in its role predicate. The decision is a
//! pure function of the session snapshot; `install_guard_effects` applies
//! the matching side effect (redirect or eviction).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::Routes;
use crate::net::types::{Role, User};
use crate::state::auth::AuthState;
use crate::util::eviction::{EvictionReason, SessionEvictor};

/// Which signed-in users a guard lets through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any active, signed-in user.
    Any,
    /// `admin` role or a superadmin of any role.
    Admin,
    Exact(Role),
    OneOf(Vec<Role>),
}

impl RoleRequirement {
    pub fn permits(&self, user: &User) -> bool {
        match self {
            Self::Any => true,
            Self::Admin => user.is_superadmin || user.has_role(Role::Admin),
            Self::Exact(role) => user.has_role(*role),
            Self::OneOf(roles) => roles.iter().any(|role| user.has_role(*role)),
        }
    }

    /// Only the admin guard sends mismatches to the unauthorized page.
    fn mismatch_redirect<'a>(&self, routes: &'a Routes) -> &'a str {
        match self {
            Self::Admin => &routes.unauthorized,
            _ => &routes.sign_in,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth state not yet known; render a placeholder, never redirect.
    Loading,
    Unauthenticated { redirect_to: String },
    /// Signed in, but the account is deactivated.
    Blocked,
    RoleMismatch { redirect_to: String },
    Authorized,
}

impl GuardDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { redirect_to } | Self::RoleMismatch { redirect_to } => Some(redirect_to.as_str()),
            Self::Loading | Self::Blocked | Self::Authorized => None,
        }
    }
}

pub fn evaluate_guard(state: &AuthState, requirement: &RoleRequirement, routes: &Routes) -> GuardDecision {
    if state.loading {
        return GuardDecision::Loading;
    }
    let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated) else {
        return GuardDecision::Unauthenticated { redirect_to: routes.sign_in.clone() };
    };
    if user.is_deactivated() {
        return GuardDecision::Blocked;
    }
    if !requirement.permits(user) {
        return GuardDecision::RoleMismatch { redirect_to: requirement.mismatch_redirect(routes).to_owned() };
    }
    GuardDecision::Authorized
}

/// Side effect for one guard decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardAction {
    None,
    Evict,
    Redirect(String),
}

/// Pick the side effect for `current`, given the decision it replaced.
///
/// Eviction clears the store and navigates on its own, so the
/// `Unauthenticated` decision that follows a `Blocked` one does not redirect
/// a second time.
pub fn guard_action(previous: Option<&GuardDecision>, current: &GuardDecision) -> GuardAction {
    match current {
        GuardDecision::Blocked => GuardAction::Evict,
        GuardDecision::Unauthenticated { .. } if previous == Some(&GuardDecision::Blocked) => GuardAction::None,
        _ => current.redirect_target().map_or(GuardAction::None, |target| GuardAction::Redirect(target.to_owned())),
    }
}

/// Redirect (replacing history) or evict whenever the guard decision says so.
pub fn install_guard_effects<F>(decision: Memo<GuardDecision>, evictor: Arc<SessionEvictor>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move |previous: Option<GuardDecision>| {
        let current = decision.get();
        match guard_action(previous.as_ref(), &current) {
            GuardAction::Evict => {
                evictor.evict(EvictionReason::DeactivatedUser);
            }
            GuardAction::Redirect(target) => {
                navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
            GuardAction::None => {}
        }
        current
    });
}
