//! Route guard components wrapping protected views.
//!
//! `RoleGuard` is the single implementation; the per-role components only
//! fix its `RoleRequirement`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::session::SessionController;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, RoleRequirement, evaluate_guard, install_guard_effects};

/// Render `children` only while the session satisfies `requirement`.
#[component]
pub fn RoleGuard(requirement: RoleRequirement, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<SessionController>();
    let routes = session.routes().clone();

    let decision = Memo::new(move |_| evaluate_guard(&auth.get(), &requirement, &routes));
    install_guard_effects(decision, session.evictor().clone(), use_navigate());

    move || match decision.get() {
        GuardDecision::Loading => view! { <div class="route-guard__loading">"Loading..."</div> }.into_any(),
        GuardDecision::Authorized => children().into_any(),
        GuardDecision::Unauthenticated { .. } | GuardDecision::Blocked | GuardDecision::RoleMismatch { .. } => {
            ().into_any()
        }
    }
}

/// Any signed-in, active user.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Any>{children()}</RoleGuard> }
}

/// Admins and superadmins; others are sent to the unauthorized page.
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Admin>{children()}</RoleGuard> }
}

#[component]
pub fn OrganizerRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Exact(Role::Organizer)>{children()}</RoleGuard> }
}

#[component]
pub fn ClubManagerRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Exact(Role::ClubManager)>{children()}</RoleGuard> }
}

#[component]
pub fn PlayerRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Exact(Role::Player)>{children()}</RoleGuard> }
}

#[component]
pub fn FanRoute(children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::Exact(Role::Fan)>{children()}</RoleGuard> }
}

/// Any of the listed roles.
#[component]
pub fn MultiRoleRoute(roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    view! { <RoleGuard requirement=RoleRequirement::OneOf(roles)>{children()}</RoleGuard> }
}
