//! Role landing pages and the root redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Always rendered inside a route guard, so a signed-in user is present.
//! Dashboard content is served by the API; these pages only carry the
//! session chrome (identity + sign out).

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::session::SessionController;
use crate::net::types::User;
use crate::state::auth::AuthState;

/// "Name · Role" line for the signed-in user.
fn identity_line(user: Option<&User>) -> String {
    let Some(user) = user else {
        return String::new();
    };
    let role = user.role_kind().map_or(user.role.as_str(), |role| role.label());
    if user.is_superadmin {
        format!("{} · {role} · Superadmin", user.name)
    } else {
        format!("{} · {role}", user.name)
    }
}

#[component]
pub fn DashboardPage(#[prop(into)] title: String) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<SessionController>();
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            session.logout().await;
            busy.set(false);
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{title}</h1>
                <span class="dashboard-identity">{move || identity_line(auth.get().user.as_ref())}</span>
                <button class="dashboard-logout" on:click=on_logout disabled=move || busy.get()>
                    "Sign out"
                </button>
            </header>
        </div>
    }
}

/// `/` sends a signed-in user to their role's landing route.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(user) = auth.get().user {
            navigate(user.home_route(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! { <div class="route-guard__loading">"Loading..."</div> }
}
