//! Landing page for signed-in users who hit an admin-only route.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="unauthorized-page">
            <h1>"Access denied"</h1>
            <p>"Your account does not have permission to view this page."</p>
            <A href="/">"Back to your dashboard"</A>
        </div>
    }
}
