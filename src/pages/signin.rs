//! Sign-in page: email + password against the sign-in endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the session controller's sign-in handler and, on success, sends the
//! user to their role's landing route. Failures are shown inline; the store
//! is never touched directly from here.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use leptos::prelude::*;

use crate::net::types::SignInRequest;

/// Validate form input before any request is issued.
fn build_credentials(email: &str, password: &str) -> Result<SignInRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok(SignInRequest { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let session = expect_context::<crate::net::session::SessionController>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match build_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.sign_in(&credentials).await {
                    Ok(user) => {
                        info.set(String::new());
                        navigate(user.home_route(), leptos_router::NavigateOptions::default());
                    }
                    Err(e) => info.set(e.display_message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
        }
    };

    view! {
        <div class="signin-page">
            <div class="signin-card">
                <h1>"CricB"</h1>
                <p class="signin-card__subtitle">"Sign in to continue"</p>
                <form class="signin-form" on:submit=on_submit>
                    <input
                        class="signin-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="signin-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="signin-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="signin-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
