//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::{
    AdminRoute, ClubManagerRoute, FanRoute, MultiRoleRoute, OrganizerRoute, PlayerRoute, ProtectedRoute,
};
use crate::config::ClientConfig;
use crate::net::session::SessionController;
use crate::net::types::Role;
use crate::pages::{
    dashboard::{DashboardPage, HomePage},
    signin::SignInPage,
    unauthorized::UnauthorizedPage,
};
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store and controller, restores any persisted
/// session, and mounts the guarded routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Guards render a placeholder until hydration clears the loading flag.
    let auth = RwSignal::new(AuthState::pending());
    let session = SessionController::browser(ClientConfig::from_build_env(), auth);
    provide_context(auth);
    provide_context(session.clone());

    Effect::new(move || {
        session.hydrate();
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/cricb.css"/>
        <Title text="CricB"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("signin") view=SignInPage/>
                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><HomePage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("admin")
                    view=|| view! { <AdminRoute><DashboardPage title="Admin"/></AdminRoute> }
                />
                <Route
                    path=StaticSegment("organizer")
                    view=|| view! { <OrganizerRoute><DashboardPage title="Organizer"/></OrganizerRoute> }
                />
                <Route
                    path=StaticSegment("club-manager")
                    view=|| view! { <ClubManagerRoute><DashboardPage title="Club Manager"/></ClubManagerRoute> }
                />
                <Route
                    path=StaticSegment("player")
                    view=|| view! { <PlayerRoute><DashboardPage title="Player"/></PlayerRoute> }
                />
                <Route
                    path=StaticSegment("fan")
                    view=|| view! { <FanRoute><DashboardPage title="Fan"/></FanRoute> }
                />
                <Route
                    path=StaticSegment("scoring")
                    view=|| {
                        view! {
                            <MultiRoleRoute roles=vec![Role::Admin, Role::Organizer, Role::ClubManager]>
                                <DashboardPage title="Live scoring"/>
                            </MultiRoleRoute>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
