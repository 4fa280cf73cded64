//! Hard navigation used when a session is torn down.
//!
//! TRADE-OFFS
//! ==========
//! Eviction replaces the current history entry through `window.location`
//! rather than the router, so nothing rendered for the dead session
//! survives. Route guards use the router for ordinary redirects.

use crate::config::Routes;

pub trait Navigator: Send + Sync {
    /// Current location path, without query or fragment.
    fn current_path(&self) -> String;
    /// Navigate to `path`, replacing the current history entry.
    fn redirect(&self, path: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn redirect(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if window.location().replace(path).is_err() {
                    log::warn!("navigation to {path} failed");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

/// Whether `navigator` is already showing a sign-in screen.
pub fn on_sign_in_route(navigator: &dyn Navigator, routes: &Routes) -> bool {
    routes.is_sign_in(&navigator.current_path())
}
