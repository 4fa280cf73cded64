//! Persisted copies of the session: `localStorage` entries and auth cookies.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior so the session
//! controller and the evictor never touch web-sys directly. SSR builds
//! compile every operation as a no-op.

#[cfg(test)]
#[path = "session_storage_test.rs"]
mod session_storage_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StorageKeys;
use crate::net::types::User;

/// Durable copy of the session outside the in-memory store.
pub trait SessionPersistence: Send + Sync {
    /// Restore the user saved by a previous sign-in, if any.
    fn load(&self) -> Option<User>;
    fn save(&self, user: &User);
    /// Remove every persisted trace: storage entries and auth cookies.
    fn purge(&self);
}

/// Serialized shape under the session key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: User,
}

/// `localStorage` + `document.cookie` persistence.
#[derive(Clone, Debug, Default)]
pub struct BrowserSessionStorage {
    keys: StorageKeys,
}

impl BrowserSessionStorage {
    pub fn new(keys: StorageKeys) -> Self {
        Self { keys }
    }
}

impl SessionPersistence for BrowserSessionStorage {
    fn load(&self) -> Option<User> {
        load_json::<PersistedSession>(&self.keys.session).map(|persisted| persisted.user)
    }

    fn save(&self, user: &User) {
        save_json(&self.keys.session, &PersistedSession { user: user.clone() });
    }

    fn purge(&self) {
        remove_item(&self.keys.session);
        remove_item(&self.keys.root);
        for cookie in &self.keys.cookies {
            expire_cookie(cookie);
        }
    }
}

/// Cookie assignment that deletes `name` by expiring it.
#[cfg(any(test, feature = "hydrate"))]
fn expired_cookie(name: &str) -> String {
    format!("{name}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("failed to persist {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

fn remove_item(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

fn expire_cookie(name: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(html) = document.dyn_into::<web_sys::HtmlDocument>() else {
            return;
        };
        let _ = html.set_cookie(&expired_cookie(name));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
    }
}
