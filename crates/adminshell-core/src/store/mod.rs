//! UI state stores.
//!
//! Each store owns one concern and declares which of its fields survive a
//! reload. The persisted subset is a separate serializable struct written
//! to the key-value store after every mutation of a persisted field:
//!
//! | store       | key          | persisted fields                                       |
//! |-------------|--------------|--------------------------------------------------------|
//! | `AppStore`  | `app-store`  | title, theme, sidebarTheme, isLocked, lockPassword     |
//! | `UserStore` | `user-store` | userInfo                                               |
//!
//! Rehydration failures fall back to defaults and persist failures are
//! logged and dropped; neither surfaces to the caller.

mod app;
mod user;

pub use app::{AppState, AppStore, APP_STORE_KEY};
pub use user::{AuthApi, AuthOutcome, Credentials, UserInfo, UserStore, USER_STORE_KEY};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::{self, KeyValueStore};

/// Load a persisted subset, substituting the default on any failure.
fn rehydrate<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match storage::load_json(store, key) {
        Ok(Some(state)) => state,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to rehydrate store, using defaults");
            T::default()
        }
    }
}

/// Write a persisted subset; failures are logged only.
fn persist<T, S>(store: &S, key: &str, state: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    if let Err(e) = storage::save_json(store, key, state) {
        tracing::error!(key, error = %e, "Failed to persist store");
    }
}
