//! Session store: the signed-in user and login/logout transitions.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{persist, rehydrate};
use crate::error::{ShellError, ShellResult};
use crate::storage::KeyValueStore;

/// Storage key of the persisted session
pub const USER_STORE_KEY: &str = "user-store";

/// Profile returned by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,

    /// Anything else the backend sends (token, roles, avatar...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Result of a login/logout call as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(err: &ShellError) -> Self {
        let message = match err {
            ShellError::Auth(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self {
            success: false,
            message: Some(message),
        }
    }
}

/// Network side of authentication.
pub trait AuthApi: Send + Sync {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = ShellResult<UserInfo>> + Send;

    fn logout(&self) -> impl Future<Output = ShellResult<()>> + Send;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedSession {
    user_info: Option<UserInfo>,
}

pub struct UserStore {
    store: Arc<dyn KeyValueStore>,
    user_info: Option<UserInfo>,
}

impl UserStore {
    /// Rehydrate the session from storage.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let session: PersistedSession = rehydrate(store.as_ref(), USER_STORE_KEY);
        Self {
            store,
            user_info: session.user_info,
        }
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    /// Signed-in username, empty when signed out.
    pub fn username(&self) -> &str {
        self.user_info
            .as_ref()
            .map(|info| info.username.as_str())
            .unwrap_or_default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_info.is_some()
    }

    pub fn set_user_info(&mut self, info: Option<UserInfo>) {
        self.user_info = info;
        self.save();
    }

    /// Sign in. The session changes only once the backend accepts.
    pub async fn login<A: AuthApi>(&mut self, api: &A, credentials: &Credentials) -> AuthOutcome {
        match api.login(credentials).await {
            Ok(info) => {
                tracing::info!(username = %info.username, "Signed in");
                self.set_user_info(Some(info));
                AuthOutcome::ok()
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                AuthOutcome::failed(&e)
            }
        }
    }

    /// Sign out. The local session is cleared before the backend is called,
    /// so it stays cleared whatever the backend says.
    pub async fn logout<A: AuthApi>(&mut self, api: &A) -> AuthOutcome {
        self.set_user_info(None);

        match api.logout().await {
            Ok(()) => AuthOutcome::ok(),
            Err(e) => {
                tracing::error!(error = %e, "Logout call failed, local session cleared anyway");
                AuthOutcome::failed(&e)
            }
        }
    }

    fn save(&self) {
        let session = PersistedSession {
            user_info: self.user_info.clone(),
        };
        persist(self.store.as_ref(), USER_STORE_KEY, &session);
    }
}
