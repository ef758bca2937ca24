//! System color-scheme preference and change subscriptions.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::SchemeMode;

/// Callback invoked with the newly preferred mode.
pub type SchemeCallback = Arc<dyn Fn(SchemeMode) + Send + Sync>;

/// Host query for the `prefers-color-scheme` preference.
pub trait ColorSchemeSource: Send + Sync {
    /// Whether the system currently prefers a dark scheme.
    fn prefers_dark(&self) -> bool;

    /// Register for preference changes. Dropping or cancelling the returned
    /// handle unregisters the callback.
    fn subscribe(&self, callback: SchemeCallback) -> Subscription;
}

/// Handle to a registered callback.
///
/// Hold it for as long as notifications are wanted; `cancel` or drop
/// unregisters.
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    pub fn cancel(mut self) {
        self.unregister_now();
    }

    fn unregister_now(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

/// In-process preference source.
///
/// The host (or a test) flips the preference with
/// [`set_prefers_dark`](Self::set_prefers_dark); subscribers are notified in
/// registration order, only when the value actually changes.
#[derive(Clone)]
pub struct SchemeBroadcaster {
    inner: Arc<BroadcasterInner>,
}

struct BroadcasterInner {
    prefers_dark: AtomicBool,
    next_id: AtomicU64,
    listeners: RwLock<Vec<(u64, SchemeCallback)>>,
}

impl SchemeBroadcaster {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            inner: Arc::new(BroadcasterInner {
                prefers_dark: AtomicBool::new(prefers_dark),
                next_id: AtomicU64::new(0),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Change the preference and notify subscribers if it differs.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let previous = self.inner.prefers_dark.swap(prefers_dark, Ordering::SeqCst);
        if previous == prefers_dark {
            return;
        }

        let mode = SchemeMode::from_prefers_dark(prefers_dark);
        tracing::debug!(%mode, "System color scheme changed");

        // Snapshot so callbacks may subscribe or cancel without deadlocking
        let callbacks: Vec<SchemeCallback> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(mode);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }
}

impl Default for SchemeBroadcaster {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ColorSchemeSource for SchemeBroadcaster {
    fn prefers_dark(&self) -> bool {
        self.inner.prefers_dark.load(Ordering::SeqCst)
    }

    fn subscribe(&self, callback: SchemeCallback) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().push((id, callback));

        let weak: Weak<BroadcasterInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.write().retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
