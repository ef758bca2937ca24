//! Theme lifecycle: init, apply, follow the system preference.

use std::sync::Arc;

use super::{
    apply_theme, load_theme_config, save_theme_config, ColorSchemeSource, SchemeCallback,
    SchemeMode, StyleTarget, Subscription, ThemeConfig, ThemeMode,
};
use crate::storage::KeyValueStore;

/// Owns the theme side effects for one style target.
///
/// The persisted [`ThemeConfig`] is the source of truth: every preference
/// notification re-reads it, so a user who switched to an explicit mode is
/// never overridden by a stale `auto` watcher.
pub struct ThemeManager {
    store: Arc<dyn KeyValueStore>,
    target: Arc<dyn StyleTarget>,
    scheme: Arc<dyn ColorSchemeSource>,
    watcher: Option<Subscription>,
}

impl ThemeManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        target: Arc<dyn StyleTarget>,
        scheme: Arc<dyn ColorSchemeSource>,
    ) -> Self {
        Self {
            store,
            target,
            scheme,
            watcher: None,
        }
    }

    /// Current stored config (defaults when unreadable).
    pub fn config(&self) -> ThemeConfig {
        load_theme_config(self.store.as_ref())
    }

    /// Resolve the stored mode against the current system preference.
    pub fn resolved_mode(&self) -> SchemeMode {
        self.resolve(self.config().mode)
    }

    /// Whether a system preference watcher is registered.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Read the stored config and apply it.
    ///
    /// In `auto` mode this also registers the preference watcher. It stays
    /// registered for the life of the manager and re-applies the theme only
    /// while the stored mode is `auto`. Returns the config that was read.
    pub fn init(&mut self) -> ThemeConfig {
        let config = self.config();

        if config.mode == ThemeMode::Auto {
            self.watch();
        }

        let mode = self.resolve(config.mode);
        apply_theme(self.target.as_ref(), mode, &config.primary_color);
        tracing::info!(stored = %config.mode, applied = %mode, "Theme initialized");

        config
    }

    /// Persist a new mode and apply it immediately.
    pub fn set_mode(&mut self, mode: ThemeMode) -> ThemeConfig {
        let config = ThemeConfig {
            mode,
            ..self.config()
        };
        self.store_and_apply(config)
    }

    /// Persist a new primary color and apply it immediately.
    pub fn set_primary_color(&mut self, primary_color: impl Into<String>) -> ThemeConfig {
        let config = ThemeConfig {
            primary_color: primary_color.into(),
            ..self.config()
        };
        self.store_and_apply(config)
    }

    /// Drop the preference watcher, if any.
    pub fn stop_watching(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.cancel();
        }
    }

    fn store_and_apply(&mut self, config: ThemeConfig) -> ThemeConfig {
        save_theme_config(self.store.as_ref(), &config);

        // Started in an explicit mode, so nothing is watching yet
        if config.mode == ThemeMode::Auto {
            self.watch();
        }

        let mode = self.resolve(config.mode);
        apply_theme(self.target.as_ref(), mode, &config.primary_color);
        config
    }

    fn resolve(&self, mode: ThemeMode) -> SchemeMode {
        mode.fixed()
            .unwrap_or_else(|| SchemeMode::from_prefers_dark(self.scheme.prefers_dark()))
    }

    /// Register the preference watcher unless one is already live.
    fn watch(&mut self) {
        if self.watcher.is_some() {
            return;
        }

        let store = Arc::clone(&self.store);
        let target = Arc::clone(&self.target);

        let callback: SchemeCallback = Arc::new(move |mode: SchemeMode| {
            let config = load_theme_config(store.as_ref());
            if config.mode == ThemeMode::Auto {
                apply_theme(target.as_ref(), mode, &config.primary_color);
            } else {
                tracing::debug!(%mode, "Ignoring system scheme change, explicit mode stored");
            }
        });

        self.watcher = Some(self.scheme.subscribe(callback));
    }
}
