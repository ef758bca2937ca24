//! Application store: page title, theme flags, lock screen, menu cache.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{persist, rehydrate};
use crate::menu::{index_menu_items, search_menu_items, MenuItem, RouteNode};
use crate::storage::KeyValueStore;
use crate::theme::{set_theme_mode, SchemeMode, StyleTarget};

/// Storage key of the persisted application state
pub const APP_STORE_KEY: &str = "app-store";

/// The persisted subset of the application store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub title: String,
    /// Global theme
    pub theme: SchemeMode,
    /// Menu bar theme, independent of the global one
    pub sidebar_theme: SchemeMode,
    pub is_locked: bool,
    pub lock_password: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            title: String::new(),
            theme: SchemeMode::Light,
            sidebar_theme: SchemeMode::Dark,
            is_locked: false,
            lock_password: String::new(),
        }
    }
}

pub struct AppStore {
    store: Arc<dyn KeyValueStore>,
    target: Arc<dyn StyleTarget>,
    state: AppState,
    should_refresh: bool,
    menu_items: Vec<MenuItem>,
}

impl AppStore {
    /// Rehydrate from storage. Unreadable state falls back to defaults.
    pub fn load(store: Arc<dyn KeyValueStore>, target: Arc<dyn StyleTarget>) -> Self {
        let state = rehydrate(store.as_ref(), APP_STORE_KEY);
        Self {
            store,
            target,
            state,
            should_refresh: false,
            menu_items: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    pub fn theme(&self) -> SchemeMode {
        self.state.theme
    }

    pub fn sidebar_theme(&self) -> SchemeMode {
        self.state.sidebar_theme
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked
    }

    pub fn lock_password(&self) -> &str {
        &self.state.lock_password
    }

    pub fn should_refresh(&self) -> bool {
        self.should_refresh
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
        self.save();
    }

    /// Set the global theme and mark the style root with it.
    pub fn set_theme(&mut self, theme: SchemeMode) {
        self.state.theme = theme;
        set_theme_mode(self.target.as_ref(), theme);
        self.save();
    }

    pub fn set_sidebar_theme(&mut self, theme: SchemeMode) {
        self.state.sidebar_theme = theme;
        self.save();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.state.theme.toggled());
    }

    pub fn toggle_sidebar_theme(&mut self) {
        self.set_sidebar_theme(self.state.sidebar_theme.toggled());
    }

    /// Re-apply the stored global theme to the style root.
    pub fn init_theme(&self) {
        set_theme_mode(self.target.as_ref(), self.state.theme);
    }

    pub fn set_lock_status(&mut self, locked: bool) {
        self.state.is_locked = locked;
        self.save();
    }

    pub fn lock_screen(&mut self) {
        self.set_lock_status(true);
    }

    pub fn unlock_screen(&mut self) {
        self.set_lock_status(false);
    }

    pub fn set_lock_password(&mut self, password: impl Into<String>) {
        self.state.lock_password = password.into();
        self.save();
    }

    pub fn clear_lock_password(&mut self) {
        self.state.lock_password.clear();
        self.save();
    }

    pub fn trigger_refresh(&mut self) {
        self.should_refresh = true;
    }

    pub fn reset_refresh(&mut self) {
        self.should_refresh = false;
    }

    /// Rebuild the menu cache from a route table.
    pub fn init_menu_items(&mut self, routes: &[RouteNode]) {
        self.menu_items = index_menu_items(routes);
    }

    /// Search the cached menu by title.
    pub fn search_menu_items(&self, keyword: &str) -> Vec<MenuItem> {
        search_menu_items(&self.menu_items, keyword)
    }

    fn save(&self) {
        persist(self.store.as_ref(), APP_STORE_KEY, &self.state);
    }
}
