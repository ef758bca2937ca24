//! Theme subsystem: light/dark/auto mode and the brand palette.
//!
//! ## Overview
//!
//! A theme is a stored [`ThemeConfig`] (mode + primary color) applied to a
//! [`StyleTarget`] as two independent side effects:
//!
//! - the `theme-mode` attribute set to the resolved mode (`light`/`dark`)
//! - ten `--td-brand-color-{i}` properties holding the derived palette
//!
//! `auto` is never applied directly. It resolves against the host's
//! [`ColorSchemeSource`] and, while the stored mode stays `auto`, follows
//! preference changes.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use adminshell_core::storage::MemoryStore;
//! use adminshell_core::theme::{RootStyle, SchemeBroadcaster, ThemeManager, ThemeMode};
//!
//! let style = Arc::new(RootStyle::new());
//! let scheme = SchemeBroadcaster::new(true);
//! let mut themes = ThemeManager::new(
//!     Arc::new(MemoryStore::new()),
//!     style.clone(),
//!     Arc::new(scheme.clone()),
//! );
//!
//! let config = themes.init();
//! assert_eq!(config.mode, ThemeMode::Auto);
//! assert_eq!(style.attribute("theme-mode").as_deref(), Some("dark"));
//! ```

mod manager;
mod scheme;
mod style;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{generate_color_gradations, DEFAULT_PRIMARY_COLOR};
use crate::error::ShellError;
use crate::storage::{self, KeyValueStore};

pub use manager::ThemeManager;
pub use scheme::{ColorSchemeSource, SchemeBroadcaster, SchemeCallback, Subscription};
pub use style::{RootStyle, StyleTarget};

/// Storage key of the persisted theme config
pub const THEME_STORAGE_KEY: &str = "theme-config";

/// Attribute carrying the resolved mode for stylesheets
pub const THEME_MODE_ATTRIBUTE: &str = "theme-mode";

/// Prefix of the brand palette style properties; the shade index follows
pub const BRAND_COLOR_VAR_PREFIX: &str = "--td-brand-color-";

/// Style property name for palette shade `index` (1-based).
pub fn brand_color_var(index: usize) -> String {
    format!("{}{}", BRAND_COLOR_VAR_PREFIX, index)
}

/// Mode chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the system color-scheme preference
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }

    /// The concrete mode, or `None` for `auto`.
    pub fn fixed(self) -> Option<SchemeMode> {
        match self {
            ThemeMode::Light => Some(SchemeMode::Light),
            ThemeMode::Dark => Some(SchemeMode::Dark),
            ThemeMode::Auto => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            _ => Err(ShellError::Serialization(format!(
                "Invalid theme mode '{}'. Must be one of: light, dark, auto",
                s
            ))),
        }
    }
}

/// A resolved, applicable mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeMode {
    #[default]
    Light,
    Dark,
}

impl SchemeMode {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            SchemeMode::Dark
        } else {
            SchemeMode::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeMode::Light => "light",
            SchemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SchemeMode::Light => SchemeMode::Dark,
            SchemeMode::Dark => SchemeMode::Light,
        }
    }
}

impl fmt::Display for SchemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted theme settings, stored as
/// `{"mode": "light"|"dark"|"auto", "primaryColor": "#rrggbb"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    pub primary_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Auto,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

/// Read the stored theme config.
///
/// Missing, unreadable or corrupt data is logged and replaced by the
/// default config; this never fails.
pub fn load_theme_config<S: KeyValueStore + ?Sized>(store: &S) -> ThemeConfig {
    match storage::load_json(store, THEME_STORAGE_KEY) {
        Ok(Some(config)) => config,
        Ok(None) => ThemeConfig::default(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read theme config, using defaults");
            ThemeConfig::default()
        }
    }
}

/// Persist the theme config. Write failures are logged and dropped.
pub fn save_theme_config<S: KeyValueStore + ?Sized>(store: &S, config: &ThemeConfig) {
    if let Err(e) = storage::save_json(store, THEME_STORAGE_KEY, config) {
        tracing::error!(error = %e, "Failed to save theme config");
    }
}

/// Set the mode marker consumed by stylesheets.
pub fn set_theme_mode<T: StyleTarget + ?Sized>(target: &T, mode: SchemeMode) {
    target.set_attribute(THEME_MODE_ATTRIBUTE, mode.as_str());
}

/// Publish the palette derived from `primary_color` as brand properties.
pub fn apply_primary_color<T: StyleTarget + ?Sized>(target: &T, primary_color: &str) {
    let palette = generate_color_gradations(primary_color);
    for (index, color) in palette.iter() {
        target.set_property(&brand_color_var(index), color);
    }
}

/// Apply both halves of a theme.
pub fn apply_theme<T: StyleTarget + ?Sized>(target: &T, mode: SchemeMode, primary_color: &str) {
    set_theme_mode(target, mode);
    apply_primary_color(target, primary_color);
    tracing::debug!(%mode, primary_color, "Applied theme");
}
