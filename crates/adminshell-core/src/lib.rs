//! Admin Shell Core Library
//!
//! State and theming core of a browser-style admin console shell.
//!
//! ## Overview
//!
//! - **Color engine** ([`color`]): hex / RGB / HSL conversion and the
//!   ten-shade brand palette derived from a single base color.
//! - **Theme** ([`theme`]): light / dark / auto mode, persisted theme config,
//!   palette publication as `--td-brand-color-{1..10}` style properties.
//! - **Menu indexer** ([`menu`]): flattens the route tree into the leaf menu
//!   entries used by the menu search box.
//! - **Stores** ([`store`]): application and session state with a declared
//!   persisted subset.
//! - **Storage** ([`storage`]): durable key-value storage backed by redb.
//!
//! Host collaborators (style root, color-scheme query, auth backend) are
//! traits, so the same core runs in a desktop shell, a CLI or tests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use adminshell_core::{RootStyle, SchemeBroadcaster, Storage, ThemeManager};
//!
//! let storage = Arc::new(Storage::new("~/.adminshell/data/shell.redb")?);
//! let style = Arc::new(RootStyle::new());
//!
//! let mut themes = ThemeManager::new(storage, style.clone(), Arc::new(SchemeBroadcaster::new(false)));
//! themes.init();
//!
//! print!("{}", style.to_css());
//! ```

pub mod color;
pub mod error;
pub mod logging;
pub mod menu;
pub mod storage;
pub mod store;
pub mod theme;

// Re-exports
pub use color::{
    generate_color_gradations, hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, Hsl, Palette,
    PresetColor, Rgb, DEFAULT_PRIMARY_COLOR,
};
pub use error::{ShellError, ShellResult};
pub use menu::{extract_menu_items, index_menu_items, search_menu_items, MenuItem, RouteMeta, RouteNode};
pub use storage::{KeyValueStore, MemoryStore, Storage};
pub use store::{AppState, AppStore, AuthApi, AuthOutcome, Credentials, UserInfo, UserStore};
pub use theme::{
    ColorSchemeSource, RootStyle, SchemeBroadcaster, SchemeMode, StyleTarget, Subscription,
    ThemeConfig, ThemeManager, ThemeMode,
};
