//! End-to-end tests: stores and theme manager over a real redb file.

use std::sync::Arc;

use adminshell_core::theme::{brand_color_var, THEME_MODE_ATTRIBUTE, THEME_STORAGE_KEY};
use adminshell_core::{
    AppStore, KeyValueStore, RootStyle, RouteNode, SchemeBroadcaster, SchemeMode, Storage,
    ThemeManager, ThemeMode,
};
use tempfile::TempDir;

fn open_storage(dir: &TempDir) -> Arc<Storage> {
    Arc::new(Storage::new(dir.path().join("shell.redb")).unwrap())
}

#[test]
fn test_theme_choice_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let style = Arc::new(RootStyle::new());
        let mut themes = ThemeManager::new(
            open_storage(&dir),
            style,
            Arc::new(SchemeBroadcaster::new(false)),
        );
        themes.init();
        themes.set_mode(ThemeMode::Dark);
        themes.set_primary_color("#ed7b2f");
    }

    let storage = open_storage(&dir);
    let raw = storage.get_item(THEME_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(raw, r##"{"mode":"dark","primaryColor":"#ed7b2f"}"##);

    let style = Arc::new(RootStyle::new());
    let mut themes = ThemeManager::new(
        storage,
        style.clone(),
        Arc::new(SchemeBroadcaster::new(false)),
    );
    let config = themes.init();

    assert_eq!(config.mode, ThemeMode::Dark);
    assert!(!themes.is_watching());
    assert_eq!(style.attribute(THEME_MODE_ATTRIBUTE).as_deref(), Some("dark"));
    assert_eq!(style.property(&brand_color_var(1)).as_deref(), Some("#fdf0e8"));
    assert_eq!(style.property(&brand_color_var(10)).as_deref(), Some("#261103"));
}

#[test]
fn test_corrupt_theme_config_on_disk_falls_back() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    storage.set_item(THEME_STORAGE_KEY, "\u{0}garbage").unwrap();

    let style = Arc::new(RootStyle::new());
    let scheme = SchemeBroadcaster::new(true);
    let mut themes = ThemeManager::new(storage, style.clone(), Arc::new(scheme.clone()));
    let config = themes.init();

    assert_eq!(config.mode, ThemeMode::Auto);
    assert_eq!(style.attribute(THEME_MODE_ATTRIBUTE).as_deref(), Some("dark"));

    scheme.set_prefers_dark(false);
    assert_eq!(style.attribute(THEME_MODE_ATTRIBUTE).as_deref(), Some("light"));
}

#[test]
fn test_app_store_and_theme_share_one_database() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let style = Arc::new(RootStyle::new());

    let mut app = AppStore::load(storage.clone(), style.clone());
    app.set_title("Console");
    app.set_theme(SchemeMode::Dark);

    let mut themes = ThemeManager::new(
        storage.clone(),
        style.clone(),
        Arc::new(SchemeBroadcaster::new(false)),
    );
    themes.set_mode(ThemeMode::Light);

    let mut keys = storage.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["app-store", "theme-config"]);

    // The theme manager applied last
    assert_eq!(style.attribute(THEME_MODE_ATTRIBUTE).as_deref(), Some("light"));

    drop(app);
    let reloaded = AppStore::load(storage, style);
    assert_eq!(reloaded.title(), "Console");
    assert_eq!(reloaded.theme(), SchemeMode::Dark);
}

#[test]
fn test_menu_search_from_route_json() {
    let routes: Vec<RouteNode> = serde_json::from_str(
        r#"[
            {"path": "/", "name": "Layout", "children": [
                {"path": "/dashboard", "name": "Dashboard", "meta": {"title": "Dashboard", "icon": "dashboard"}},
                {"path": "/list", "name": "List", "meta": {"title": "Lists"}, "children": [
                    {"path": "/list/base", "name": "ListBase", "meta": {"title": "Base List"}},
                    {"path": "/list/card", "name": "ListCard", "meta": {"title": "Card List"}}
                ]}
            ]},
            {"path": "/login", "name": "Login", "meta": {"title": "Login", "hide": true}}
        ]"#,
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let mut app = AppStore::load(open_storage(&dir), Arc::new(RootStyle::new()));
    app.init_menu_items(&routes);

    let titles: Vec<_> = app.menu_items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Dashboard", "Base List", "Card List"]);

    let found = app.search_menu_items("LIST");
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].name, "ListCard");
}
