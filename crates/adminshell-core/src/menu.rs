//! Menu indexer: flattens the route tree into a searchable list of leaf
//! menu entries.
//!
//! Only leaves are indexed. A route with children is a submenu, so it is
//! walked but never emitted. Hidden routes and the `Layout` root are
//! transparent: their children are walked as if they sat one level up.

use serde::{Deserialize, Serialize};

/// Route name of the structural layout root
pub const LAYOUT_ROUTE_NAME: &str = "Layout";

/// Icon used for menu items whose route declares none
pub const DEFAULT_MENU_ICON: &str = "default";

/// Display metadata attached to a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Hidden routes are never shown in the menu
    #[serde(default)]
    pub hide: bool,
}

/// One node of the route/menu tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RouteMeta>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(RouteMeta::default).title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(RouteMeta::default).icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.get_or_insert_with(RouteMeta::default).hide = true;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    fn is_hidden(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.hide)
    }

    fn is_layout_root(&self) -> bool {
        self.name == LAYOUT_ROUTE_NAME
    }

    /// Title, treating an empty string as absent.
    fn title(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.title.as_deref())
            .filter(|title| !title.is_empty())
    }

    fn icon(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|meta| meta.icon.as_deref())
            .filter(|icon| !icon.is_empty())
            .unwrap_or(DEFAULT_MENU_ICON)
    }
}

/// A flat, searchable menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub icon: String,
    pub path: String,
    pub name: String,
}

/// Walk `nodes` depth-first in sibling order, appending leaf menu items to
/// `items`.
///
/// `parent_path` is the path of the nearest emitted-level ancestor; hidden
/// and layout nodes pass their own `parent_path` through unchanged.
pub fn extract_menu_items(nodes: &[RouteNode], parent_path: &str, items: &mut Vec<MenuItem>) {
    for node in nodes {
        if node.is_hidden() || node.is_layout_root() {
            extract_menu_items(&node.children, parent_path, items);
            continue;
        }

        if !node.children.is_empty() {
            extract_menu_items(&node.children, &node.path, items);
            continue;
        }

        match node.title() {
            Some(title) => {
                tracing::trace!(parent = parent_path, path = %node.path, "Indexed menu item");
                items.push(MenuItem {
                    title: title.to_string(),
                    icon: node.icon().to_string(),
                    path: node.path.clone(),
                    name: node.name.clone(),
                });
            }
            None => {
                tracing::trace!(parent = parent_path, path = %node.path, "Skipped untitled route");
            }
        }
    }
}

/// Index a whole route table from the root.
pub fn index_menu_items(routes: &[RouteNode]) -> Vec<MenuItem> {
    let mut items = Vec::new();
    extract_menu_items(routes, "", &mut items);
    tracing::debug!(count = items.len(), "Built menu index");
    items
}

/// Case-insensitive title search.
///
/// A blank keyword matches nothing rather than everything.
pub fn search_menu_items(items: &[MenuItem], keyword: &str) -> Vec<MenuItem> {
    if keyword.trim().is_empty() {
        return Vec::new();
    }

    let keyword = keyword.to_lowercase();
    items
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}
