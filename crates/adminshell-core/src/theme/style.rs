//! Style targets: where an applied theme lands.

use parking_lot::RwLock;
use std::fmt::Write as FmtWrite;

/// The document root a theme is applied to.
///
/// Both setters overwrite any previous value and must be idempotent.
pub trait StyleTarget: Send + Sync {
    /// Set an attribute such as `theme-mode`.
    fn set_attribute(&self, name: &str, value: &str);

    /// Set a custom style property such as `--td-brand-color-3`.
    fn set_property(&self, name: &str, value: &str);
}

/// In-memory root element that can render itself as CSS.
///
/// Properties keep their first-insertion order so the rendered block lists
/// shades 1 through 10 in sequence.
#[derive(Debug, Default)]
pub struct RootStyle {
    attributes: RwLock<Vec<(String, String)>>,
    properties: RwLock<Vec<(String, String)>>,
}

impl RootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        lookup(&self.attributes.read(), name)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        lookup(&self.properties.read(), name)
    }

    /// All properties in insertion order.
    pub fn properties(&self) -> Vec<(String, String)> {
        self.properties.read().clone()
    }

    /// Render as a `:root` rule, attributes as selectors.
    ///
    /// ```text
    /// :root[theme-mode="dark"] {
    ///   --td-brand-color-1: #e5efff;
    ///   ...
    /// }
    /// ```
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root");
        for (name, value) in self.attributes.read().iter() {
            let _ = write!(css, "[{}=\"{}\"]", name, value);
        }
        css.push_str(" {\n");
        for (name, value) in self.properties.read().iter() {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl StyleTarget for RootStyle {
    fn set_attribute(&self, name: &str, value: &str) {
        upsert(&mut self.attributes.write(), name, value);
    }

    fn set_property(&self, name: &str, value: &str) {
        upsert(&mut self.properties.write(), name, value);
    }
}

fn lookup(entries: &[(String, String)], name: &str) -> Option<String> {
    entries
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn upsert(entries: &mut Vec<(String, String)>, name: &str, value: &str) {
    match entries.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => entries.push((name.to_string(), value.to_string())),
    }
}
