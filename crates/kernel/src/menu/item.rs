//! Menu items.

use serde::Serialize;
use serde_json::{Map, Value};

use super::AnyMenu;

/// Open key-value attributes attached to items and groups.
pub type Attributes = Map<String, Value>;

/// Convert a JSON value into attributes; non-objects yield no attributes.
///
/// ```ignore
/// menu.add_item("compose", Some(0), into_attributes(json!({ "link": "private.php?action=send" })));
/// ```
pub fn into_attributes(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// A named, positioned entry in a [`Menu`](super::Menu).
#[derive(Debug, Clone)]
pub struct MenuItem {
    name: String,
    order: i64,
    /// Extra attributes (link, language key, ...).
    pub attributes: Attributes,
    /// Nested menu rendered before this item's parent.
    pub children: Option<AnyMenu>,
}

impl MenuItem {
    pub(crate) fn new(name: String, order: i64, attributes: Attributes) -> Self {
        Self {
            name,
            order,
            attributes,
            children: None,
        }
    }

    /// Item name, unique within its menu.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position within the menu (lower first).
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Move the item.
    pub fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    /// Get a single attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub(crate) fn view<'a>(&'a self, children_html: Option<&'a str>) -> ItemView<'a> {
        ItemView {
            attributes: &self.attributes,
            name: &self.name,
            order: self.order,
            children: self.children.as_ref(),
            children_html,
        }
    }
}

/// Template-facing shape of an item: attributes flattened alongside
/// `name` and `order`, which win on collision.
#[derive(Serialize)]
pub(crate) struct ItemView<'a> {
    #[serde(flatten)]
    attributes: &'a Attributes,
    name: &'a str,
    order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a AnyMenu>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children_html: Option<&'a str>,
}
