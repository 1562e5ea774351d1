//! A standard menu whose items are kept in a specific order.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::item::{Attributes, ItemView, MenuItem};
use super::{AnyMenu, MenuError};
use crate::tap::{MenuMut, MenuRef, MenuTapEvent, RenderPhase, TapDispatcher, menu_tap_name};
use crate::theme::ThemeEngine;

/// Ordered single-level menu.
///
/// Items are keyed by name. Iteration is sorted by ascending order; items
/// sharing an order keep their insertion order.
#[derive(Debug, Clone)]
pub struct Menu {
    name: String,
    template_name: String,
    items: IndexMap<String, MenuItem>,
}

impl Menu {
    /// Create an empty menu. The name also names the menu's taps.
    pub fn new(name: impl Into<String>, template_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_name: template_name.into(),
            items: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn set_template_name(&mut self, template_name: impl Into<String>) {
        self.template_name = template_name.into();
    }

    /// Get the highest position of items in the menu, or -1 if it is empty.
    pub fn highest_position(&self) -> i64 {
        self.items
            .values()
            .map(MenuItem::order)
            .max()
            .unwrap_or(-1)
    }

    /// Add an item, appending after the highest position when no order is given.
    ///
    /// An existing item with the same name is replaced entirely.
    pub fn add_item(&mut self, name: impl Into<String>, order: Option<i64>, attributes: Attributes) {
        let name = name.into();
        let order = order.unwrap_or_else(|| self.highest_position() + 1);
        self.items
            .insert(name.clone(), MenuItem::new(name, order, attributes));
    }

    /// Add an item carrying a nested menu.
    pub fn add_submenu(
        &mut self,
        name: impl Into<String>,
        order: Option<i64>,
        attributes: Attributes,
        child: impl Into<AnyMenu>,
    ) {
        let name = name.into();
        self.add_item(name.clone(), order, attributes);
        if let Some(item) = self.items.get_mut(&name) {
            item.children = Some(child.into());
        }
    }

    /// Check if the menu contains an item with the given name.
    pub fn contains_item(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Remove an item. Returns whether it was present.
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.items.shift_remove(name).is_some()
    }

    /// Get an item by name.
    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        self.items.get(name)
    }

    /// Get an item by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut MenuItem> {
        self.items.get_mut(name)
    }

    /// The underlying name-keyed map, in insertion order.
    pub fn raw_items(&self) -> &IndexMap<String, MenuItem> {
        &self.items
    }

    /// Mutable access to the underlying map, for taps that reshape the menu.
    pub fn raw_items_mut(&mut self) -> &mut IndexMap<String, MenuItem> {
        &mut self.items
    }

    /// Items sorted by order, stable on ties.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.sorted_items().into_iter()
    }

    fn sorted_items(&self) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self.items.values().collect();
        items.sort_by_key(|item| item.order());
        items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the menu.
    ///
    /// Fires `menu_{name}_before_render` (which may change the menu and seed
    /// the template context), renders child menus, renders the template with
    /// the menu bound as `menu`, then fires `menu_{name}_after_render`, which
    /// may rewrite the output.
    pub fn render(&mut self, theme: &ThemeEngine, taps: &TapDispatcher) -> Result<String, MenuError> {
        let mut context = tera::Context::new();

        taps.dispatch(
            &menu_tap_name(&self.name, RenderPhase::Before),
            &mut MenuTapEvent::BeforeRender {
                theme,
                menu: MenuMut::Standard(self),
                context: &mut context,
            },
        );

        // Children first, each firing its own taps
        let mut children_html = HashMap::new();
        for (name, item) in self.items.iter_mut() {
            if let Some(child) = item.children.as_mut() {
                children_html.insert(name.clone(), child.render(theme, taps)?);
            }
        }

        if !context.contains_key("menu") {
            context.insert("menu", &self.view(Some(&children_html)));
        }

        debug!(menu = %self.name, template = %self.template_name, items = self.items.len(), "rendering menu");

        let mut output = theme
            .render(&self.template_name, &context)
            .map_err(|e| MenuError::template(&self.name, &self.template_name, e))?;

        taps.dispatch(
            &menu_tap_name(&self.name, RenderPhase::After),
            &mut MenuTapEvent::AfterRender {
                theme,
                menu: MenuRef::Standard(self),
                output: &mut output,
            },
        );

        Ok(output)
    }

    fn view<'a>(&'a self, children_html: Option<&'a HashMap<String, String>>) -> MenuView<'a> {
        MenuView {
            name: &self.name,
            template_name: &self.template_name,
            items: self
                .sorted_items()
                .into_iter()
                .map(|item| {
                    let html = children_html
                        .and_then(|rendered| rendered.get(item.name()))
                        .map(|s| s.as_str());
                    item.view(html)
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct MenuView<'a> {
    name: &'a str,
    template_name: &'a str,
    items: Vec<ItemView<'a>>,
}

impl Serialize for Menu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view(None).serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Menu {
    type Item = &'a MenuItem;
    type IntoIter = std::vec::IntoIter<&'a MenuItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_items().into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::into_attributes;
    use serde_json::json;

    fn names(menu: &Menu) -> Vec<&str> {
        menu.iter().map(MenuItem::name).collect()
    }

    #[test]
    fn add_item_assigns_next_position() {
        let mut menu = Menu::new("test", "");

        menu.add_item("item_1", None, Attributes::new());
        assert!(menu.contains_item("item_1"));
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.highest_position(), 0);

        menu.add_item("item_2", Some(10), Attributes::new());
        menu.add_item("item_3", None, Attributes::new());
        assert_eq!(menu.get("item_3").unwrap().order(), 11);
    }

    #[test]
    fn remove_item() {
        let mut menu = Menu::new("test", "");
        menu.add_item("item_1", None, Attributes::new());

        assert!(!menu.remove_item("missing"));
        assert_eq!(menu.len(), 1);

        assert!(menu.remove_item("item_1"));
        assert_eq!(menu.len(), 0);
        assert_eq!(menu.highest_position(), -1);
    }

    #[test]
    fn iteration_is_sorted_by_order() {
        let mut menu = Menu::new("test", "");
        menu.add_item("item_1", Some(2), Attributes::new());
        menu.add_item("item_2", Some(0), Attributes::new());
        menu.add_item("item_3", Some(1), Attributes::new());

        assert_eq!(names(&menu), vec!["item_2", "item_3", "item_1"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut menu = Menu::new("test", "");
        menu.add_item("b", Some(1), Attributes::new());
        menu.add_item("a", Some(1), Attributes::new());
        menu.add_item("first", Some(0), Attributes::new());

        assert_eq!(names(&menu), vec!["first", "b", "a"]);
    }

    #[test]
    fn re_adding_replaces_attributes() {
        let mut menu = Menu::new("test", "");
        menu.add_item(
            "compose",
            Some(0),
            into_attributes(json!({ "link": "a", "language": "x" })),
        );
        menu.add_item("compose", Some(5), into_attributes(json!({ "link": "b" })));

        let item = menu.get("compose").unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(item.order(), 5);
        assert_eq!(item.attribute("link"), Some(&json!("b")));
        assert!(item.attribute("language").is_none());
    }

    #[test]
    fn serializes_items_in_order() {
        let mut menu = Menu::new("nav", "nav.html");
        menu.add_item("later", Some(3), Attributes::new());
        menu.add_item("sooner", Some(1), into_attributes(json!({ "link": "/" })));

        let value = serde_json::to_value(&menu).unwrap();
        assert_eq!(value["name"], "nav");
        assert_eq!(value["items"][0]["name"], "sooner");
        assert_eq!(value["items"][0]["link"], "/");
        assert_eq!(value["items"][1]["name"], "later");
    }

    #[test]
    fn render_binds_menu_into_template() {
        let mut theme = ThemeEngine::empty();
        theme
            .add_raw_template(
                "nav.html",
                "{% for item in menu.items %}[{{ item.name }}:{{ item.order }}]{% endfor %}",
            )
            .unwrap();

        let mut menu = Menu::new("nav", "nav.html");
        menu.add_item("b", Some(2), Attributes::new());
        menu.add_item("a", Some(1), Attributes::new());

        let html = menu.render(&theme, &TapDispatcher::empty()).unwrap();
        assert_eq!(html, "[a:1][b:2]");
    }

    #[test]
    fn render_missing_template_fails() {
        let theme = ThemeEngine::empty();
        let mut menu = Menu::new("nav", "missing.html");

        let err = menu.render(&theme, &TapDispatcher::empty()).unwrap_err();
        assert!(matches!(err, MenuError::Template { .. }));
    }
}
