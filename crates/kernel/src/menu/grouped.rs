//! A menu that is split into groups.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::MenuError;
use super::item::Attributes;
use crate::tap::{MenuMut, MenuRef, MenuTapEvent, RenderPhase, TapDispatcher, menu_tap_name};
use crate::theme::ThemeEngine;

/// Template used when none is given.
pub const DEFAULT_GROUPED_TEMPLATE: &str = "menu/grouped.html";

/// A group of child items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Extra attributes for the group (title, icon, ...).
    pub attributes: Attributes,
    /// Child items keyed by item key, in insertion order.
    pub children: IndexMap<String, Attributes>,
}

impl Group {
    /// Create an empty group with the given attributes.
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            children: IndexMap::new(),
        }
    }
}

/// Two-level menu: groups containing child items.
///
/// Groups and their children iterate in insertion order.
#[derive(Debug, Clone)]
pub struct GroupedMenu {
    name: String,
    template_name: String,
    groups: IndexMap<String, Group>,
}

impl GroupedMenu {
    /// Create an empty grouped menu using [`DEFAULT_GROUPED_TEMPLATE`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_template(name, DEFAULT_GROUPED_TEMPLATE)
    }

    /// Create an empty grouped menu rendered with a specific template.
    pub fn with_template(name: impl Into<String>, template_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_name: template_name.into(),
            groups: IndexMap::new(),
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

    /// Add a group, or merge the attributes into an existing one.
    ///
    /// Merging is shallow: new values replace old ones key by key, and the
    /// group's children are kept.
    pub fn add_group(&mut self, key: impl Into<String>, attributes: Attributes) -> &mut Self {
        let group = self.groups.entry(key.into()).or_default();
        group.attributes.extend(attributes);
        self
    }

    /// Remove a group if it exists.
    pub fn remove_group(&mut self, key: &str) -> &mut Self {
        self.groups.shift_remove(key);
        self
    }

    /// Check whether a group exists.
    pub fn contains_group(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Add an item to a group, creating the group if needed.
    ///
    /// An existing item has the new attributes merged into it.
    pub fn add_item_to_group(
        &mut self,
        group: impl Into<String>,
        key: impl Into<String>,
        attributes: Attributes,
    ) -> &mut Self {
        let group = self.groups.entry(group.into()).or_default();
        group
            .children
            .entry(key.into())
            .or_default()
            .extend(attributes);
        self
    }

    /// Remove an item from a group. The group itself stays.
    pub fn remove_item_from_group(&mut self, group: &str, key: &str) -> &mut Self {
        if let Some(group) = self.groups.get_mut(group) {
            group.children.shift_remove(key);
        }
        self
    }

    /// Check whether an item exists within a group.
    pub fn group_contains_item(&self, group: &str, key: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|group| group.children.contains_key(key))
    }

    /// Get a group; a missing key yields `None`.
    pub fn get(&self, key: &str) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Get a group for modification.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Group> {
        self.groups.get_mut(key)
    }

    /// Store a group under `key`, replacing any existing group in place.
    pub fn set(&mut self, key: impl Into<String>, group: Group) {
        self.groups.insert(key.into(), group);
    }

    /// Delete a group, returning it if it existed.
    pub fn delete(&mut self, key: &str) -> Option<Group> {
        self.groups.shift_remove(key)
    }

    /// Groups in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(key, group)| (key.as_str(), group))
    }

    /// Number of top-level groups.
    pub fn size(&self) -> usize {
        self.groups.len()
    }

    /// Check if the menu has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render the menu, firing the same before/after taps as [`Menu`](super::Menu).
    pub fn render(&mut self, theme: &ThemeEngine, taps: &TapDispatcher) -> Result<String, MenuError> {
        let mut context = tera::Context::new();

        taps.dispatch(
            &menu_tap_name(&self.name, RenderPhase::Before),
            &mut MenuTapEvent::BeforeRender {
                theme,
                menu: MenuMut::Grouped(self),
                context: &mut context,
            },
        );

        if !context.contains_key("menu") {
            context.insert("menu", &*self);
        }

        debug!(menu = %self.name, template = %self.template_name, groups = self.groups.len(), "rendering grouped menu");

        let mut output = theme
            .render(&self.template_name, &context)
            .map_err(|e| MenuError::template(&self.name, &self.template_name, e))?;

        taps.dispatch(
            &menu_tap_name(&self.name, RenderPhase::After),
            &mut MenuTapEvent::AfterRender {
                theme,
                menu: MenuRef::Grouped(self),
                output: &mut output,
            },
        );

        Ok(output)
    }
}

#[derive(Serialize)]
struct GroupedMenuView<'a> {
    name: &'a str,
    template_name: &'a str,
    groups: Vec<GroupView<'a>>,
}

#[derive(Serialize)]
struct GroupView<'a> {
    #[serde(flatten)]
    attributes: &'a Attributes,
    key: &'a str,
    children: Vec<ChildView<'a>>,
}

#[derive(Serialize)]
struct ChildView<'a> {
    #[serde(flatten)]
    attributes: &'a Attributes,
    key: &'a str,
}

impl Serialize for GroupedMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GroupedMenuView {
            name: &self.name,
            template_name: &self.template_name,
            groups: self
                .groups
                .iter()
                .map(|(key, group)| GroupView {
                    attributes: &group.attributes,
                    key,
                    children: group
                        .children
                        .iter()
                        .map(|(key, attributes)| ChildView { attributes, key })
                        .collect(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}
