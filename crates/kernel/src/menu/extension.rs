//! Rendering bridge between templates and menus.

use serde_json::Value;
use tracing::debug;

use super::{AnyMenu, GroupedMenu, Menu, MenuError, MenuManager};
use crate::tap::TapDispatcher;
use crate::theme::ThemeEngine;

/// What to render: a registered menu by name, or a menu instance.
#[derive(Debug, Clone)]
pub enum MenuTarget {
    Name(String),
    Menu(AnyMenu),
}

impl From<&str> for MenuTarget {
    fn from(name: &str) -> Self {
        MenuTarget::Name(name.to_string())
    }
}

impl From<String> for MenuTarget {
    fn from(name: String) -> Self {
        MenuTarget::Name(name)
    }
}

impl From<AnyMenu> for MenuTarget {
    fn from(menu: AnyMenu) -> Self {
        MenuTarget::Menu(menu)
    }
}

impl From<Menu> for MenuTarget {
    fn from(menu: Menu) -> Self {
        MenuTarget::Menu(menu.into())
    }
}

impl From<GroupedMenu> for MenuTarget {
    fn from(menu: GroupedMenu) -> Self {
        MenuTarget::Menu(menu.into())
    }
}

/// Template values can only name menus.
impl TryFrom<Value> for MenuTarget {
    type Error = MenuError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(MenuTarget::Name(name)),
            other => Err(MenuError::invalid_argument(format!(
                "menu must be a menu name or a menu instance, got {}",
                json_type(&other)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders menus for templates.
#[derive(Debug)]
pub struct MenuExtension {
    manager: MenuManager,
}

impl MenuExtension {
    pub fn new(manager: MenuManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &MenuManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut MenuManager {
        &mut self.manager
    }

    /// Render a menu.
    ///
    /// A name is looked up in the manager; `Ok(None)` means no builder is
    /// registered under it. An instance is rendered as is.
    pub fn render_menu(
        &mut self,
        theme: &ThemeEngine,
        taps: &TapDispatcher,
        target: impl Into<MenuTarget>,
    ) -> Result<Option<String>, MenuError> {
        let mut menu = match target.into() {
            MenuTarget::Menu(menu) => menu,
            MenuTarget::Name(name) => {
                let Some(builder) = self.manager.get_menu_builder(&name)? else {
                    debug!(menu = %name, "no builder registered for menu");
                    return Ok(None);
                };
                builder.build_menu()?
            }
        };

        menu.render(theme, taps).map(Some)
    }
}
