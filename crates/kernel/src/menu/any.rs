use serde::Serialize;

use super::{GroupedMenu, Menu, MenuError};
use crate::tap::TapDispatcher;
use crate::theme::ThemeEngine;

/// Either kind of menu a builder can produce.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnyMenu {
    Standard(Menu),
    Grouped(GroupedMenu),
}

impl AnyMenu {
    pub fn name(&self) -> &str {
        match self {
            AnyMenu::Standard(menu) => menu.name(),
            AnyMenu::Grouped(menu) => menu.name(),
        }
    }

    pub fn template_name(&self) -> &str {
        match self {
            AnyMenu::Standard(menu) => menu.template_name(),
            AnyMenu::Grouped(menu) => menu.template_name(),
        }
    }

    /// Render whichever menu this is.
    pub fn render(&mut self, theme: &ThemeEngine, taps: &TapDispatcher) -> Result<String, MenuError> {
        match self {
            AnyMenu::Standard(menu) => menu.render(theme, taps),
            AnyMenu::Grouped(menu) => menu.render(theme, taps),
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            AnyMenu::Standard(menu) => Some(menu),
            AnyMenu::Grouped(_) => None,
        }
    }

    pub fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match self {
            AnyMenu::Standard(menu) => Some(menu),
            AnyMenu::Grouped(_) => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&GroupedMenu> {
        match self {
            AnyMenu::Grouped(menu) => Some(menu),
            AnyMenu::Standard(_) => None,
        }
    }

    pub fn as_grouped_mut(&mut self) -> Option<&mut GroupedMenu> {
        match self {
            AnyMenu::Grouped(menu) => Some(menu),
            AnyMenu::Standard(_) => None,
        }
    }
}

impl From<Menu> for AnyMenu {
    fn from(menu: Menu) -> Self {
        AnyMenu::Standard(menu)
    }
}

impl From<GroupedMenu> for AnyMenu {
    fn from(menu: GroupedMenu) -> Self {
        AnyMenu::Grouped(menu)
    }
}
