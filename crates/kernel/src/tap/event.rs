//! Typed payloads passed to menu taps.

use crate::menu::{GroupedMenu, Menu};
use crate::theme::ThemeEngine;

/// Which side of template rendering a tap runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Before,
    After,
}

impl RenderPhase {
    fn suffix(self) -> &'static str {
        match self {
            RenderPhase::Before => "before_render",
            RenderPhase::After => "after_render",
        }
    }
}

/// Build the tap name for a menu render phase, e.g. `menu_user_cp_before_render`.
pub fn menu_tap_name(menu_name: &str, phase: RenderPhase) -> String {
    format!("menu_{menu_name}_{}", phase.suffix())
}

/// Mutable access to the menu being rendered.
#[derive(Debug)]
pub enum MenuMut<'a> {
    Standard(&'a mut Menu),
    Grouped(&'a mut GroupedMenu),
}

/// Shared access to the menu that was rendered.
#[derive(Debug, Clone, Copy)]
pub enum MenuRef<'a> {
    Standard(&'a Menu),
    Grouped(&'a GroupedMenu),
}

impl MenuMut<'_> {
    /// Name of the menu.
    pub fn name(&self) -> &str {
        match self {
            MenuMut::Standard(menu) => menu.name(),
            MenuMut::Grouped(menu) => menu.name(),
        }
    }
}

impl MenuRef<'_> {
    /// Name of the menu.
    pub fn name(&self) -> &str {
        match self {
            MenuRef::Standard(menu) => menu.name(),
            MenuRef::Grouped(menu) => menu.name(),
        }
    }
}

/// Arguments handed to a menu tap.
///
/// Before-render handlers may rewrite the menu and seed the template context.
/// After-render handlers may rewrite the produced markup.
pub enum MenuTapEvent<'a> {
    BeforeRender {
        theme: &'a ThemeEngine,
        menu: MenuMut<'a>,
        context: &'a mut tera::Context,
    },
    AfterRender {
        theme: &'a ThemeEngine,
        menu: MenuRef<'a>,
        output: &'a mut String,
    },
}

impl MenuTapEvent<'_> {
    /// The render phase this event belongs to.
    pub fn phase(&self) -> RenderPhase {
        match self {
            MenuTapEvent::BeforeRender { .. } => RenderPhase::Before,
            MenuTapEvent::AfterRender { .. } => RenderPhase::After,
        }
    }

    /// Name of the menu being rendered.
    pub fn menu_name(&self) -> &str {
        match self {
            MenuTapEvent::BeforeRender { menu, .. } => menu.name(),
            MenuTapEvent::AfterRender { menu, .. } => menu.name(),
        }
    }

    /// Theme engine doing the rendering.
    pub fn theme(&self) -> &ThemeEngine {
        match self {
            MenuTapEvent::BeforeRender { theme, .. } | MenuTapEvent::AfterRender { theme, .. } => {
                *theme
            }
        }
    }
}

impl std::fmt::Debug for MenuTapEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuTapEvent")
            .field("phase", &self.phase())
            .field("menu", &self.menu_name())
            .finish()
    }
}
