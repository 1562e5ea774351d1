//! Menu composition.
//!
//! Menus are built on demand by builders registered with a [`MenuManager`]
//! and rendered through the theme engine, firing before/after taps so
//! plugins can adjust both the menu and its markup:
//! - [`Menu`]: ordered single-level items
//! - [`GroupedMenu`]: groups of child items in insertion order
//! - [`MenuExtension`]: renders a menu by name or instance

mod any;
pub mod builders;
mod builder;
mod error;
mod extension;
mod grouped;
mod item;
mod manager;
mod standard;

pub use any::AnyMenu;
pub use builder::{BuilderCatalog, BuilderFactory, BuilderRegistration, MenuBuilder};
pub use error::MenuError;
pub use extension::{MenuExtension, MenuTarget};
pub use grouped::{DEFAULT_GROUPED_TEMPLATE, Group, GroupedMenu};
pub use item::{Attributes, MenuItem, into_attributes};
pub use manager::MenuManager;
pub use standard::Menu;
