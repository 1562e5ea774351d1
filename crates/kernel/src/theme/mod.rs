//! Theme engine and template rendering.
//!
//! Provides the Tera-based template engine menus render through.

mod engine;

pub use engine::ThemeEngine;
