//! Tap system for menu extension points.
//!
//! Taps are named extension points that plugins can implement. When a tap is invoked,
//! every handler registered for it is called in weight order (lower = higher priority).
//! Menus fire two taps per render: `menu_{name}_before_render` and
//! `menu_{name}_after_render`.

mod dispatcher;
mod event;
mod registry;

pub use dispatcher::TapDispatcher;
pub use event::{MenuMut, MenuRef, MenuTapEvent, RenderPhase, menu_tap_name};
pub use registry::{TapFn, TapHandler, TapRegistry};
