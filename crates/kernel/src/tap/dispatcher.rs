//! Tap dispatcher - invokes menu taps in weight order.

use std::sync::Arc;

use tracing::{debug, trace};

use super::{MenuTapEvent, TapRegistry};

/// Dispatcher for invoking taps across plugins.
#[derive(Debug, Clone, Default)]
pub struct TapDispatcher {
    registry: Arc<TapRegistry>,
}

impl TapDispatcher {
    /// Create a new tap dispatcher.
    pub fn new(registry: Arc<TapRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatcher with no handlers (every dispatch is a no-op).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the tap registry for handler introspection.
    pub fn registry(&self) -> &TapRegistry {
        &self.registry
    }

    /// Dispatch a tap to every handler, in weight order.
    ///
    /// Handlers see each other's changes to the event. Returns the number
    /// of handlers invoked.
    pub fn dispatch(&self, tap_name: &str, event: &mut MenuTapEvent<'_>) -> usize {
        let handlers = self.registry.get_handlers(tap_name);
        if handlers.is_empty() {
            trace!(tap = %tap_name, "no handlers registered for tap");
            return 0;
        }

        for handler in handlers {
            handler.call(event);
        }

        debug!(
            tap = %tap_name,
            handlers = handlers.len(),
            "dispatch complete"
        );

        handlers.len()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::Menu;
    use crate::tap::MenuRef;
    use crate::theme::ThemeEngine;

    #[test]
    fn dispatch_empty_tap() {
        let dispatcher = TapDispatcher::empty();
        let theme = ThemeEngine::empty();
        let menu = Menu::new("nav", "nav.html");
        let mut output = String::from("<ul></ul>");

        let called = dispatcher.dispatch(
            "menu_nav_after_render",
            &mut MenuTapEvent::AfterRender {
                theme: &theme,
                menu: MenuRef::Standard(&menu),
                output: &mut output,
            },
        );

        assert_eq!(called, 0);
        assert_eq!(output, "<ul></ul>");
    }

    #[test]
    fn handlers_chain_in_weight_order() {
        let mut registry = TapRegistry::new();
        registry.register("menu_nav_after_render", "second", 5, |event| {
            if let MenuTapEvent::AfterRender { output, .. } = event {
                output.push_str("[second]");
            }
        });
        registry.register("menu_nav_after_render", "first", 1, |event| {
            if let MenuTapEvent::AfterRender { output, .. } = event {
                output.push_str("[first]");
            }
        });
        let dispatcher = TapDispatcher::new(Arc::new(registry));

        let theme = ThemeEngine::empty();
        let menu = Menu::new("nav", "nav.html");
        let mut output = String::new();

        let called = dispatcher.dispatch(
            "menu_nav_after_render",
            &mut MenuTapEvent::AfterRender {
                theme: &theme,
                menu: MenuRef::Standard(&menu),
                output: &mut output,
            },
        );

        assert_eq!(called, 2);
        assert_eq!(output, "[first][second]");
    }

    #[test]
    fn registry_accessor_returns_same_registry() {
        let mut registry = TapRegistry::new();
        registry.register("menu_nav_before_render", "p", 0, |_| {});
        let registry = Arc::new(registry);
        let dispatcher = TapDispatcher::new(Arc::clone(&registry));

        assert_eq!(dispatcher.registry().tap_count(), registry.tap_count());
        assert_eq!(
            dispatcher.registry().handler_count("menu_nav_before_render"),
            1
        );
    }
}
