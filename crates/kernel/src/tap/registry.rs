//! Tap registry - indexes which handlers implement which taps.
//!
//! The registry maps tap names to an ordered list of handlers.
//! Handlers are sorted by weight (lower = higher priority, called first);
//! equal weights keep registration order.

use std::collections::HashMap;

use super::MenuTapEvent;

/// Callback invoked for a tap.
pub type TapFn = Box<dyn Fn(&mut MenuTapEvent<'_>) + Send + Sync>;

/// A registered tap handler with owner and priority.
pub struct TapHandler {
    /// The plugin that registered this handler.
    pub plugin: String,
    /// Weight for ordering (lower = higher priority).
    pub weight: i32,
    handler: TapFn,
}

impl TapHandler {
    /// Invoke the handler.
    pub fn call(&self, event: &mut MenuTapEvent<'_>) {
        (self.handler)(event);
    }
}

impl std::fmt::Debug for TapHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapHandler")
            .field("plugin", &self.plugin)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Registry mapping tap names to ordered handlers.
///
/// Multiple plugins can implement the same tap.
#[derive(Debug, Default)]
pub struct TapRegistry {
    /// Map from tap name to ordered list of handlers.
    handlers: HashMap<String, Vec<TapHandler>>,
}

impl TapRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a tap.
    pub fn register<F>(
        &mut self,
        tap_name: impl Into<String>,
        plugin: impl Into<String>,
        weight: i32,
        handler: F,
    ) where
        F: Fn(&mut MenuTapEvent<'_>) + Send + Sync + 'static,
    {
        let list = self.handlers.entry(tap_name.into()).or_default();
        list.push(TapHandler {
            plugin: plugin.into(),
            weight,
            handler: Box::new(handler),
        });
        list.sort_by_key(|h| h.weight);
    }

    /// Get handlers for a tap, in weight order.
    ///
    /// Returns an empty slice if nothing implements the tap.
    pub fn get_handlers(&self, tap_name: &str) -> &[TapHandler] {
        self.handlers
            .get(tap_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Check if any handler implements a tap.
    pub fn has_tap(&self, tap_name: &str) -> bool {
        self.handlers
            .get(tap_name)
            .is_some_and(|handlers| !handlers.is_empty())
    }

    /// Get all registered tap names.
    pub fn tap_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|s| s.as_str())
    }

    /// Get the count of handlers for a tap.
    pub fn handler_count(&self, tap_name: &str) -> usize {
        self.handlers.get(tap_name).map(|v| v.len()).unwrap_or(0)
    }

    /// Get total number of registered taps.
    pub fn tap_count(&self) -> usize {
        self.handlers.len()
    }
}
