//! Menu builders and how they are registered.

use std::collections::HashMap;
use std::sync::Arc;

use super::{AnyMenu, MenuError};
use crate::services::Services;

/// Produces a menu on demand.
pub trait MenuBuilder: Send + Sync {
    /// Build the menu. Builders may memoise the result.
    fn build_menu(&self) -> Result<AnyMenu, MenuError>;
}

impl<F> MenuBuilder for F
where
    F: Fn() -> Result<AnyMenu, MenuError> + Send + Sync,
{
    fn build_menu(&self) -> Result<AnyMenu, MenuError> {
        self()
    }
}

/// Creates a builder from shared services the first time it is needed.
pub type BuilderFactory =
    Arc<dyn Fn(&Services) -> anyhow::Result<Box<dyn MenuBuilder>> + Send + Sync>;

/// How a menu builder was registered.
pub enum BuilderRegistration {
    /// A ready builder.
    Resolved(Box<dyn MenuBuilder>),
    /// A factory that has not necessarily run yet. Once it has, the builder
    /// is cached in `resolved`.
    Deferred {
        factory: BuilderFactory,
        resolved: Option<Box<dyn MenuBuilder>>,
    },
}

impl BuilderRegistration {
    /// Register a ready builder.
    pub fn resolved(builder: impl MenuBuilder + 'static) -> Self {
        Self::Resolved(Box::new(builder))
    }

    /// Register a factory to run on first lookup.
    pub fn deferred<F>(factory: F) -> Self
    where
        F: Fn(&Services) -> anyhow::Result<Box<dyn MenuBuilder>> + Send + Sync + 'static,
    {
        Self::Deferred {
            factory: Arc::new(factory),
            resolved: None,
        }
    }

    /// Whether a builder is available without running a factory.
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Resolved(_) => true,
            Self::Deferred { resolved, .. } => resolved.is_some(),
        }
    }
}

impl std::fmt::Debug for BuilderRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(_) => f.write_str("Resolved"),
            Self::Deferred { resolved, .. } => f
                .debug_struct("Deferred")
                .field("resolved", &resolved.is_some())
                .finish(),
        }
    }
}

/// Named builder factories, so registrations can come from configuration.
#[derive(Clone, Default)]
pub struct BuilderCatalog {
    factories: HashMap<String, BuilderFactory>,
}

impl BuilderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory under a kind name.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Services) -> anyhow::Result<Box<dyn MenuBuilder>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    /// A deferred registration for `kind`, if the catalog knows it.
    pub fn registration(&self, kind: &str) -> Option<BuilderRegistration> {
        self.factories
            .get(kind)
            .map(|factory| BuilderRegistration::Deferred {
                factory: Arc::clone(factory),
                resolved: None,
            })
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Known kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl std::fmt::Debug for BuilderCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderCatalog")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::Menu;

    fn boxed(name: &'static str) -> Box<dyn MenuBuilder> {
        Box::new(move || -> Result<AnyMenu, MenuError> { Ok(Menu::new(name, "").into()) })
    }

    #[test]
    fn closures_are_builders() {
        let builder = || -> Result<AnyMenu, MenuError> { Ok(Menu::new("nav", "nav.html").into()) };
        let menu = builder.build_menu().unwrap();
        assert_eq!(menu.name(), "nav");
    }

    #[test]
    fn registration_state() {
        let resolved = BuilderRegistration::Resolved(boxed("a"));
        assert!(resolved.is_resolved());
        assert_eq!(format!("{resolved:?}"), "Resolved");

        let deferred = BuilderRegistration::deferred(|_| Ok(boxed("b")));
        assert!(!deferred.is_resolved());
        assert_eq!(format!("{deferred:?}"), "Deferred { resolved: false }");
    }

    #[test]
    fn catalog_lookup() {
        let mut catalog = BuilderCatalog::new();
        catalog.register("nav", |_| Ok(boxed("nav")));

        assert!(catalog.contains("nav"));
        assert_eq!(catalog.kinds(), vec!["nav"]);
        assert!(catalog.registration("nav").is_some());
        assert!(catalog.registration("unknown").is_none());
    }
}
