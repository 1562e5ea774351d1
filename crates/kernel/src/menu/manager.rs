//! Registry of menu builders keyed by menu name.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{BuilderCatalog, BuilderRegistration, MenuBuilder, MenuError};
use crate::services::Services;

/// Holds the builder registered for each menu.
///
/// Deferred builders are created from [`Services`] the first time they are
/// looked up and cached afterwards, so each factory runs at most once.
#[derive(Debug)]
pub struct MenuManager {
    services: Services,
    builders: IndexMap<String, BuilderRegistration>,
}

impl MenuManager {
    /// Create an empty manager resolving deferred builders from `services`.
    pub fn new(services: Services) -> Self {
        Self {
            services,
            builders: IndexMap::new(),
        }
    }

    /// Services handed to deferred factories.
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Register (or replace) the builder for a menu.
    pub fn add_menu_builder(
        &mut self,
        name: impl Into<String>,
        registration: BuilderRegistration,
    ) -> Result<&mut Self, MenuError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MenuError::invalid_argument(
                "menu builder must be registered under a non-empty menu name",
            ));
        }

        if self.builders.contains_key(&name) {
            debug!(menu = %name, "replacing menu builder");
        }
        debug!(menu = %name, resolved = registration.is_resolved(), "registered menu builder");

        self.builders.insert(name, registration);
        Ok(self)
    }

    /// Register a menu builder by catalog kind, e.g. from configuration.
    pub fn add_menu_builder_from_catalog(
        &mut self,
        name: impl Into<String>,
        kind: &str,
        catalog: &BuilderCatalog,
    ) -> Result<&mut Self, MenuError> {
        let name = name.into();
        let Some(registration) = catalog.registration(kind) else {
            warn!(menu = %name, kind = %kind, "unknown menu builder kind");
            return Err(MenuError::invalid_argument(format!(
                "menu builder for '{name}' must be a known builder kind, got '{kind}'"
            )));
        };
        self.add_menu_builder(name, registration)
    }

    /// Check whether a builder is registered for a menu.
    pub fn does_menu_builder_exist(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Get the builder for a menu, running its factory on first access.
    ///
    /// Returns `Ok(None)` if no builder is registered.
    pub fn get_menu_builder(&mut self, name: &str) -> Result<Option<&dyn MenuBuilder>, MenuError> {
        let Some(registration) = self.builders.get_mut(name) else {
            return Ok(None);
        };

        match registration {
            BuilderRegistration::Resolved(builder) => Ok(Some(&**builder)),
            BuilderRegistration::Deferred { factory, resolved } => {
                if resolved.is_none() {
                    debug!(menu = %name, "resolving deferred menu builder");
                    let builder = (**factory)(&self.services)
                        .map_err(|e| MenuError::logic(name, format!("{e:#}")))?;
                    *resolved = Some(builder);
                }
                Ok(resolved.as_deref())
            }
        }
    }

    /// All registrations in registration order.
    pub fn get_menu_builders(&self) -> &IndexMap<String, BuilderRegistration> {
        &self.builders
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::{AnyMenu, Menu};

    fn nav() -> Result<AnyMenu, MenuError> {
        Ok(Menu::new("nav", "nav.html").into())
    }

    #[test]
    fn unknown_menu_is_not_an_error() {
        let mut manager = MenuManager::new(Services::new());
        assert!(!manager.does_menu_builder_exist("nav"));
        assert!(manager.get_menu_builder("nav").unwrap().is_none());
    }

    #[test]
    fn resolved_builder_is_returned() {
        let mut manager = MenuManager::new(Services::new());
        manager
            .add_menu_builder("nav", BuilderRegistration::resolved(nav))
            .unwrap();

        let builder = manager.get_menu_builder("nav").unwrap().unwrap();
        assert_eq!(builder.build_menu().unwrap().name(), "nav");
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut manager = MenuManager::new(Services::new());
        let err = manager
            .add_menu_builder("", BuilderRegistration::resolved(nav))
            .unwrap_err();
        assert!(matches!(err, MenuError::InvalidArgument { .. }));
    }

    #[test]
    fn unknown_catalog_kind_is_rejected() {
        let mut manager = MenuManager::new(Services::new());
        let err = manager
            .add_menu_builder_from_catalog("nav", "sidebar", &BuilderCatalog::new())
            .unwrap_err();
        assert!(err.to_string().contains("'sidebar'"));
        assert!(!manager.does_menu_builder_exist("nav"));
    }

    #[test]
    fn failing_factory_is_a_logic_error() {
        let mut manager = MenuManager::new(Services::new());
        manager
            .add_menu_builder(
                "nav",
                BuilderRegistration::deferred(|_| anyhow::bail!("no database")),
            )
            .unwrap();

        let err = manager.get_menu_builder("nav").err().unwrap();
        assert!(matches!(err, MenuError::Logic { .. }));
        assert!(err.to_string().contains("no database"));
        assert!(!manager.get_menu_builders()["nav"].is_resolved());
    }

    #[test]
    fn registration_order_is_kept() {
        let mut manager = MenuManager::new(Services::new());
        manager
            .add_menu_builder("b", BuilderRegistration::resolved(nav))
            .unwrap()
            .add_menu_builder("a", BuilderRegistration::resolved(nav))
            .unwrap();

        let names: Vec<&str> = manager.get_menu_builders().keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
