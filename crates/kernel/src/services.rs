//! Typed service locator handed to deferred menu builder factories.
//!
//! Factories resolve their own collaborators (board settings, the current
//! user, language strings) from here instead of reaching for globals.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised when a service cannot be resolved.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No service of the requested type was registered.
    #[error("service '{type_name}' is not registered")]
    Missing { type_name: &'static str },
}

/// Registry of shared services keyed by their concrete type.
#[derive(Clone, Default)]
pub struct Services {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Services {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous service of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.insert_arc(Arc::new(value))
    }

    /// Register an already shared service.
    pub fn insert_arc<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        self.entries.insert(TypeId::of::<T>(), value);
        self
    }

    /// Builder-style variant of [`Services::insert`].
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Look up a service by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    /// Look up a service that must be present.
    pub fn require<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ServiceError> {
        self.get::<T>().ok_or(ServiceError::Missing {
            type_name: type_name::<T>(),
        })
    }

    /// Check whether a service of the given type is registered.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("count", &self.entries.len())
            .finish()
    }
}
