//! Built-in menu builders.

mod user_cp;

pub use user_cp::{
    PRIVATE_MESSAGES_ITEM, USER_CP_MENU, USER_CP_TEMPLATE, UserCpMenuBuilder, user_cp_factory,
};

use super::{BuilderCatalog, BuilderRegistration, MenuError, MenuManager};

/// Register the builders every board ships with.
pub fn register_default_builders(manager: &mut MenuManager) -> Result<(), MenuError> {
    manager.add_menu_builder(USER_CP_MENU, BuilderRegistration::deferred(user_cp_factory))?;
    Ok(())
}

/// Catalog of the built-in builder kinds, for configuration-driven registration.
pub fn default_catalog() -> BuilderCatalog {
    let mut catalog = BuilderCatalog::new();
    catalog.register("user_cp", user_cp_factory);
    catalog
}
