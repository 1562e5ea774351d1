//! Menu error types.
//!
//! Configuration mistakes (bad registrations, factories that cannot produce
//! a builder) are reported with the offending menu name so they can be fixed
//! at the call site. An unknown menu is not an error.

use thiserror::Error;

/// Errors raised while registering, resolving or rendering menus.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A caller passed something that is not usable here.
    #[error("invalid argument: {details}")]
    InvalidArgument { details: String },

    /// A deferred builder factory could not produce a builder.
    #[error("callback builder for menu '{menu}' failed to resolve: {details}")]
    Logic { menu: String, details: String },

    /// The menu template failed to render.
    #[error("failed to render menu '{menu}' with template '{template}': {source}")]
    Template {
        menu: String,
        template: String,
        #[source]
        source: tera::Error,
    },
}

impl MenuError {
    /// Create an invalid argument error.
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument {
            details: details.into(),
        }
    }

    /// Create a builder resolution error.
    pub fn logic(menu: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Logic {
            menu: menu.into(),
            details: details.into(),
        }
    }

    /// Create a template error.
    pub fn template(
        menu: impl Into<String>,
        template: impl Into<String>,
        source: tera::Error,
    ) -> Self {
        Self::Template {
            menu: menu.into(),
            template: template.into(),
            source,
        }
    }
}
