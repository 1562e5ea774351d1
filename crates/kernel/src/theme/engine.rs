//! Theme engine with Tera templates and a language-aware `lang` filter.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::lang::Language;

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Phrases exposed to templates through the `lang` filter.
    language: Arc<Language>,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        let language = Arc::new(Language::new());
        Self::register_filters(&mut tera, Arc::clone(&language));

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), dir = %template_dir.display(), "loaded templates");

        Ok(Self { tera, language })
    }

    /// Create a theme engine with no templates (for testing).
    pub fn empty() -> Self {
        let mut tera = Tera::default();
        let language = Arc::new(Language::new());
        Self::register_filters(&mut tera, Arc::clone(&language));
        Self { tera, language }
    }

    /// Use the given phrases for the `lang` filter.
    pub fn with_language(mut self, language: Arc<Language>) -> Self {
        Self::register_filters(&mut self.tera, Arc::clone(&language));
        self.language = language;
        self
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera, language: Arc<Language>) {
        // Translate a phrase key, falling back to the key itself
        tera.register_filter(
            "lang",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let key = tera::try_get_value!("lang", "value", String, value);
                Ok(tera::Value::String(language.phrase(&key)))
            },
        );
    }

    /// Phrases available to templates.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Add a template from a string (for plugins and tests).
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, content)
            .with_context(|| format!("failed to add template: {name}"))
    }

    /// Check if a template is loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// Names of all loaded templates.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.tera.get_template_names()
    }

    /// Render a template with the given context.
    pub fn render(&self, template: &str, context: &tera::Context) -> tera::Result<String> {
        self.tera.render(template, context)
    }

    /// Reload templates from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.tera
            .full_reload()
            .context("failed to reload templates")
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("phrases", &self.language.len())
            .finish()
    }
}
