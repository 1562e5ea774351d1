//! Language phrase tables.
//!
//! Phrases live in one TOML file per section (`global.toml`,
//! `usercpnav.toml`, ...) as flat `key = "phrase"` tables.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Loaded phrases for the active language.
#[derive(Debug, Clone, Default)]
pub struct Language {
    phrases: HashMap<String, String>,
    sections: HashSet<String>,
}

impl Language {
    /// Create an empty phrase table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{section}.toml` from `dir`. Loading a section twice is a no-op.
    pub fn load_section(&mut self, dir: &Path, section: &str) -> Result<()> {
        if self.sections.contains(section) {
            return Ok(());
        }

        let path = dir.join(format!("{section}.toml"));
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read language file {}", path.display()))?;
        let phrases: HashMap<String, String> = toml::from_str(&raw)
            .with_context(|| format!("failed to parse language file {}", path.display()))?;

        debug!(section = %section, phrases = phrases.len(), "loaded language section");

        self.phrases.extend(phrases);
        self.sections.insert(section.to_string());
        Ok(())
    }

    /// Load every section that exists in `dir`, skipping absent files.
    pub fn load_available(&mut self, dir: &Path, sections: &[&str]) -> Result<()> {
        for section in sections {
            if dir.join(format!("{section}.toml")).is_file() {
                self.load_section(dir, section)?;
            } else {
                debug!(section = %section, dir = %dir.display(), "language section not found");
            }
        }
        Ok(())
    }

    /// Add or replace a single phrase.
    pub fn insert(&mut self, key: impl Into<String>, phrase: impl Into<String>) {
        self.phrases.insert(key.into(), phrase.into());
    }

    /// Get a phrase if defined.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.phrases.get(key).map(|s| s.as_str())
    }

    /// Get a phrase, falling back to the key itself.
    pub fn phrase(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    /// Whether a section has been loaded.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains(section)
    }

    /// Number of loaded phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Check if no phrases are loaded.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
