//! Board-wide settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings that influence which navigation is offered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSettings {
    /// Board display name.
    #[serde(default = "default_board_name")]
    pub board_name: String,

    /// Public board URL.
    #[serde(default)]
    pub board_url: String,

    /// Whether the private messaging system is switched on.
    #[serde(default = "default_true")]
    pub enable_pms: bool,
}

fn default_true() -> bool {
    true
}

fn default_board_name() -> String {
    "Agora".to_string()
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            board_name: default_board_name(),
            board_url: String::new(),
            enable_pms: true,
        }
    }
}

impl BoardSettings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board settings {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse board settings {}", path.display()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let settings: BoardSettings = toml::from_str("board_name = \"Test Board\"").unwrap();
        assert_eq!(settings.board_name, "Test Board");
        assert!(settings.enable_pms);
    }

    #[test]
    fn pms_can_be_disabled() {
        let settings: BoardSettings = toml::from_str("enable_pms = false").unwrap();
        assert!(!settings.enable_pms);
    }
}
