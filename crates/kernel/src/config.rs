//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::lang::Language;
use crate::models::BoardSettings;

/// Language sections every page needs.
pub const LANGUAGE_SECTIONS: &[&str] = &["global", "usercpnav"];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the template directory (default: ./templates).
    pub template_dir: PathBuf,

    /// Path to the language directory (default: ./languages).
    pub language_dir: PathBuf,

    /// Optional TOML file with board settings. Defaults apply when unset.
    pub board_settings: Option<PathBuf>,

    /// Extra menu builders as `menu=kind` pairs (from MENU_BUILDERS, comma-separated).
    pub menu_builders: Vec<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let template_dir = env::var("TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let language_dir = env::var("LANGUAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./languages"));

        let board_settings = env::var("BOARD_SETTINGS")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let menu_builders = match env::var("MENU_BUILDERS") {
            Ok(raw) => parse_menu_builders(&raw).context("MENU_BUILDERS is malformed")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            template_dir,
            language_dir,
            board_settings,
            menu_builders,
        })
    }

    /// Load the board settings file, or defaults when none is configured.
    pub fn load_board_settings(&self) -> Result<BoardSettings> {
        match &self.board_settings {
            Some(path) => BoardSettings::from_file(path),
            None => {
                debug!("no board settings file configured, using defaults");
                Ok(BoardSettings::default())
            }
        }
    }

    /// Load the standard language sections that exist in the language directory.
    pub fn load_language(&self) -> Result<Language> {
        let mut language = Language::new();
        language
            .load_available(&self.language_dir, LANGUAGE_SECTIONS)
            .context("failed to load language files")?;
        Ok(language)
    }
}

/// Parse `menu=kind` pairs separated by commas.
fn parse_menu_builders(raw: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((menu, kind)) = entry.split_once('=') else {
            bail!("expected 'menu=kind', got '{entry}'");
        };
        pairs.push((menu.trim().to_string(), kind.trim().to_string()));
    }
    Ok(pairs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn menu_builder_pairs() {
        let pairs = parse_menu_builders("user_cp=user_cp, sidebar = user_cp,").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("user_cp".to_string(), "user_cp".to_string()),
                ("sidebar".to_string(), "user_cp".to_string()),
            ]
        );
        assert!(parse_menu_builders("").unwrap().is_empty());
        assert!(parse_menu_builders("user_cp").is_err());
    }

    #[test]
    fn default_board_settings() {
        let config = Config {
            template_dir: PathBuf::from("./templates"),
            language_dir: PathBuf::from("/nonexistent"),
            board_settings: None,
            menu_builders: Vec::new(),
        };
        assert_eq!(config.load_board_settings().unwrap(), BoardSettings::default());
        // missing language files are skipped
        assert!(config.load_language().unwrap().is_empty());
    }

    #[test]
    fn loads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("board.toml");
        std::fs::write(&settings_path, "enable_pms = false\n").unwrap();
        std::fs::write(
            dir.path().join("usercpnav.toml"),
            "ucp_nav_compose = \"Compose\"\n",
        )
        .unwrap();

        let config = Config {
            template_dir: dir.path().to_path_buf(),
            language_dir: dir.path().to_path_buf(),
            board_settings: Some(settings_path),
            menu_builders: Vec::new(),
        };

        assert!(!config.load_board_settings().unwrap().enable_pms);
        let language = config.load_language().unwrap();
        assert_eq!(language.get("ucp_nav_compose"), Some("Compose"));
        assert!(language.has_section("usercpnav"));
        assert!(!language.has_section("global"));
    }
}
