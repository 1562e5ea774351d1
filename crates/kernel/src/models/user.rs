//! The forum user viewing the page, with their group's capabilities.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::pm_folder::{PmFolder, parse_folder_descriptor};

/// Folder descriptor every new account starts with.
pub const DEFAULT_PM_FOLDERS: &str = "1**$%%$2**$%%$3**$%%$4**";

/// Capabilities granted by the user's primary group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserGroupPermissions {
    #[serde(default)]
    pub can_use_pms: bool,
    #[serde(default)]
    pub can_send_pms: bool,
    #[serde(default)]
    pub can_track_pms: bool,
}

impl UserGroupPermissions {
    /// Full private messaging capabilities.
    pub fn all() -> Self {
        Self {
            can_use_pms: true,
            can_send_pms: true,
            can_track_pms: true,
        }
    }
}

/// User record as seen by navigation builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForumUser {
    /// User ID (0 for guests).
    #[serde(default)]
    pub uid: u32,
    #[serde(default)]
    pub username: String,
    /// Primary group capabilities.
    #[serde(default)]
    pub group: UserGroupPermissions,
    /// Raw private message folder descriptor (`id**name` records joined by `$%%$`).
    #[serde(default = "default_pm_folders")]
    pub pm_folders: String,
}

fn default_pm_folders() -> String {
    DEFAULT_PM_FOLDERS.to_string()
}

impl ForumUser {
    /// Create a guest with no capabilities.
    pub fn guest() -> Self {
        Self {
            uid: 0,
            username: String::new(),
            group: UserGroupPermissions::default(),
            pm_folders: String::new(),
        }
    }

    /// Create a registered member with the default folders.
    pub fn member(uid: u32, username: impl Into<String>, group: UserGroupPermissions) -> Self {
        Self {
            uid,
            username: username.into(),
            group,
            pm_folders: default_pm_folders(),
        }
    }

    /// Check if this is a guest.
    pub fn is_guest(&self) -> bool {
        self.uid == 0
    }

    /// Parse the user's private message folders.
    pub fn folders(&self) -> Vec<PmFolder> {
        parse_folder_descriptor(&self.pm_folders)
    }

    /// Load a user fixture from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read user file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse user file {}", path.display()))
    }
}
