//! Forum domain models consumed by menu builders and admin helpers.

pub mod board_settings;
pub mod pm_folder;
pub mod user;

pub use board_settings::BoardSettings;
pub use pm_folder::{PmFolder, parse_folder_descriptor};
pub use user::{ForumUser, UserGroupPermissions};
