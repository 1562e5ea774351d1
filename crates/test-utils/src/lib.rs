//! Agora test utilities.
//!
//! Helpers for integration testing: user and board fixtures, service
//! setups for menu builders, tap recorders, and assertion utilities.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use agora_kernel::lang::Language;
use agora_kernel::menu::{AnyMenu, BuilderRegistration, Menu, MenuBuilder, MenuError};
use agora_kernel::models::{BoardSettings, ForumUser, UserGroupPermissions};
use agora_kernel::services::Services;
use agora_kernel::tap::{MenuTapEvent, TapRegistry};
use agora_kernel::theme::ThemeEngine;
use parking_lot::Mutex;

/// Create a registered test user with no private messaging rights.
pub fn test_user(uid: u32, username: &str) -> TestUser {
    TestUser {
        uid,
        username: username.to_string(),
        group: UserGroupPermissions::default(),
        pm_folders: agora_kernel::models::user::DEFAULT_PM_FOLDERS.to_string(),
    }
}

/// A test user builder.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub uid: u32,
    pub username: String,
    pub group: UserGroupPermissions,
    pub pm_folders: String,
}

impl TestUser {
    /// Allow using private messages.
    pub fn can_use_pms(mut self) -> Self {
        self.group.can_use_pms = true;
        self
    }

    /// Allow sending private messages.
    pub fn can_send_pms(mut self) -> Self {
        self.group.can_send_pms = true;
        self
    }

    /// Allow tracking sent messages.
    pub fn can_track_pms(mut self) -> Self {
        self.group.can_track_pms = true;
        self
    }

    /// Grant every private messaging right.
    pub fn with_all_pm_permissions(mut self) -> Self {
        self.group = UserGroupPermissions::all();
        self
    }

    /// Replace the folder descriptor.
    pub fn with_folders(mut self, descriptor: &str) -> Self {
        self.pm_folders = descriptor.to_string();
        self
    }

    pub fn build(self) -> ForumUser {
        ForumUser {
            uid: self.uid,
            username: self.username,
            group: self.group,
            pm_folders: self.pm_folders,
        }
    }
}

/// Board settings with private messages switched on or off.
pub fn board_settings(enable_pms: bool) -> BoardSettings {
    BoardSettings {
        enable_pms,
        ..BoardSettings::default()
    }
}

/// English phrases used by the navigation templates.
pub fn english() -> Language {
    let mut lang = Language::new();
    for (key, phrase) in [
        ("ucp_nav_messenger", "Messenger"),
        ("ucp_nav_compose", "Compose"),
        ("ucp_nav_tracking", "Message Tracking"),
        ("ucp_nav_edit_folders", "Manage Folders"),
        ("folder_inbox", "Inbox"),
        ("folder_sent_items", "Sent Items"),
        ("folder_drafts", "Drafts"),
        ("folder_trash", "Trash Can"),
        ("folder_untitled", "Untitled Folder"),
    ] {
        lang.insert(key, phrase);
    }
    lang
}

/// Services a user control panel builder needs.
pub fn user_cp_services(settings: BoardSettings, user: ForumUser) -> Services {
    Services::new().with(settings).with(user).with(english())
}

/// Directory holding the kernel's templates.
pub fn kernel_template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../kernel/templates")
}

/// Theme engine with the kernel's templates and English phrases.
pub fn kernel_theme() -> anyhow::Result<ThemeEngine> {
    Ok(ThemeEngine::new(&kernel_template_dir())?.with_language(Arc::new(english())))
}

/// Theme engine holding only the given raw templates.
pub fn theme_with_templates(templates: &[(&str, &str)]) -> anyhow::Result<ThemeEngine> {
    let mut theme = ThemeEngine::empty();
    for (name, content) in templates {
        theme.add_raw_template(name, content)?;
    }
    Ok(theme)
}

/// A deferred registration that builds an empty menu and counts how often
/// its factory runs.
pub fn counting_factory(
    menu_name: &'static str,
    template: &'static str,
) -> (BuilderRegistration, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let registration = BuilderRegistration::deferred(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        let builder = move || -> Result<AnyMenu, MenuError> {
            Ok(Menu::new(menu_name, template).into())
        };
        Ok(Box::new(builder) as Box<dyn MenuBuilder>)
    });
    (registration, calls)
}

/// Records which taps fired, in order.
#[derive(Debug, Clone, Default)]
pub struct TapRecorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl TapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler on `tap_name` that logs `label:menu_name`.
    pub fn record(&self, registry: &mut TapRegistry, tap_name: &str, label: &str, weight: i32) {
        let log = Arc::clone(&self.log);
        let label = label.to_string();
        registry.register(tap_name, "recorder", weight, move |event: &mut MenuTapEvent<'_>| {
            log.lock().push(format!("{label}:{}", event.menu_name()));
        });
    }

    /// Everything recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `first` appears before `second`.
    pub fn appears_before(haystack: &str, first: &str, second: &str) {
        let a = haystack.find(first);
        let b = haystack.find(second);
        assert!(
            matches!((a, b), (Some(a), Some(b)) if a < b),
            "Expected '{first}' before '{second}'\nActual: {haystack}"
        );
    }
}
