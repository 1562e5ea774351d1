//! User control panel navigation.

use std::sync::{Arc, OnceLock};

use serde_json::json;
use tracing::debug;

use crate::lang::Language;
use crate::menu::{AnyMenu, Menu, MenuBuilder, MenuError, into_attributes};
use crate::models::{BoardSettings, ForumUser, PmFolder};
use crate::services::Services;

/// Name of the user control panel menu.
pub const USER_CP_MENU: &str = "user_cp";

/// Template for the user control panel menu.
pub const USER_CP_TEMPLATE: &str = "usercp/menu.html";

/// Root item holding the private messages submenu.
pub const PRIVATE_MESSAGES_ITEM: &str = "private_messages";

const PRIVATE_MESSAGES_MENU: &str = "usercp_private_messages";
const PRIVATE_MESSAGES_TEMPLATE: &str = "usercp/menu/private_messages.html";

/// Builds the user control panel menu for the current user.
///
/// The menu is built once; later calls return copies of it.
#[derive(Debug)]
pub struct UserCpMenuBuilder {
    settings: Arc<BoardSettings>,
    user: Arc<ForumUser>,
    language: Arc<Language>,
    built: OnceLock<AnyMenu>,
}

impl UserCpMenuBuilder {
    pub fn new(settings: Arc<BoardSettings>, user: Arc<ForumUser>, language: Arc<Language>) -> Self {
        Self {
            settings,
            user,
            language,
            built: OnceLock::new(),
        }
    }

    fn build_default_menu(&self) -> AnyMenu {
        let mut menu = Menu::new(USER_CP_MENU, USER_CP_TEMPLATE);
        self.add_private_messages(&mut menu);

        debug!(uid = self.user.uid, items = menu.len(), "built user cp menu");
        menu.into()
    }

    fn add_private_messages(&self, menu: &mut Menu) {
        let group = &self.user.group;
        if !self.settings.enable_pms || !group.can_use_pms {
            return;
        }

        let mut child = Menu::new(PRIVATE_MESSAGES_MENU, PRIVATE_MESSAGES_TEMPLATE);

        if group.can_send_pms {
            child.add_item(
                "compose",
                Some(0),
                into_attributes(json!({
                    "link": "private.php?action=send",
                    "language": "ucp_nav_compose",
                })),
            );
        }

        let folders = self.folder_entries();
        if !folders.is_empty() {
            child.add_item(
                "folders",
                Some(1),
                into_attributes(json!({ "folders": folders })),
            );
        }

        if group.can_track_pms {
            child.add_item(
                "tracking",
                Some(2),
                into_attributes(json!({
                    "link": "private.php?action=tracking",
                    "language": "ucp_nav_tracking",
                })),
            );
        }

        child.add_item(
            "edit_folders",
            Some(3),
            into_attributes(json!({
                "link": "private.php?action=folders",
                "language": "ucp_nav_edit_folders",
            })),
        );

        menu.add_submenu(
            PRIVATE_MESSAGES_ITEM,
            Some(0),
            into_attributes(json!({ "language": "ucp_nav_messenger" })),
            child,
        );
    }

    fn folder_entries(&self) -> Vec<serde_json::Value> {
        self.user
            .folders()
            .iter()
            .enumerate()
            .map(|(index, folder)| {
                json!({
                    "id": folder.id,
                    "name": folder.display_name(&self.language),
                    "class": folder_class(folder, index == 0),
                })
            })
            .collect()
    }
}

fn folder_class(folder: &PmFolder, first: bool) -> &'static str {
    if folder.is_trash() {
        "usercp_nav_trash_pmfolder"
    } else if !first {
        "usercp_nav_sub_pmfolder"
    } else {
        "usercp_nav_pmfolder"
    }
}

impl MenuBuilder for UserCpMenuBuilder {
    fn build_menu(&self) -> Result<AnyMenu, MenuError> {
        Ok(self.built.get_or_init(|| self.build_default_menu()).clone())
    }
}

/// Deferred factory for [`UserCpMenuBuilder`].
///
/// Needs [`BoardSettings`], [`ForumUser`] and [`Language`] in the services.
pub fn user_cp_factory(services: &Services) -> anyhow::Result<Box<dyn MenuBuilder>> {
    let settings = services.require::<BoardSettings>()?;
    let user = services.require::<ForumUser>()?;
    let language = services.require::<Language>()?;

    Ok(Box::new(UserCpMenuBuilder::new(settings, user, language)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::UserGroupPermissions;

    fn build(settings: BoardSettings, user: ForumUser) -> Menu {
        let builder =
            UserCpMenuBuilder::new(Arc::new(settings), Arc::new(user), Arc::new(Language::new()));
        builder.build_menu().unwrap().as_menu().unwrap().clone()
    }

    #[test]
    fn no_private_messages_when_disabled() {
        let settings = BoardSettings {
            enable_pms: false,
            ..BoardSettings::default()
        };
        let menu = build(settings, ForumUser::member(1, "a", UserGroupPermissions::all()));
        assert!(menu.is_empty());
        assert_eq!(menu.name(), USER_CP_MENU);
        assert_eq!(menu.template_name(), USER_CP_TEMPLATE);
    }

    #[test]
    fn folder_classes() {
        let first = PmFolder {
            id: 1,
            name: String::new(),
        };
        let trash = PmFolder {
            id: 4,
            name: String::new(),
        };
        let custom = PmFolder {
            id: 5,
            name: "Archive".to_string(),
        };
        assert_eq!(folder_class(&first, true), "usercp_nav_pmfolder");
        assert_eq!(folder_class(&custom, false), "usercp_nav_sub_pmfolder");
        assert_eq!(folder_class(&trash, false), "usercp_nav_trash_pmfolder");
        assert_eq!(folder_class(&trash, true), "usercp_nav_trash_pmfolder");
    }

    #[test]
    fn folders_item_only_carries_folder_list() {
        let menu = build(
            BoardSettings::default(),
            ForumUser::member(1, "a", UserGroupPermissions::all()),
        );
        let child = menu.get(PRIVATE_MESSAGES_ITEM).unwrap().children.clone().unwrap();
        let folders = child.as_menu().unwrap().get("folders").unwrap().clone();

        let keys: Vec<&str> = folders.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["folders"]);
        assert_eq!(folders.attribute("folders").unwrap().as_array().unwrap().len(), 4);
    }

    #[test]
    fn factory_reports_missing_service() {
        let services = Services::new().with(BoardSettings::default());
        let err = user_cp_factory(&services).err().unwrap();
        assert!(err.to_string().contains("ForumUser"));
    }
}
