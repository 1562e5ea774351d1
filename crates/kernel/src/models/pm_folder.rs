//! Private message folder descriptors.
//!
//! Users store their folders as a single string: records separated by
//! `$%%$`, each record `id**name`. Only the first `**` splits, so names
//! may themselves contain `**`. Built-in folders keep an empty name.

use serde::Serialize;
use tracing::warn;

use crate::lang::Language;

/// Separator between folder records.
pub const RECORD_SEPARATOR: &str = "$%%$";

/// Separator between a folder's id and its name.
pub const FIELD_SEPARATOR: &str = "**";

pub const INBOX_FOLDER_ID: u32 = 1;
pub const SENT_ITEMS_FOLDER_ID: u32 = 2;
pub const DRAFTS_FOLDER_ID: u32 = 3;
pub const TRASH_FOLDER_ID: u32 = 4;

/// A single private message folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PmFolder {
    pub id: u32,
    /// Stored name; empty for built-in folders.
    pub name: String,
}

impl PmFolder {
    /// Display name, resolving built-in folders through language strings.
    pub fn display_name(&self, lang: &Language) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }

        let key = match self.id {
            0 | INBOX_FOLDER_ID => "folder_inbox",
            SENT_ITEMS_FOLDER_ID => "folder_sent_items",
            DRAFTS_FOLDER_ID => "folder_drafts",
            TRASH_FOLDER_ID => "folder_trash",
            _ => "folder_untitled",
        };
        lang.phrase(key)
    }

    /// Whether this is the trash folder.
    pub fn is_trash(&self) -> bool {
        self.id == TRASH_FOLDER_ID
    }
}

/// Parse a folder descriptor string.
///
/// Malformed records (no `**`, or an id that is not a number) are skipped.
pub fn parse_folder_descriptor(descriptor: &str) -> Vec<PmFolder> {
    if descriptor.is_empty() {
        return Vec::new();
    }

    descriptor
        .split(RECORD_SEPARATOR)
        .filter_map(|record| {
            let Some((id, name)) = record.split_once(FIELD_SEPARATOR) else {
                warn!(record = %record, "skipping folder record without separator");
                return None;
            };
            match id.trim().parse::<u32>() {
                Ok(id) => Some(PmFolder {
                    id,
                    name: name.to_string(),
                }),
                Err(_) => {
                    warn!(record = %record, "skipping folder record with invalid id");
                    None
                }
            }
        })
        .collect()
}
