//! User administration helpers: bans, member searches, account merges
//! and mass mail.

pub mod accounts;
pub mod ban;
mod schema;
pub mod user_search;

pub use accounts::{Account, compose_mass_mail, delete_statements, merge_statements};
pub use ban::{Ban, BanLength, BanLengthError, BanPreset, RemainingTime, TimeUnit, expired_bans_query};
pub use user_search::{
    DEFAULT_MASS_MAIL_PER_PAGE, DEFAULT_SEARCH_PER_PAGE, Pagination, ProfileFieldValue, SortField,
    SortOrder, UserSearch, UserSearchQueryBuilder,
};
