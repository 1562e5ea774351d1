#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Ban, member search and account administration tests.

use std::path::PathBuf;

use agora_kernel::admin::{
    Account, Ban, BanLength, BanLengthError, DEFAULT_SEARCH_PER_PAGE, Pagination, SortField,
    SortOrder, TimeUnit, UserSearch, UserSearchQueryBuilder, compose_mass_mail, delete_statements,
    expired_bans_query, merge_statements,
};
use agora_kernel::config::LANGUAGE_SECTIONS;
use agora_kernel::lang::Language;
use agora_kernel::models::BoardSettings;
use chrono::{DateTime, TimeZone, Utc};

fn shipped_language() -> Language {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("languages");
    let mut lang = Language::new();
    lang.load_available(&dir, LANGUAGE_SECTIONS).unwrap();
    lang
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn test_preset_labels_use_language_files() {
    let lang = shipped_language();
    let labels: Vec<String> = BanLength::presets()
        .iter()
        .map(|preset| preset.label(&lang))
        .collect();

    assert_eq!(labels.len(), 17);
    assert_eq!(labels[0], "1 Day");
    assert_eq!(labels[1], "2 Days");
    assert_eq!(labels[6], "1 Week");
    assert_eq!(labels[16], "2 Years");
}

#[test]
fn test_ban_lifecycle() {
    let lang = shipped_language();
    let placed = at(2024, 3, 10, 9);
    let ban = Ban::new(42, 1, 2, 7, "0-1-0".parse().unwrap(), "spam", placed).unwrap();

    assert_eq!(ban.lifted, Some(at(2024, 4, 10, 0)));
    assert!(!ban.is_permanent());

    let remaining = ban.remaining(at(2024, 4, 7, 0)).unwrap();
    assert_eq!(remaining.unit, TimeUnit::Day);
    assert_eq!(remaining.label(&lang), "3 Days");
    assert_eq!(remaining.css_class().as_deref(), Some("highlight2"));

    assert!(!ban.is_expired(at(2024, 4, 9, 23)));
    assert!(ban.is_expired(at(2024, 4, 10, 0)));

    let [restore, delete] = ban.lift_statements();
    assert!(restore.contains("\"usergroup\" = 2"));
    assert!(delete.contains("\"uid\" = 42"));
}

#[test]
fn test_last_hours_of_a_ban() {
    let lang = shipped_language();
    let ban = Ban::new(5, 1, 2, 7, BanLength::days(1), "", at(2024, 6, 1, 8)).unwrap();
    let remaining = ban.remaining(at(2024, 6, 1, 19)).unwrap();

    assert_eq!(remaining.label(&lang), "5 Hours");
    assert_eq!(remaining.css_class().as_deref(), Some("highlight1"));
}

#[test]
fn test_permanent_ban() {
    let ban = Ban::new(9, 1, 2, 7, "perm".parse().unwrap(), "", at(2024, 1, 1, 0)).unwrap();

    assert!(ban.is_permanent());
    assert!(ban.remaining(at(2030, 1, 1, 0)).is_none());
    assert!(!ban.is_expired(at(2099, 1, 1, 0)));
}

#[test]
fn test_out_of_range_ban_is_rejected() {
    let length: BanLength = "999999999-0-0".parse().unwrap();
    assert!(!length.is_permanent());

    let err = Ban::new(11, 1, 2, 7, length, "", at(2024, 1, 1, 0)).unwrap_err();
    assert!(matches!(err, BanLengthError::OutOfRange { .. }));
    assert!(err.to_string().contains("999999999-0-0"));
}

#[test]
fn test_ban_round_trips_through_json() {
    let ban = Ban::new(3, 1, 2, 7, BanLength::years(1), "abuse", at(2024, 2, 29, 15)).unwrap();
    let json = serde_json::to_string(&ban).unwrap();
    assert!(json.contains("\"length\":\"0-0-1\""));

    let back: Ban = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ban);
}

#[test]
fn test_expired_bans_query() {
    let sql = expired_bans_query(at(2024, 1, 1, 0));
    assert!(sql.contains("\"lifted\" IS NOT NULL"));
    assert!(sql.contains("\"lifted\" <= 1704067200"));
}

#[test]
fn test_search_from_form_input() {
    let search: UserSearch = serde_json::from_value(serde_json::json!({
        "username": "ali",
        "usergroup": 2,
        "posts_greater": 10,
        "email": "",
    }))
    .unwrap();

    let builder = UserSearchQueryBuilder::new(search)
        .with_sort(SortField::parse_or_default("postnum"), SortOrder::Desc);
    let sql = builder.build_page(Pagination::new(Some(3), None, DEFAULT_SEARCH_PER_PAGE));

    assert!(sql.contains("\"users\".\"username\" LIKE '%ali%'"));
    assert!(sql.contains("\"users\".\"usergroup\" = 2"));
    assert!(sql.contains("\"users\".\"postnum\" > 10"));
    assert!(!sql.contains("\"email\" LIKE"));
    assert!(sql.contains("ORDER BY \"users\".\"postnum\" DESC"));
    assert!(sql.contains("LIMIT 30 OFFSET 60"));

    let count = builder.build_count();
    assert!(count.starts_with("SELECT COUNT(*)"));
    assert!(!count.contains("LIMIT"));
}

#[test]
fn test_mass_mail_recipients() {
    let mut search = UserSearch::mass_mail();
    search.additional_groups = vec![4];

    let sql = UserSearchQueryBuilder::new(search).build(1, 500);

    assert!(sql.contains("\"users\".\"allownotices\" <> 'no'"));
    assert!(sql.contains("'%,4,%'"));
    assert!(sql.contains("LIMIT 500 OFFSET 0"));
}

#[test]
fn test_page_count() {
    let pagination = Pagination::new(None, Some(25), DEFAULT_SEARCH_PER_PAGE);
    assert_eq!(pagination.page_count(0), 0);
    assert_eq!(pagination.page_count(25), 1);
    assert_eq!(pagination.page_count(26), 2);
}

#[test]
fn test_merge_folds_source_into_destination() {
    let source = Account::new(5, "alice", "alice@example.com");
    let dest = Account::new(9, "bob", "bob@example.com");
    let statements = merge_statements(&source, &dest);

    assert!(statements.contains(
        &r#"UPDATE "threads" SET "uid" = 9, "username" = 'bob' WHERE "uid" = 5"#.to_string()
    ));
    assert!(statements.contains(&r#"DELETE FROM "banned" WHERE "uid" = 5"#.to_string()));
    assert!(statements.last().unwrap().contains(r#""postnum" = (SELECT COUNT(*)"#));
    // nothing belonging to the destination is removed
    assert!(
        statements
            .iter()
            .filter(|s| s.starts_with("DELETE"))
            .all(|s| s.ends_with("= 5"))
    );
}

#[test]
fn test_delete_account() {
    let statements = delete_statements(42);

    assert!(statements[0].starts_with(r#"UPDATE "posts" SET "uid" = 0"#));
    assert!(statements.contains(&r#"DELETE FROM "users" WHERE "uid" = 42"#.to_string()));
    assert!(statements.contains(&r#"DELETE FROM "privatemessages" WHERE "uid" = 42"#.to_string()));
    assert!(statements.contains(&r#"DELETE FROM "banned" WHERE "uid" = 42"#.to_string()));
}

#[test]
fn test_mass_mail_uses_board_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.toml");
    std::fs::write(
        &path,
        "board_name = \"Lakeside\"\nboard_url = \"https://lakeside.example\"\n",
    )
    .unwrap();
    let settings = BoardSettings::from_file(&path).unwrap();

    let recipient = Account::new(7, "carol", "carol@example.com");
    let body = compose_mass_mail("Dear {username}, visit {bburl} ({bbname}).", &recipient, &settings);
    assert_eq!(body, "Dear carol, visit https://lakeside.example (Lakeside).");
}
