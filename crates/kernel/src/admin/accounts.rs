//! Account merging, deletion and mass mail composition.
//!
//! Merging moves everything a source account owns onto a destination
//! account and removes the source. Deleting keeps the account's posts
//! but hands them to the guest user.

use sea_query::{
    Alias, Asterisk, Expr, PostgresQueryBuilder, Query, SimpleExpr, SubQueryStatement,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schema::{Banned, Events, Forums, Posts, Privatemessages, Threads, Userfields, Users};
use crate::models::BoardSettings;

/// Tables keyed only by the owning `uid` that follow an account on merge.
const MERGED_UID_TABLES: &[&str] = &[
    "adminlog",
    "announcements",
    "favorites",
    "forumsubscriptions",
    "moderatorlog",
    "moderators",
    "pollvotes",
    "reputation",
    "threadratings",
];

/// Tables keyed by `uid` whose rows go away with a deleted account.
const DELETED_UID_TABLES: &[&str] = &[
    "privatemessages",
    "moderators",
    "forumsubscriptions",
    "favorites",
    "sessions",
    "banned",
];

/// The parts of a member row the account helpers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uid: u32,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl Account {
    pub fn new(uid: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid,
            username: username.into(),
            email: email.into(),
        }
    }
}

fn reassign(table: Alias, column: Alias, from: u32, to: u32) -> String {
    Query::update()
        .table(table)
        .value(column.clone(), to)
        .and_where(Expr::col(column).eq(from))
        .to_string(PostgresQueryBuilder)
}

/// Statements that fold `source` into `dest`, in execution order.
///
/// The destination's post count is recounted last, after the source's
/// posts have moved over.
pub fn merge_statements(source: &Account, dest: &Account) -> Vec<String> {
    let mut statements: Vec<String> = MERGED_UID_TABLES
        .iter()
        .map(|table| reassign(Alias::new(*table), Alias::new("uid"), source.uid, dest.uid))
        .collect();

    statements.push(
        Query::update()
            .table(Events::Table)
            .value(Events::Author, dest.uid)
            .and_where(Expr::col(Events::Author).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::update()
            .table(Forums::Table)
            .value(Forums::Lastposter, dest.username.as_str())
            .and_where(Expr::col(Forums::Lastposter).eq(source.username.as_str()))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::update()
            .table(Posts::Table)
            .value(Posts::Uid, dest.uid)
            .value(Posts::Username, dest.username.as_str())
            .and_where(Expr::col(Posts::Uid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::update()
            .table(Posts::Table)
            .value(Posts::Edituid, dest.uid)
            .and_where(Expr::col(Posts::Edituid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    for column in [Privatemessages::Uid, Privatemessages::Toid, Privatemessages::Fromid] {
        statements.push(
            Query::update()
                .table(Privatemessages::Table)
                .value(column, dest.uid)
                .and_where(Expr::col(column).eq(source.uid))
                .to_string(PostgresQueryBuilder),
        );
    }
    statements.push(
        Query::update()
            .table(Threads::Table)
            .value(Threads::Uid, dest.uid)
            .value(Threads::Username, dest.username.as_str())
            .and_where(Expr::col(Threads::Uid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::update()
            .table(Threads::Table)
            .value(Threads::Lastposter, dest.username.as_str())
            .and_where(Expr::col(Threads::Lastposter).eq(source.username.as_str()))
            .to_string(PostgresQueryBuilder),
    );

    statements.push(
        Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Uid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::delete()
            .from_table(Userfields::Table)
            .and_where(Expr::col(Userfields::Ufid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );
    statements.push(
        Query::delete()
            .from_table(Banned::Table)
            .and_where(Expr::col(Banned::Uid).eq(source.uid))
            .to_string(PostgresQueryBuilder),
    );

    let post_count = Query::select()
        .expr(Expr::col(Asterisk).count())
        .from(Posts::Table)
        .and_where(Expr::col(Posts::Uid).eq(dest.uid))
        .to_owned();
    statements.push(
        Query::update()
            .table(Users::Table)
            .value(
                Users::Postnum,
                SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(post_count))),
            )
            .and_where(Expr::col(Users::Uid).eq(dest.uid))
            .to_string(PostgresQueryBuilder),
    );

    debug!(
        source = source.uid,
        dest = dest.uid,
        statements = statements.len(),
        "built account merge"
    );
    statements
}

/// Statements that remove an account, in execution order.
///
/// Posts stay on the board under the guest uid `0`.
pub fn delete_statements(uid: u32) -> Vec<String> {
    let mut statements = vec![
        reassign(Alias::new("posts"), Alias::new("uid"), uid, 0),
        Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Uid).eq(uid))
            .to_string(PostgresQueryBuilder),
        Query::delete()
            .from_table(Userfields::Table)
            .and_where(Expr::col(Userfields::Ufid).eq(uid))
            .to_string(PostgresQueryBuilder),
        Query::delete()
            .from_table(Events::Table)
            .and_where(Expr::col(Events::Author).eq(uid))
            .to_string(PostgresQueryBuilder),
    ];
    statements.extend(DELETED_UID_TABLES.iter().map(|table| {
        Query::delete()
            .from_table(Alias::new(*table))
            .and_where(Expr::col(Alias::new("uid")).eq(uid))
            .to_string(PostgresQueryBuilder)
    }));
    statements
}

/// Fill a mass mail body for one recipient.
///
/// Recognised placeholders are `{uid}`, `{username}`, `{email}`, `{bbname}`
/// and `{bburl}`. Anything else in braces is left as written. Substituted
/// values are not scanned again, so a username containing `{email}` stays
/// literal.
pub fn compose_mass_mail(template: &str, recipient: &Account, settings: &BoardSettings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        let value = match &tail[1..close] {
            "uid" => Some(recipient.uid.to_string()),
            "username" => Some(recipient.username.clone()),
            "email" => Some(recipient.email.clone()),
            "bbname" => Some(settings.board_name.clone()),
            "bburl" => Some(settings.board_url.clone()),
            _ => None,
        };
        match value {
            Some(value) => {
                out.push_str(&value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
