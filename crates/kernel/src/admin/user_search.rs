//! Member search for the user administration screens.
//!
//! Builds SQL from search criteria using SeaQuery. Text criteria match
//! anywhere in the column; the registration IP matches as a prefix.

use std::collections::BTreeMap;
use std::str::FromStr;

use sea_query::{
    Alias, Asterisk, Expr, Func, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::schema::{Userfields, Users};

/// Results per page on the member search screen.
pub const DEFAULT_SEARCH_PER_PAGE: u32 = 30;

/// Recipients per batch when mailing members.
pub const DEFAULT_MASS_MAIL_PER_PAGE: u32 = 500;

/// Value searched for in a custom profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileFieldValue {
    Single(String),
    /// Every listed option must match (checkbox fields).
    Multiple(Vec<String>),
}

impl ProfileFieldValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::Multiple(values) => values.is_empty(),
        }
    }
}

/// Search criteria. Empty or zero criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSearch {
    pub username: Option<String>,
    /// Primary group.
    pub usergroup: Option<u32>,
    /// Groups the user must belong to, as primary or additional group.
    pub additional_groups: Vec<u32>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub icq: Option<u64>,
    pub aim: Option<String>,
    pub yahoo: Option<String>,
    pub msn: Option<String>,
    pub signature: Option<String>,
    pub usertitle: Option<String>,
    pub posts_greater: Option<i64>,
    pub posts_less: Option<i64>,
    /// Registration IP prefix.
    pub reg_ip: Option<String>,
    /// Custom profile field values keyed by field id.
    pub profile_fields: BTreeMap<u32, ProfileFieldValue>,
    /// Skip users who opted out of administrator notices.
    pub respect_notice_opt_out: bool,
}

impl UserSearch {
    /// Criteria for mailing members: opted-out users are skipped.
    pub fn mass_mail() -> Self {
        Self {
            respect_notice_opt_out: true,
            ..Self::default()
        }
    }

    fn conditions(&self) -> Vec<SimpleExpr> {
        let mut cond = Vec::new();

        let text_criteria = [
            (Users::Username, &self.username),
            (Users::Email, &self.email),
            (Users::Website, &self.website),
            (Users::Aim, &self.aim),
            (Users::Yahoo, &self.yahoo),
            (Users::Msn, &self.msn),
            (Users::Signature, &self.signature),
            (Users::Usertitle, &self.usertitle),
        ];
        for (column, value) in text_criteria {
            if let Some(value) = non_empty(value) {
                cond.push(
                    Expr::col((Users::Table, column))
                        .like(format!("%{}%", escape_like_wildcards(value))),
                );
            }
        }

        if let Some(icq) = self.icq.filter(|n| *n != 0) {
            cond.push(Expr::col((Users::Table, Users::Icq)).like(format!("%{icq}%")));
        }

        if let Some(group) = self.usergroup.filter(|g| *g != 0) {
            cond.push(Expr::col((Users::Table, Users::Usergroup)).eq(group));
        }

        for group in &self.additional_groups {
            let padded = Func::cust(Alias::new("CONCAT"))
                .arg(",")
                .arg(Expr::col((Users::Table, Users::Additionalgroups)))
                .arg(",");
            cond.push(
                Expr::col((Users::Table, Users::Usergroup))
                    .eq(*group)
                    .or(Expr::expr(padded).like(format!("%,{group},%"))),
            );
        }

        if let Some(posts) = self.posts_greater.filter(|n| *n != 0) {
            cond.push(Expr::col((Users::Table, Users::Postnum)).gt(posts));
        }
        if let Some(posts) = self.posts_less.filter(|n| *n != 0) {
            cond.push(Expr::col((Users::Table, Users::Postnum)).lt(posts));
        }

        if let Some(ip) = non_empty(&self.reg_ip) {
            cond.push(
                Expr::col((Users::Table, Users::Regip))
                    .like(format!("{}%", escape_like_wildcards(ip))),
            );
        }

        for (fid, value) in &self.profile_fields {
            if value.is_empty() {
                continue;
            }
            let column = (Userfields::Table, Alias::new(format!("fid{fid}")));
            match value {
                ProfileFieldValue::Single(text) => {
                    cond.push(Expr::col(column).eq(text.as_str()));
                }
                ProfileFieldValue::Multiple(options) => {
                    for option in options {
                        cond.push(Expr::col(column.clone()).eq(option.as_str()));
                    }
                }
            }
        }

        if self.respect_notice_opt_out {
            cond.push(Expr::col((Users::Table, Users::Allownotices)).ne("no"));
        }

        cond
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Columns results may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Username,
    Email,
    Regdate,
    Lastvisit,
    Postnum,
}

impl SortField {
    fn column(self) -> Users {
        match self {
            Self::Username => Users::Username,
            Self::Email => Users::Email,
            Self::Regdate => Users::Regdate,
            Self::Lastvisit => Users::Lastvisit,
            Self::Postnum => Users::Postnum,
        }
    }

    /// Parse a sort column, falling back to username for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            if !value.is_empty() {
                warn!(sort = %value, "unknown sort column, sorting by username");
            }
            Self::default()
        })
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "regdate" => Ok(Self::Regdate),
            "lastvisit" => Ok(Self::Lastvisit),
            "postnum" => Ok(Self::Postnum),
            other => Err(format!("unknown sort column '{other}'")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Page number and size, with defaults for missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// A missing or zero page is the first page; a missing or zero size
    /// uses `default_per_page`.
    pub fn new(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            per_page: per_page.filter(|n| *n > 0).unwrap_or(default_per_page),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Number of pages needed for `total` results.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.per_page))
    }
}

/// Turns [`UserSearch`] criteria into SQL.
#[derive(Debug, Clone)]
pub struct UserSearchQueryBuilder {
    search: UserSearch,
    sort: SortField,
    order: SortOrder,
}

impl UserSearchQueryBuilder {
    pub fn new(search: UserSearch) -> Self {
        Self {
            search,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    /// Build the paginated SELECT.
    pub fn build(&self, page: u32, per_page: u32) -> String {
        let mut query = Query::select();
        query.column(Asterisk);
        self.add_source(&mut query);

        query.order_by((Users::Table, self.sort.column()), self.order.into());

        let offset = u64::from(page.saturating_sub(1)) * u64::from(per_page);
        query.limit(u64::from(per_page));
        query.offset(offset);

        query.to_string(PostgresQueryBuilder)
    }

    /// Build the paginated SELECT for a [`Pagination`].
    pub fn build_page(&self, pagination: Pagination) -> String {
        self.build(pagination.page(), pagination.per_page())
    }

    /// Build a COUNT query for the total number of matches.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();
        query.expr(Expr::col(Asterisk).count());
        self.add_source(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    fn add_source(&self, query: &mut SelectStatement) {
        query.from(Users::Table).left_join(
            Userfields::Table,
            Expr::col((Userfields::Table, Userfields::Ufid)).equals((Users::Table, Users::Uid)),
        );
        for condition in self.search.conditions() {
            query.and_where(condition);
        }
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
