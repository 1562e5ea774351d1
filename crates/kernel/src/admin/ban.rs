//! Ban lengths, lift dates and expiry.
//!
//! Ban lengths travel as `days-months-years` keys (`"7-0-0"` is one week)
//! or `perm`/`---` for bans that are never lifted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use sea_query::{Expr, PostgresQueryBuilder, Query};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::{Banned, Users};
use crate::lang::Language;

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 604_800;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Errors raised for unusable ban lengths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BanLengthError {
    #[error("invalid ban length '{0}': expected 'days-months-years' or 'perm'")]
    Invalid(String),

    /// The lift date cannot be represented.
    #[error("ban length '{length}' is out of range when starting at {start}")]
    OutOfRange {
        length: BanLength,
        start: DateTime<Utc>,
    },
}

/// How long a ban lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BanLength {
    Timed { days: u32, months: u32, years: u32 },
    Permanent,
}

impl BanLength {
    pub fn days(days: u32) -> Self {
        Self::Timed {
            days,
            months: 0,
            years: 0,
        }
    }

    pub fn months(months: u32) -> Self {
        Self::Timed {
            days: 0,
            months,
            years: 0,
        }
    }

    pub fn years(years: u32) -> Self {
        Self::Timed {
            days: 0,
            months: 0,
            years,
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent)
    }

    /// When a ban starting at `now` is lifted; `Ok(None)` if it never is.
    ///
    /// Bans placed in the afternoon (hour 12 or later) count from tomorrow.
    /// The result is midnight UTC of the target day, with day and month
    /// overflow rolled into the following month and year. A timed length
    /// whose lift date falls outside the calendar is an error.
    pub fn lift_at(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, BanLengthError> {
        if self.is_permanent() {
            return Ok(None);
        }
        self.timed_lift_at(now)
            .map(Some)
            .ok_or(BanLengthError::OutOfRange {
                length: *self,
                start: now,
            })
    }

    fn timed_lift_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let Self::Timed {
            days,
            months,
            years,
        } = *self
        else {
            return None;
        };

        let mut day = i64::from(now.day()) + i64::from(days);
        if now.hour() >= 12 {
            day += 1;
        }

        let total_months = i64::from(now.year()) * 12
            + i64::from(now.month0())
            + i64::from(months)
            + i64::from(years) * 12;
        let year = i32::try_from(total_months.div_euclid(12)).ok()?;
        let month = u32::try_from(total_months.rem_euclid(12)).ok()? + 1;

        let date = NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_signed(TimeDelta::try_days(day - 1)?)?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc())
    }

    /// The preset lengths offered when banning a user.
    pub fn presets() -> Vec<BanPreset> {
        let mut presets = Vec::with_capacity(17);
        presets.extend((1..=6).map(|n| BanPreset::new(Self::days(n), n, TimeUnit::Day)));
        presets.extend((1..=3).map(|n| BanPreset::new(Self::days(n * 7), n, TimeUnit::Week)));
        presets.extend((1..=6).map(|n| BanPreset::new(Self::months(n), n, TimeUnit::Month)));
        presets.extend((1..=2).map(|n| BanPreset::new(Self::years(n), n, TimeUnit::Year)));
        presets
    }
}

impl FromStr for BanLength {
    type Err = BanLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key == "perm" || key == "---" {
            return Ok(Self::Permanent);
        }

        let parts: Vec<&str> = key.split('-').collect();
        let [days, months, years] = parts.as_slice() else {
            return Err(BanLengthError::Invalid(s.to_string()));
        };
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| BanLengthError::Invalid(s.to_string()))
        };

        Ok(Self::Timed {
            days: parse(*days)?,
            months: parse(*months)?,
            years: parse(*years)?,
        })
    }
}

impl fmt::Display for BanLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timed {
                days,
                months,
                years,
            } => write!(f, "{days}-{months}-{years}"),
            Self::Permanent => f.write_str("perm"),
        }
    }
}

impl TryFrom<String> for BanLength {
    type Error = BanLengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BanLength> for String {
    fn from(length: BanLength) -> Self {
        length.to_string()
    }
}

/// Units used when describing durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// Language key for `count` of this unit (`day` or `days`).
    pub fn language_key(self, count: i64) -> &'static str {
        let singular = count == 1;
        match self {
            Self::Hour if singular => "hour",
            Self::Hour => "hours",
            Self::Day if singular => "day",
            Self::Day => "days",
            Self::Week if singular => "week",
            Self::Week => "weeks",
            Self::Month if singular => "month",
            Self::Month => "months",
            Self::Year if singular => "year",
            Self::Year => "years",
        }
    }

    fn describe(self, count: i64, lang: &Language) -> String {
        format!("{count} {}", lang.phrase(self.language_key(count)))
    }
}

/// A ban length offered in the ban form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BanPreset {
    pub length: BanLength,
    pub count: u32,
    pub unit: TimeUnit,
}

impl BanPreset {
    fn new(length: BanLength, count: u32, unit: TimeUnit) -> Self {
        Self {
            length,
            count,
            unit,
        }
    }

    /// Human label such as "2 weeks".
    pub fn label(&self, lang: &Language) -> String {
        self.unit.describe(i64::from(self.count), lang)
    }
}

/// Time left until a ban is lifted, in the largest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    pub count: i64,
    pub unit: TimeUnit,
    /// Urgency level for display (`highlight1` is the most imminent).
    pub highlight: Option<u8>,
}

impl RemainingTime {
    /// Remaining time from `now` until `lifted`.
    pub fn between(lifted: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remain = (lifted - now).num_seconds();
        let years = remain / SECONDS_PER_YEAR;
        let months = remain / SECONDS_PER_MONTH;
        let weeks = remain / SECONDS_PER_WEEK;
        let days = remain / SECONDS_PER_DAY;

        let (count, unit, highlight) = if years >= 1 {
            (years, TimeUnit::Year, None)
        } else if months >= 1 {
            (months, TimeUnit::Month, None)
        } else if weeks > 1 {
            (weeks, TimeUnit::Week, Some(3))
        } else if weeks == 1 {
            (weeks, TimeUnit::Week, Some(2))
        } else if days > 1 {
            (days, TimeUnit::Day, Some(2))
        } else if days == 1 {
            (days, TimeUnit::Day, Some(1))
        } else {
            (remain / SECONDS_PER_HOUR, TimeUnit::Hour, Some(1))
        };

        Self {
            count,
            unit,
            highlight,
        }
    }

    /// Human label such as "3 days".
    pub fn label(&self, lang: &Language) -> String {
        self.unit.describe(self.count, lang)
    }

    /// CSS class for the highlight level, e.g. `highlight2`.
    pub fn css_class(&self) -> Option<String> {
        self.highlight.map(|level| format!("highlight{level}"))
    }
}

/// A banned user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ban {
    pub uid: u32,
    /// Administrator who placed the ban.
    pub admin_uid: u32,
    /// Group to restore once the ban is lifted.
    pub old_group: u32,
    /// Group the user was moved into.
    pub ban_group: u32,
    pub length: BanLength,
    pub banned_at: DateTime<Utc>,
    /// `None` for permanent bans.
    pub lifted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: String,
}

impl Ban {
    /// Ban `uid` starting at `now`.
    ///
    /// Fails when a timed length has no representable lift date.
    pub fn new(
        uid: u32,
        admin_uid: u32,
        old_group: u32,
        ban_group: u32,
        length: BanLength,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, BanLengthError> {
        Ok(Self {
            uid,
            admin_uid,
            old_group,
            ban_group,
            length,
            banned_at: now,
            lifted: length.lift_at(now)?,
            reason: reason.into(),
        })
    }

    pub fn is_permanent(&self) -> bool {
        self.length.is_permanent()
    }

    /// Whether the ban's lift date has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.lifted.is_some_and(|lifted| lifted <= now)
    }

    /// Time left on a timed ban.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<RemainingTime> {
        self.lifted.map(|lifted| RemainingTime::between(lifted, now))
    }

    /// Statements that restore the user's group and drop the ban record.
    pub fn lift_statements(&self) -> [String; 2] {
        let restore = Query::update()
            .table(Users::Table)
            .value(Users::Usergroup, self.old_group)
            .and_where(Expr::col(Users::Uid).eq(self.uid))
            .to_string(PostgresQueryBuilder);
        let delete = Query::delete()
            .from_table(Banned::Table)
            .and_where(Expr::col(Banned::Uid).eq(self.uid))
            .to_string(PostgresQueryBuilder);
        [restore, delete]
    }
}

/// Select the timed bans whose lift date has passed.
///
/// Permanent bans store no lift date and are never selected.
pub fn expired_bans_query(now: DateTime<Utc>) -> String {
    Query::select()
        .columns([Banned::Uid, Banned::Oldgroup])
        .from(Banned::Table)
        .and_where(Expr::col(Banned::Lifted).is_not_null())
        .and_where(Expr::col(Banned::Lifted).lte(now.timestamp()))
        .to_string(PostgresQueryBuilder)
}
