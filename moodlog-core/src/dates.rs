//! Day-granularity date keys and the calendar arithmetic built on them.
//!
//! Every comparison the calendar makes between a record and a grid cell goes
//! through [`DateKey`], so two timestamps on the same civil day always land in
//! the same cell regardless of their time of day.

use chrono::{
    DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, Utc,
    format::{DelayedFormat, StrftimeItems},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Timestamp layouts accepted when a record carries no UTC offset.
/// Such timestamps are read as civil time in the configured [`DayBoundary`].
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which clock decides where one civil day ends and the next begins.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// The machine's local timezone.
    #[default]
    Local,
    Utc,
}

/// A calendar day with no time component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current civil day according to `boundary`.
    pub fn today(boundary: DayBoundary) -> Self {
        match boundary {
            DayBoundary::Local => Self(Local::now().date_naive()),
            DayBoundary::Utc => Self(Utc::now().date_naive()),
        }
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn format<'a>(&self, fmt: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.0.format(fmt)
    }

    /// Moves the key by `days`, saturating at chrono's representable range.
    pub fn shift_days(self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .unwrap_or(self)
    }

    pub fn first_of_month(self) -> Self {
        self.0.with_day(1).map(Self).unwrap_or(self)
    }

    pub fn last_of_month(self) -> Self {
        let first = self.first_of_month().0;
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(Self)
            .unwrap_or(self)
    }

    /// The Sunday on or before this day.
    pub fn week_start(self) -> Self {
        let offset = self.0.weekday().num_days_from_sunday();
        self.shift_days(-i64::from(offset))
    }

    /// Moves the key by whole months. When the day of month does not exist in
    /// the target month the last day of that month is used (Jan 31 -> Feb 29).
    pub fn add_months_clamped(self, months: i32) -> Self {
        let step = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        };
        moved.map(Self).unwrap_or(self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDateTime> for DateKey {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self(timestamp.date())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Parses a record timestamp into civil time under `boundary`.
///
/// Offset-carrying RFC 3339 timestamps are converted into the boundary's
/// timezone. Timestamps without an offset, and bare `YYYY-MM-DD` dates, are
/// already civil time and are taken as-is. Anything else yields `None`.
pub fn parse_timestamp(raw: &str, boundary: DayBoundary) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(match boundary {
            DayBoundary::Local => with_offset.with_timezone(&Local).naive_local(),
            DayBoundary::Utc => with_offset.naive_utc(),
        });
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Canonicalizes a record timestamp to the day it falls on.
///
/// ```
/// # use moodlog_core::dates::{normalize, DateKey, DayBoundary};
/// let morning = normalize("2024-03-01T06:15:00", DayBoundary::Utc);
/// let night = normalize("2024-03-01 23:59:59", DayBoundary::Utc);
///
/// assert_eq!(morning, night);
/// assert_eq!(morning, DateKey::from_ymd(2024, 3, 1));
/// assert_eq!(normalize("not a date", DayBoundary::Utc), None);
/// ```
pub fn normalize(raw: &str, boundary: DayBoundary) -> Option<DateKey> {
    parse_timestamp(raw, boundary).map(DateKey::from)
}

/// Generates a vector of `DateKey`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
///
/// # Examples
///
/// ```
/// # use moodlog_core::dates::{get_dates_in_range, DateKey};
/// let start = DateKey::from_ymd(2024, 2, 28).unwrap();
/// let end = DateKey::from_ymd(2024, 3, 1).unwrap();
///
/// let dates = get_dates_in_range(start, end);
///
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[1], DateKey::from_ymd(2024, 2, 29).unwrap());
/// ```
pub fn get_dates_in_range(start: DateKey, end: DateKey) -> Vec<DateKey> {
    let mut dates = Vec::new();
    let mut current = Some(start.0);
    while let Some(day) = current {
        if day > end.0 {
            break;
        }
        dates.push(DateKey(day));
        current = day.succ_opt();
    }
    dates
}
