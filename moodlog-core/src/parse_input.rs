use chrono::NaiveDate;

use crate::dates::DateKey;
use crate::keywords::{Keyword, Keywords};

/// Default accepted input date formats (parsing only).
const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// The day relative keywords are resolved against. Usually today.
    pub reference_date: Option<DateKey>,
    /// A slice of `chrono` format strings to try for parsing dates.
    pub formats: Option<&'a [&'a str]>,
}

/// Parses a user-typed date token into a day.
///
/// This function understands, in order:
/// 1.  **Relative keywords**: `today`, `yesterday`, `tomorrow`, `last week`,
///     `next week`, `last month`, `next month`, and any user-defined synonyms
///     (case-insensitive). Week keywords move seven days, month keywords move a
///     whole month clamping the day of month.
/// 2.  **Formatted dates**: any format string provided in `formats`.
///
/// Returns `None` when nothing matches.
///
/// # Examples
///
/// ```
/// # use moodlog_core::dates::DateKey;
/// # use moodlog_core::parse_input::{parse_date_token, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: DateKey::from_ymd(2024, 3, 31),
///     formats: Some(&["%d/%m/%Y"]),
/// };
///
/// assert_eq!(parse_date_token("last month", Some(opts)), DateKey::from_ymd(2024, 2, 29));
/// assert_eq!(parse_date_token("01/12/2023", Some(opts)), DateKey::from_ymd(2023, 12, 1));
/// assert_eq!(parse_date_token("someday", Some(opts)), None);
/// ```
pub fn parse_date_token(s: &str, options: Option<ParseOptions>) -> Option<DateKey> {
    let options = options.unwrap_or_default();
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| DateKey::today(Default::default()));
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);
    let s = s.trim();

    if let Some(keyword) = Keywords::lookup(s) {
        return Some(match keyword {
            Keyword::Today => reference_date,
            Keyword::Yesterday => reference_date.shift_days(-1),
            Keyword::Tomorrow => reference_date.shift_days(1),
            Keyword::LastWeek => reference_date.shift_days(-7),
            Keyword::NextWeek => reference_date.shift_days(7),
            Keyword::LastMonth => reference_date.add_months_clamped(-1),
            Keyword::NextMonth => reference_date.add_months_clamped(1),
        });
    }

    // Fallback to formatted dates
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(DateKey::from)
}
