//! Moving the reference date and naming the period it shows.

use crate::dates::DateKey;
use crate::grid::{DAYS_PER_WEEK, GridCell, ViewMode, grid_dates};
use strum_macros::{AsRefStr, EnumString};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    #[strum(serialize = "backward", serialize = "prev")]
    Backward,
    #[strum(serialize = "forward", serialize = "next")]
    Forward,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Steps the reference date one grid unit in `direction`.
///
/// Month steps keep the day of month, clamped to the target month's last day.
///
/// ```
/// # use moodlog_core::dates::DateKey;
/// # use moodlog_core::grid::ViewMode;
/// # use moodlog_core::navigator::{advance, Direction};
/// let jan_31 = DateKey::from_ymd(2024, 1, 31).unwrap();
/// let next = advance(jan_31, ViewMode::Monthly, Direction::Forward);
/// assert_eq!(next, DateKey::from_ymd(2024, 2, 29).unwrap());
/// ```
pub fn advance(reference: DateKey, mode: ViewMode, direction: Direction) -> DateKey {
    advance_by(reference, mode, direction, 1)
}

/// Steps `steps` grid units at once. Month steps keep the reference's day of
/// month where the target month has it. A move past chrono's range leaves
/// the reference unchanged.
pub fn advance_by(reference: DateKey, mode: ViewMode, direction: Direction, steps: u32) -> DateKey {
    match mode {
        ViewMode::Monthly => {
            let months = i32::try_from(steps).unwrap_or(i32::MAX);
            reference.add_months_clamped(direction.sign() * months)
        }
        ViewMode::Weekly => {
            let days = i64::from(steps) * DAYS_PER_WEEK as i64;
            reference.shift_days(i64::from(direction.sign()) * days)
        }
    }
}

/// Human-readable name of the period shown for `reference`.
pub fn period_label(reference: DateKey, mode: ViewMode) -> String {
    match mode {
        ViewMode::Monthly => month_label(reference),
        ViewMode::Weekly => {
            let dates = grid_dates(reference, mode);
            match (dates.first(), dates.last()) {
                (Some(first), Some(last)) => week_span_label(*first, *last),
                _ => month_label(reference),
            }
        }
    }
}

/// Like [`period_label`], but reads the week span from already built cells.
pub fn label_for_cells(reference: DateKey, mode: ViewMode, cells: &[GridCell<'_>]) -> String {
    match (mode, cells.first(), cells.last()) {
        (ViewMode::Weekly, Some(first), Some(last)) => week_span_label(first.date, last.date),
        _ => period_label(reference, mode),
    }
}

fn month_label(reference: DateKey) -> String {
    reference.format("%B %Y").to_string()
}

/// `3 - 9 March 2024`, `28 Apr - 4 May 2024` or `Dec 29, 2024 - Jan 4, 2025`.
fn week_span_label(first: DateKey, last: DateKey) -> String {
    if first.year() != last.year() {
        format!(
            "{} - {}",
            first.format("%b %-d, %Y"),
            last.format("%b %-d, %Y")
        )
    } else if first.month() != last.month() {
        format!("{} - {}", first.format("%-d %b"), last.format("%-d %b %Y"))
    } else {
        format!("{} - {}", first.format("%-d"), last.format("%-d %B %Y"))
    }
}
