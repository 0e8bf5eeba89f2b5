//! Month and week calendar grids.
//!
//! Month view: up to six Sunday-first rows anchored on the week containing
//! the 1st. A sixth row made only of next-month days is dropped.
//! Week view: the seven days Sunday..Saturday around the reference date.

use crate::dates::{DateKey, get_dates_in_range};
use crate::index::RecordIndex;
use crate::records::{Goal, JournalEntry};
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumIter, EnumString};

pub const DAYS_PER_WEEK: usize = 7;
/// Six full weeks.
pub const MONTH_GRID_CELLS: usize = 42;
/// Five full weeks, used when the sixth row lies entirely in the next month.
pub const TRIMMED_MONTH_GRID_CELLS: usize = 35;

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Monthly,
    Weekly,
}

/// One day slot of a rendered grid. Rebuilt from scratch on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    pub day_number: u32,
    pub date: DateKey,
    /// In month view, whether the day belongs to the displayed month.
    /// Always true in week view.
    pub in_primary_period: bool,
    pub is_today: bool,
    pub entries: Vec<&'a JournalEntry>,
    pub goals: Vec<&'a Goal>,
}

impl GridCell<'_> {
    pub fn record_count(&self) -> usize {
        self.entries.len() + self.goals.len()
    }
}

/// The days a grid covers, in display order.
pub fn grid_dates(reference: DateKey, mode: ViewMode) -> Vec<DateKey> {
    match mode {
        ViewMode::Monthly => {
            let start = reference.first_of_month().week_start();
            let last_of_month = reference.last_of_month();
            let mut dates = span(start, MONTH_GRID_CELLS);
            if dates
                .get(TRIMMED_MONTH_GRID_CELLS)
                .is_some_and(|first_of_sixth_row| *first_of_sixth_row > last_of_month)
            {
                dates.truncate(TRIMMED_MONTH_GRID_CELLS);
            }
            dates
        }
        ViewMode::Weekly => span(reference.week_start(), DAYS_PER_WEEK),
    }
}

fn span(start: DateKey, len: usize) -> Vec<DateKey> {
    let end = start.shift_days(len as i64 - 1);
    get_dates_in_range(start, end)
}

/// Builds the grid for `reference` and fills each cell from the indexes.
///
/// `today` marks at most one cell; pass [`DateKey::today`] for the real clock.
pub fn build_grid<'a>(
    reference: DateKey,
    mode: ViewMode,
    today: DateKey,
    entries: &RecordIndex<'a, JournalEntry>,
    goals: &RecordIndex<'a, Goal>,
) -> Vec<GridCell<'a>> {
    grid_dates(reference, mode)
        .into_iter()
        .map(|date| GridCell {
            day_number: date.day(),
            date,
            in_primary_period: match mode {
                ViewMode::Monthly => {
                    date.year() == reference.year() && date.month() == reference.month()
                }
                ViewMode::Weekly => true,
            },
            is_today: date == today,
            entries: entries.lookup(date).to_vec(),
            goals: goals.lookup(date).to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DayBoundary;
    use crate::index::{entry_index, goal_index};
    use crate::tests::common::{entry, goal, key};

    fn month(reference: DateKey) -> Vec<DateKey> {
        grid_dates(reference, ViewMode::Monthly)
    }

    #[test]
    fn month_needing_six_rows_keeps_42_cells() {
        // March 2024 starts on a Friday and has 31 days.
        let dates = month(key(2024, 3, 15));
        assert_eq!(dates.len(), MONTH_GRID_CELLS);
        assert_eq!(dates[0], key(2024, 2, 25));
        assert_eq!(dates[5], key(2024, 3, 1));
        assert_eq!(dates[41], key(2024, 4, 6));
    }

    #[test]
    fn thirty_day_month_starting_saturday_keeps_sixth_row() {
        // June 2024 starts on a Saturday; June 30 sits in row six.
        let dates = month(key(2024, 6, 1));
        assert_eq!(dates.len(), MONTH_GRID_CELLS);
        assert_eq!(dates[35], key(2024, 6, 30));
    }

    #[test]
    fn month_fitting_five_rows_is_trimmed_to_35() {
        // May 2024 starts on a Wednesday and ends on a Friday in row five.
        let dates = month(key(2024, 5, 20));
        assert_eq!(dates.len(), TRIMMED_MONTH_GRID_CELLS);
        assert_eq!(dates[0], key(2024, 4, 28));
        assert_eq!(dates[34], key(2024, 6, 1));
    }

    #[test]
    fn february_starting_sunday_with_28_days_is_trimmed() {
        // February 2015 fills exactly four rows; row six is all March.
        let dates = month(key(2015, 2, 10));
        assert_eq!(dates.len(), TRIMMED_MONTH_GRID_CELLS);
        assert_eq!(dates[0], key(2015, 2, 1));
        assert_eq!(dates[27], key(2015, 2, 28));
        assert_eq!(dates[34], key(2015, 3, 7));
    }

    #[test]
    fn leap_february_uses_the_29th() {
        let dates = month(key(2024, 2, 1));
        assert!(dates.contains(&key(2024, 2, 29)));
        assert_eq!(dates.len(), TRIMMED_MONTH_GRID_CELLS);
    }

    #[test]
    fn month_grids_are_always_35_or_42_cells() {
        for year in [2023, 2024, 2025] {
            for m in 1..=12 {
                let len = month(key(year, m, 1)).len();
                assert!(len == 35 || len == 42, "{year}-{m}: {len}");
            }
        }
    }

    #[test]
    fn week_grid_is_sunday_to_saturday_across_months() {
        let entries = Vec::new();
        let goals = Vec::new();
        let cells = build_grid(
            key(2025, 1, 1),
            ViewMode::Weekly,
            key(2000, 1, 1),
            &entry_index(&entries, DayBoundary::Utc),
            &goal_index(&goals, DayBoundary::Utc),
        );
        assert_eq!(cells.len(), DAYS_PER_WEEK);
        assert_eq!(cells[0].date, key(2024, 12, 29));
        assert_eq!(cells[6].date, key(2025, 1, 4));
        assert!(cells.iter().all(|c| c.in_primary_period));
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn month_cells_flag_primary_period_and_day_numbers() {
        let entries = Vec::new();
        let goals = Vec::new();
        let cells = build_grid(
            key(2024, 3, 15),
            ViewMode::Monthly,
            key(2024, 3, 15),
            &entry_index(&entries, DayBoundary::Utc),
            &goal_index(&goals, DayBoundary::Utc),
        );
        assert_eq!(cells[0].day_number, 25);
        assert!(!cells[0].in_primary_period);
        assert_eq!(cells[5].day_number, 1);
        assert!(cells[5].in_primary_period);
        assert!(!cells[41].in_primary_period);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        assert!(cells[19].is_today);
    }

    #[test]
    fn every_dated_record_lands_in_exactly_one_cell() {
        let entries = vec![
            entry("1", "2024-03-01T07:00:00"),
            entry("2", "2024-03-01T21:00:00"),
            entry("3", "2024-02-26T12:00:00"),
            entry("4", "garbage"),
        ];
        let goals = vec![goal("g1", Some("2024-03-31")), goal("g2", None)];
        let cells = build_grid(
            key(2024, 3, 1),
            ViewMode::Monthly,
            key(2024, 3, 1),
            &entry_index(&entries, DayBoundary::Utc),
            &goal_index(&goals, DayBoundary::Utc),
        );

        for record in &entries[..3] {
            let hits = cells
                .iter()
                .filter(|c| c.entries.iter().any(|e| e.id == record.id))
                .count();
            assert_eq!(hits, 1, "entry {}", record.id);
        }
        assert!(
            !cells
                .iter()
                .any(|c| c.entries.iter().any(|e| e.id == entries[3].id))
        );
        let goal_cells: Vec<_> = cells.iter().filter(|c| !c.goals.is_empty()).collect();
        assert_eq!(goal_cells.len(), 1);
        assert_eq!(goal_cells[0].date, key(2024, 3, 31));

        let march_first = &cells[5];
        assert_eq!(march_first.entries.len(), 2);
        assert_eq!(march_first.entries[0].id.to_string(), "1");
        assert_eq!(march_first.record_count(), 2);
    }
}
