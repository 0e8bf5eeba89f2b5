pub mod calendar;
pub mod config;
pub mod dates;
pub mod events;
pub mod filter;
pub mod goals;
pub mod grid;
pub mod index;
pub mod keywords;
pub mod limiter;
pub mod moodlog;
pub mod navigator;
pub mod parse_input;
pub mod records;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use calendar::Calendar;
pub use config::Config;
pub use dates::{DateKey, DayBoundary};
pub use filter::{FilterCriteria, filter_entries};
pub use goals::{GoalSummary, summarize_goals};
pub use grid::{GridCell, ViewMode, build_grid};
pub use moodlog::Moodlog;
pub use navigator::{Direction, advance, period_label};
pub use records::{Goal, JournalEntry, Priority, RatingMetric};
pub use snapshot::{LoadWarning, Snapshot, SnapshotStore};
