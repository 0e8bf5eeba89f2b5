use crate::Config;
use crate::dates::{DateKey, DayBoundary};
use crate::grid::ViewMode;
use crate::limiter::CellLimits;
use crate::records::{Goal, JournalEntry};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_file: PathBuf) -> Config {
    Config {
        data_file,
        default_view: ViewMode::Monthly,
        day_boundary: DayBoundary::Utc,
        limits: CellLimits::default(),
        list_date_format: "%a, %d %b %Y".to_string(),
        input_date_formats: vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()],
    }
}

pub fn key(year: i32, month: u32, day: u32) -> DateKey {
    DateKey::from_ymd(year, month, day).expect("valid test date")
}

pub fn entry(id: &str, date: &str) -> JournalEntry {
    JournalEntry::new(id, date, &format!("Entry {id}"))
}

pub fn goal(id: &str, target_date: Option<&str>) -> Goal {
    Goal::new(id, &format!("Goal {id}"), target_date)
}
