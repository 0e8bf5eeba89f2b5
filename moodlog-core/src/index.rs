//! Day lookups over an unordered record collection.

use crate::dates::{DateKey, DayBoundary, normalize};
use crate::records::{Goal, JournalEntry};
use log::debug;
use std::collections::HashMap;

/// Groups records by the day their timestamp falls on.
///
/// Records keep their relative input order within a day. Records without a
/// usable timestamp are counted but never returned by [`RecordIndex::lookup`].
#[derive(Debug)]
pub struct RecordIndex<'a, T> {
    by_day: HashMap<DateKey, Vec<&'a T>>,
    dated: usize,
    undated: usize,
}

impl<'a, T> RecordIndex<'a, T> {
    /// Indexes `records` using `accessor` to pull each record's raw timestamp.
    pub fn build<F>(records: &'a [T], boundary: DayBoundary, accessor: F) -> Self
    where
        F: Fn(&'a T) -> Option<&'a str>,
    {
        let mut by_day: HashMap<DateKey, Vec<&'a T>> = HashMap::new();
        let mut undated = 0;

        for (position, record) in records.iter().enumerate() {
            match accessor(record) {
                Some(raw) => match normalize(raw, boundary) {
                    Some(day) => by_day.entry(day).or_default().push(record),
                    None => {
                        debug!(
                            "event=index_skip module=index reason=unparseable_date position={position} raw={raw:?}"
                        );
                        undated += 1;
                    }
                },
                None => undated += 1,
            }
        }

        Self {
            by_day,
            dated: records.len() - undated,
            undated,
        }
    }

    /// All records on `day`, in input order.
    pub fn lookup(&self, day: DateKey) -> &[&'a T] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dated_len(&self) -> usize {
        self.dated
    }

    pub fn undated_len(&self) -> usize {
        self.undated
    }
}

pub fn entry_index(
    entries: &[JournalEntry],
    boundary: DayBoundary,
) -> RecordIndex<'_, JournalEntry> {
    RecordIndex::build(entries, boundary, |entry| Some(entry.date.as_str()))
}

pub fn goal_index(goals: &[Goal], boundary: DayBoundary) -> RecordIndex<'_, Goal> {
    RecordIndex::build(goals, boundary, |goal| goal.target_date.as_deref())
}
