//! The goal list: goals ordered by priority, each with its latest linked entries.

use crate::dates::{DayBoundary, parse_timestamp};
use crate::records::{Goal, JournalEntry};

/// Linked entries shown under each goal.
pub const DEFAULT_ENTRIES_PER_GOAL: usize = 5;

#[derive(Debug, PartialEq)]
pub struct GoalSummary<'a> {
    pub goal: &'a Goal,
    /// Newest first, at most `max_entries` of them.
    pub recent_entries: Vec<&'a JournalEntry>,
    /// Every linked entry, including those not in `recent_entries`.
    pub linked_total: usize,
}

/// Orders goals High, Medium, Low (input order within a priority) and
/// attaches the newest `max_entries` entries linked to each.
pub fn summarize_goals<'a>(
    goals: &'a [Goal],
    entries: &'a [JournalEntry],
    boundary: DayBoundary,
    max_entries: usize,
) -> Vec<GoalSummary<'a>> {
    let mut ordered: Vec<&'a Goal> = goals.iter().collect();
    ordered.sort_by_key(|goal| goal.priority.rank());

    ordered
        .into_iter()
        .map(|goal| {
            let mut linked: Vec<_> = entries
                .iter()
                .filter(|entry| goal.is_linked_to(entry))
                .map(|entry| (parse_timestamp(&entry.date, boundary), entry))
                .collect();
            linked.sort_by(|(a, _), (b, _)| b.cmp(a));
            let linked_total = linked.len();

            GoalSummary {
                goal,
                recent_entries: linked
                    .into_iter()
                    .take(max_entries)
                    .map(|(_, entry)| entry)
                    .collect(),
                linked_total,
            }
        })
        .collect()
}
