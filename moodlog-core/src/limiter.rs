//! Per-cell display caps for the month grid.
//!
//! Two independent rules apply in month view: each category (entries, goals)
//! shows at most `per_category` records, and a cell whose combined record
//! count exceeds `overflow_threshold` reports the excess as "+N more". The
//! two numbers are not reconciled; the caller renders both. Week view shows
//! everything.

use crate::grid::{GridCell, ViewMode};
use crate::records::{Goal, JournalEntry};

pub const DEFAULT_PER_CATEGORY_LIMIT: usize = 2;
pub const DEFAULT_OVERFLOW_THRESHOLD: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellLimits {
    pub per_category: usize,
    pub overflow_threshold: usize,
}

impl Default for CellLimits {
    fn default() -> Self {
        Self {
            per_category: DEFAULT_PER_CATEGORY_LIMIT,
            overflow_threshold: DEFAULT_OVERFLOW_THRESHOLD,
        }
    }
}

/// The visible prefix of a record list and how many were cut off.
#[derive(Debug, PartialEq)]
pub struct Limited<'s, T> {
    pub visible: &'s [T],
    pub hidden: usize,
}

/// Everything a renderer needs to draw one cell.
#[derive(Debug, PartialEq)]
pub struct CellDisplay<'c, 'a> {
    pub entries: Limited<'c, &'a JournalEntry>,
    pub goals: Limited<'c, &'a Goal>,
    /// Combined records beyond `overflow_threshold`; zero in week view.
    pub overflow: usize,
}

pub fn limit<'s, T>(items: &'s [T], mode: ViewMode, limits: &CellLimits) -> Limited<'s, T> {
    let shown = match mode {
        ViewMode::Monthly => items.len().min(limits.per_category),
        ViewMode::Weekly => items.len(),
    };
    Limited {
        visible: &items[..shown],
        hidden: items.len() - shown,
    }
}

pub fn limit_cell<'c, 'a>(
    cell: &'c GridCell<'a>,
    mode: ViewMode,
    limits: &CellLimits,
) -> CellDisplay<'c, 'a> {
    let overflow = match mode {
        ViewMode::Monthly => cell.record_count().saturating_sub(limits.overflow_threshold),
        ViewMode::Weekly => 0,
    };
    CellDisplay {
        entries: limit(&cell.entries, mode, limits),
        goals: limit(&cell.goals, mode, limits),
        overflow,
    }
}
