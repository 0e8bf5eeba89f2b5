//! The `Calendar` session: the one piece of state the presentation layer holds.

use crate::config::Config;
use crate::dates::{DateKey, DayBoundary};
use crate::filter::{FilterCriteria, filter_entries};
use crate::grid::{GridCell, ViewMode, build_grid};
use crate::index::{entry_index, goal_index};
use crate::limiter::{CellDisplay, CellLimits, limit_cell};
use crate::navigator::{Direction, advance_by, period_label};
use crate::records::{Goal, JournalEntry};
use log::debug;

/// Holds the reference date and view mode, and answers every calendar and
/// list query against collections supplied by the caller.
///
/// Nothing is cached between calls: indexes and grids are rebuilt from the
/// given collections each time.
#[derive(Debug, Clone)]
pub struct Calendar {
    reference: DateKey,
    mode: ViewMode,
    boundary: DayBoundary,
    limits: CellLimits,
}

impl Calendar {
    pub fn new(reference: DateKey, mode: ViewMode) -> Self {
        Self {
            reference,
            mode,
            boundary: DayBoundary::default(),
            limits: CellLimits::default(),
        }
    }

    /// A calendar using the configured view, day boundary and cell limits.
    /// Without a `reference` it opens on today.
    pub fn with_config(config: &Config, reference: Option<DateKey>) -> Self {
        Self {
            reference: reference.unwrap_or_else(|| DateKey::today(config.day_boundary)),
            mode: config.default_view,
            boundary: config.day_boundary,
            limits: config.limits,
        }
    }

    pub fn with_boundary(mut self, boundary: DayBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_limits(mut self, limits: CellLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn reference(&self) -> DateKey {
        self.reference
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    pub fn limits(&self) -> &CellLimits {
        &self.limits
    }

    /// Moves one month or week and returns the new reference date.
    pub fn navigate(&mut self, direction: Direction) -> DateKey {
        self.navigate_by(direction, 1)
    }

    /// Moves `steps` months or weeks in one go.
    pub fn navigate_by(&mut self, direction: Direction, steps: u32) -> DateKey {
        self.reference = advance_by(self.reference, self.mode, direction, steps);
        debug!(
            "event=navigate module=calendar direction={} steps={steps} mode={} reference={}",
            direction.as_ref(),
            self.mode.as_ref(),
            self.reference
        );
        self.reference
    }

    pub fn period_label(&self) -> String {
        period_label(self.reference, self.mode)
    }

    /// Builds the current grid, marking today by the configured clock.
    pub fn build_grid<'a>(
        &self,
        entries: &'a [JournalEntry],
        goals: &'a [Goal],
    ) -> Vec<GridCell<'a>> {
        self.build_grid_at(DateKey::today(self.boundary), entries, goals)
    }

    /// Builds the current grid as if `today` were the current day.
    pub fn build_grid_at<'a>(
        &self,
        today: DateKey,
        entries: &'a [JournalEntry],
        goals: &'a [Goal],
    ) -> Vec<GridCell<'a>> {
        let entries = entry_index(entries, self.boundary);
        let goals = goal_index(goals, self.boundary);
        debug!(
            "event=build_grid module=calendar mode={} reference={} entries={} goals={} undated_goals={}",
            self.mode.as_ref(),
            self.reference,
            entries.dated_len(),
            goals.dated_len(),
            goals.undated_len()
        );
        build_grid(self.reference, self.mode, today, &entries, &goals)
    }

    /// Applies the display caps of the current view to a built cell.
    pub fn display<'c, 'a>(&self, cell: &'c GridCell<'a>) -> CellDisplay<'c, 'a> {
        limit_cell(cell, self.mode, &self.limits)
    }

    pub fn filter_entries<'a>(
        &self,
        entries: &'a [JournalEntry],
        criteria: &FilterCriteria,
    ) -> Vec<&'a JournalEntry> {
        filter_entries(entries, criteria, self.boundary)
    }
}
