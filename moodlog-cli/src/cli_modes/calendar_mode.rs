use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, bail};
use moodlog_core::{Direction, Moodlog, ViewMode};

/// The default mode: draws the month or week around the reference date.
pub fn calendar_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    let reference = match cli.date.as_deref() {
        Some(token) => match moodlog.parse_date(token) {
            Some(date) => Some(date),
            None => bail!("Not a valid date or keyword: '{token}'"),
        },
        None => None,
    };

    let mut calendar = moodlog.calendar(reference);
    if cli.week {
        calendar.set_mode(ViewMode::Weekly);
    } else if cli.month {
        calendar.set_mode(ViewMode::Monthly);
    }

    match (cli.prev, cli.next) {
        (Some(n), _) => {
            calendar.navigate_by(Direction::Backward, n);
        }
        (None, Some(n)) => {
            calendar.navigate_by(Direction::Forward, n);
        }
        (None, None) => {}
    }

    let snapshot = moodlog.store.snapshot();
    let cells = calendar.build_grid(&snapshot.entries, &snapshot.goals);
    renderer.print_calendar(&calendar, &cells);
    Ok(CliModeResult::Finish)
}
