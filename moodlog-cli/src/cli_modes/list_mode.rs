use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, bail};
use moodlog_core::{DateKey, FilterCriteria, Moodlog};

pub fn list_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    if !cli.wants_list() {
        return Ok(CliModeResult::NothingToDo);
    }

    let criteria = FilterCriteria {
        title: cli.search.clone().unwrap_or_default(),
        start: resolve_date(moodlog, cli.from.as_deref())?,
        end: resolve_date(moodlog, cli.to.as_deref())?,
        sentiment: cli.sentiment,
        sleep: cli.sleep,
        stress: cli.stress,
        social: cli.social,
    };

    let calendar = moodlog.calendar(None);
    let entries = calendar.filter_entries(&moodlog.store.snapshot().entries, &criteria);
    renderer.print_entries(&entries);
    Ok(CliModeResult::Finish)
}

fn resolve_date(moodlog: &Moodlog, token: Option<&str>) -> Result<Option<DateKey>> {
    match token {
        None => Ok(None),
        Some(token) => match moodlog.parse_date(token) {
            Some(date) => Ok(Some(date)),
            None => bail!("Not a valid date or keyword: '{token}'"),
        },
    }
}
