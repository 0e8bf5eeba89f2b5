use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use moodlog_core::Moodlog;

pub fn goals_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    if !cli.goals {
        return Ok(CliModeResult::NothingToDo);
    }

    renderer.print_goals(&moodlog.goal_summaries());
    Ok(CliModeResult::Finish)
}
