mod cli;
mod cli_modes;
mod logging;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::{CliModeResult, calendar_mode, goals_mode, list_mode};
use log::info;
use moodlog_core::{Config, Moodlog};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("moodlog: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    let _logger = logging::init_logging(&cli.log_level)?;

    let mut config = Config::load()?;
    if let Some(data) = &cli.data {
        config.data_file = data.clone();
    }
    info!(
        "event=config_loaded module=cli data_file={} view={} boundary={}",
        config.data_file.display(),
        config.default_view.as_ref(),
        config.day_boundary.as_ref()
    );

    let renderer = Renderer::new(Some(RenderOptions {
        list_date_format: config.list_date_format.clone(),
        use_color: cli.color.use_color(),
        boundary: config.day_boundary,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", config.data_file.display()));
        return Ok(());
    }

    let moodlog = Moodlog::with_config(config)?;

    if let CliModeResult::Finish = goals_mode(&cli, &renderer, &moodlog)? {
        renderer.print_warnings(moodlog.store.warnings());
        return Ok(());
    }
    if let CliModeResult::Finish = list_mode(&cli, &renderer, &moodlog)? {
        renderer.print_warnings(moodlog.store.warnings());
        return Ok(());
    }
    calendar_mode(&cli, &renderer, &moodlog)?;
    renderer.print_warnings(moodlog.store.warnings());
    Ok(())
}
