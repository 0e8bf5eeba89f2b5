use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::render::ColorMode;

/// moodlog: calendar and list views over your journal and goals
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("calendar_mode").args(["week", "month", "prev", "next"]).multiple(true)),
    group(ArgGroup::new("list_mode").args(["list", "search", "from", "to", "sentiment", "sleep", "stress", "social"]).multiple(true)),
    group(ArgGroup::new("solo").args(["path", "goals"]).conflicts_with_all(["calendar_mode", "list_mode"])),
)]
pub struct Cli {
    /// Prints the snapshot file the views are built from
    #[arg(long, short)]
    pub path: bool,
    /// Read entries and goals from this JSON export instead of the configured one
    #[arg(long, env = "MOODLOG_DATA")]
    pub data: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, env = "MOODLOG_LOG", default_value = "warn")]
    pub log_level: String,

    /// Reference date for the calendar (e.g., `today`, `last month`, `2024-02-14`)
    #[arg(long, short)]
    pub date: Option<String>,
    /// Show the week containing the reference date
    #[arg(long, short, conflicts_with = "month")]
    pub week: bool,
    /// Show the month containing the reference date
    #[arg(long, short)]
    pub month: bool,
    /// Step back N months or weeks from the reference date
    #[arg(long, value_name = "N", conflicts_with = "next")]
    pub prev: Option<u32>,
    /// Step forward N months or weeks from the reference date
    #[arg(long, value_name = "N")]
    pub next: Option<u32>,

    /// List entries, newest first
    #[arg(long, short)]
    pub list: bool,
    /// Only entries whose title contains this text (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,
    /// Only entries on or after this date (e.g., `--from "last week"`)
    #[arg(long)]
    pub from: Option<String>,
    /// Only entries on or before this date, inclusive
    #[arg(long)]
    pub to: Option<String>,
    /// Only entries with this mood rating (1 = Terrible .. 5 = Great)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub sentiment: Option<u8>,
    /// Only entries with this sleep rating (1 = Very Poor .. 5 = Excellent)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub sleep: Option<u8>,
    /// Only entries with this stress rating (1 = Very High .. 5 = Very Low)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub stress: Option<u8>,
    /// Only entries with this social rating (1 = Very Isolated .. 5 = Very Social)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub social: Option<u8>,

    /// List goals with priority and progress
    #[arg(long, short)]
    pub goals: bool,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }

    /// Whether any list filter was given, which implies `--list`.
    pub fn wants_list(&self) -> bool {
        self.list
            || self.search.is_some()
            || self.from.is_some()
            || self.to.is_some()
            || self.sentiment.is_some()
            || self.sleep.is_some()
            || self.stress.is_some()
            || self.social.is_some()
    }
}
