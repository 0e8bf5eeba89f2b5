use crate::{
    Config,
    calendar::Calendar,
    dates::DateKey,
    goals::{DEFAULT_ENTRIES_PER_GOAL, GoalSummary, summarize_goals},
    parse_input::{ParseOptions, parse_date_token},
    snapshot::SnapshotStore,
};
use anyhow::Result;

pub struct Moodlog {
    pub config: Config,
    pub store: SnapshotStore,
}

impl Moodlog {
    /// Creates a new `Moodlog` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Moodlog` instance with a specific `Config`.
    ///
    /// This also loads the snapshot named by `config.data_file`.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = SnapshotStore::open(config.data_file.clone())?;
        Ok(Self { config, store })
    }

    /// The day "today" is, by the configured day boundary.
    pub fn today(&self) -> DateKey {
        DateKey::today(self.config.day_boundary)
    }

    /// Resolves a typed date (keyword, synonym or configured format) relative to today.
    pub fn parse_date(&self, token: &str) -> Option<DateKey> {
        let formats = self.config.input_formats();
        let opts = ParseOptions {
            reference_date: Some(self.today()),
            formats: Some(formats.as_slice()),
        };
        parse_date_token(token, Some(opts))
    }

    /// Loaded goals by priority, each with its latest linked entries.
    pub fn goal_summaries(&self) -> Vec<GoalSummary<'_>> {
        let snapshot = self.store.snapshot();
        summarize_goals(
            &snapshot.goals,
            &snapshot.entries,
            self.config.day_boundary,
            DEFAULT_ENTRIES_PER_GOAL,
        )
    }

    /// A calendar session opened on `reference`, or on today.
    pub fn calendar(&self, reference: Option<DateKey>) -> Calendar {
        Calendar::with_config(&self.config, reference)
    }
}
