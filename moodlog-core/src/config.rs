use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use directories::BaseDirs;
use log::warn;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::dates::DayBoundary;
use crate::grid::ViewMode;
use crate::keywords::Keywords;
use crate::limiter::{CellLimits, DEFAULT_OVERFLOW_THRESHOLD, DEFAULT_PER_CATEGORY_LIMIT};

pub const DEFAULT_LIST_DATE_FORMAT: &str = "%a, %d %b %Y";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON export of entries and goals the calendar reads.
    pub data_file: PathBuf,
    /// View used when the user does not pick one.
    pub default_view: ViewMode,
    /// Clock that decides day boundaries for timestamps and for "today".
    pub day_boundary: DayBoundary,
    /// Month-view caps per cell.
    pub limits: CellLimits,
    /// `chrono` format used for entry dates in the list view.
    pub list_date_format: String,
    /// Formats accepted for typed dates, tried in order after keywords.
    pub input_date_formats: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_file: Option<PathBuf>,
    default_view: Option<ViewMode>,
    day_boundary: Option<DayBoundary>,
    per_category_limit: Option<usize>,
    overflow_threshold: Option<usize>,
    list_date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    /// Optional table:
    /// [synonyms]
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::resolve(file_config))
    }

    fn resolve(file_config: FileConfig) -> Self {
        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        let limits = CellLimits {
            per_category: file_config
                .per_category_limit
                .unwrap_or(DEFAULT_PER_CATEGORY_LIMIT),
            overflow_threshold: file_config
                .overflow_threshold
                .unwrap_or(DEFAULT_OVERFLOW_THRESHOLD),
        };

        Self {
            data_file: file_config
                .data_file
                .unwrap_or_else(Self::default_data_file),
            default_view: file_config.default_view.unwrap_or_default(),
            day_boundary: file_config.day_boundary.unwrap_or_default(),
            limits,
            list_date_format: Self::checked_display_format(file_config.list_date_format),
            input_date_formats: file_config
                .input_date_formats
                .unwrap_or_else(|| vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()]),
        }
    }

    /// Keeps a configured display format only if chrono can render it.
    fn checked_display_format(format: Option<String>) -> String {
        match format {
            Some(format) if is_valid_format(&format) => format,
            Some(format) => {
                warn!(
                    "event=config_invalid module=config key=list_date_format value={format:?} fallback={DEFAULT_LIST_DATE_FORMAT:?}"
                );
                DEFAULT_LIST_DATE_FORMAT.to_string()
            }
            None => DEFAULT_LIST_DATE_FORMAT.to_string(),
        }
    }

    /// Default snapshot: `{data_dir}/moodlog/snapshot.json`
    /// - macOS:   `~/Library/Application Support/moodlog`
    /// - Linux:   `$XDG_DATA_HOME/moodlog` or `~/.local/share/moodlog`
    /// - Windows: `%APPDATA%\moodlog`
    fn default_data_file() -> PathBuf {
        let dir = match BaseDirs::new() {
            Some(base) => base.data_dir().join("moodlog"),
            None => PathBuf::from("./moodlog"),
        };
        dir.join("snapshot.json")
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("moodlog")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("moodlog").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            log::debug!("event=config_load module=config path={}", path.display());
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical keyword (eg. "today").
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }

    /// Input formats as borrowed slices, the shape `ParseOptions` expects.
    pub fn input_formats(&self) -> Vec<&str> {
        self.input_date_formats
            .iter()
            .map(String::as_str)
            .collect()
    }
}

fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
