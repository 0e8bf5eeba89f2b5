//! In-memory copy of the journal store's entries and goals.
//!
//! The store itself lives elsewhere; this module only reads the JSON export it
//! produces (`{"entries": [...], "goals": [...]}`) and tells subscribers when
//! a reload changed either collection.

use crate::events::{InvalidationBus, ResourceTag};
use crate::records::{Goal, JournalEntry};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    pub entries: Vec<JournalEntry>,
    pub goals: Vec<Goal>,
}

/// A record that could not be read and was left out of the snapshot.
///
/// This is used to report problems without rejecting the whole file.
#[derive(Debug)]
pub enum LoadWarning {
    SkippedEntry { position: usize, error: String },
    SkippedGoal { position: usize, error: String },
}

/// The result of a load, containing the snapshot and any skipped records.
#[derive(Debug)]
pub struct LoadReport {
    pub snapshot: Snapshot,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default, alias = "journalEntries")]
    entries: Vec<Value>,
    #[serde(default)]
    goals: Vec<Value>,
}

impl Snapshot {
    /// Parses an export. The document must be valid JSON with the expected
    /// shape; individual records that do not fit are skipped and reported.
    pub fn from_json(s: &str) -> Result<LoadReport> {
        let raw: RawSnapshot = serde_json::from_str(s).context("parsing snapshot JSON")?;
        let mut warnings = Vec::new();

        let entries = read_records(raw.entries, |position, error| {
            warnings.push(LoadWarning::SkippedEntry { position, error })
        });
        let goals = read_records(raw.goals, |position, error| {
            warnings.push(LoadWarning::SkippedGoal { position, error })
        });

        Ok(LoadReport {
            snapshot: Snapshot { entries, goals },
            warnings,
        })
    }

    /// Reads an export from disk. A missing file is an empty journal.
    pub fn load(path: &Path) -> Result<LoadReport> {
        match fs::read_to_string(path) {
            Ok(content) => {
                Self::from_json(&content).with_context(|| format!("loading {}", path.display()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!(
                    "event=snapshot_load module=snapshot status=missing path={}",
                    path.display()
                );
                Ok(LoadReport {
                    snapshot: Snapshot::default(),
                    warnings: Vec::new(),
                })
            }
            Err(error) => Err(error).with_context(|| format!("reading {}", path.display())),
        }
    }
}

fn read_records<T, F>(values: Vec<Value>, mut on_error: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnMut(usize, String),
{
    values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!("event=snapshot_skip module=snapshot position={position} error={error}");
                on_error(position, error.to_string());
                None
            }
        })
        .collect()
}

/// Owns the current snapshot and announces changes on reload.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    snapshot: Snapshot,
    warnings: Vec<LoadWarning>,
    bus: InvalidationBus,
}

impl SnapshotStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let report = Snapshot::load(&path)?;
        info!(
            "event=snapshot_load module=snapshot status=ok entries={} goals={} skipped={}",
            report.snapshot.entries.len(),
            report.snapshot.goals.len(),
            report.warnings.len()
        );
        Ok(Self {
            path,
            snapshot: report.snapshot,
            warnings: report.warnings,
            bus: InvalidationBus::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Records skipped by the most recent load.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn subscribe(&self) -> Receiver<ResourceTag> {
        self.bus.subscribe()
    }

    /// Re-reads the file and publishes a tag per collection that changed.
    /// On error the previous snapshot is kept.
    pub fn reload(&mut self) -> Result<Vec<ResourceTag>> {
        let report = Snapshot::load(&self.path)?;
        let mut changed = Vec::new();
        if report.snapshot.entries != self.snapshot.entries {
            changed.push(ResourceTag::JournalEntries);
        }
        if report.snapshot.goals != self.snapshot.goals {
            changed.push(ResourceTag::Goals);
        }

        self.snapshot = report.snapshot;
        self.warnings = report.warnings;
        for tag in &changed {
            self.bus.publish(*tag);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Calendar, DateKey, DayBoundary, ViewMode};
    use tempfile::tempdir;

    const EXPORT: &str = r#"{
        "entries": [
            {"id": 1, "date": "2024-03-01T08:00:00", "title": "Good day", "sentiment_level": 5},
            {"id": 2, "title": "no date at all"},
            {"title": "missing id"}
        ],
        "goals": [
            {"id": 10, "title": "Read", "priority": "Low", "target_date": "2024-03-31"},
            {"id": 11, "title": "Stretch", "priority": "eventually"}
        ]
    }"#;

    #[test]
    fn malformed_records_are_skipped_and_reported() {
        let report = Snapshot::from_json(EXPORT).unwrap();
        assert_eq!(report.snapshot.entries.len(), 2);
        assert_eq!(report.snapshot.goals.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(
            report.warnings[0],
            LoadWarning::SkippedEntry { position: 2, .. }
        ));
        assert!(matches!(
            report.warnings[1],
            LoadWarning::SkippedGoal { position: 1, .. }
        ));
    }

    #[test]
    fn store_export_with_null_fields_keeps_every_entry() {
        let export = r#"{
            "entries": [
                {
                    "id": 1, "title": "Run", "date": "2024-03-01", "content": "5k",
                    "sentiment_level": 4, "sleep_quality": null,
                    "created_at": "2024-03-01T21:00:00", "updated_at": null,
                    "formatted_content": null, "activities": null, "sentiments": null,
                    "goals": null
                },
                {
                    "id": 2, "title": "Books", "date": "2024-03-02", "content": "",
                    "created_at": "2024-03-02T20:00:00",
                    "activities": "running, reading", "sentiments": "calm",
                    "goals": [{"id": 10, "title": "Read"}]
                },
                {"id": 3, "title": "Draft", "date": null, "content": null}
            ],
            "goals": [
                {
                    "id": 10, "title": "Read", "type": "habit", "category": "Growth",
                    "priority": "High", "targetDate": null, "description": null,
                    "progress": 40, "created_at": "2024-01-01T00:00:00",
                    "journal_entries": [{"id": 2, "title": "Books", "activities": null}]
                }
            ]
        }"#;
        let report = Snapshot::from_json(export).unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);

        let Snapshot { entries, goals } = &report.snapshot;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].activities, ["running", "reading"]);
        assert_eq!(entries[1].keywords, ["calm"]);
        assert_eq!(entries[2].date, "");
        assert!(goals[0].is_linked_to(&entries[1]));

        let calendar = Calendar::new(DateKey::from_ymd(2024, 3, 1).unwrap(), ViewMode::Monthly)
            .with_boundary(DayBoundary::Utc);
        let cells = calendar.build_grid(entries, goals);
        let placed: usize = cells.iter().map(|c| c.entries.len()).sum();
        assert_eq!(placed, 2);
    }

    #[test]
    fn calendar_shaped_export_is_accepted() {
        let report =
            Snapshot::from_json(r#"{"journalEntries": [{"id": 1, "date": "2024-01-01"}]}"#)
                .unwrap();
        assert_eq!(report.snapshot.entries.len(), 1);
        assert!(report.snapshot.goals.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Snapshot::from_json("[1, 2").is_err());
    }

    #[test]
    fn missing_file_is_an_empty_snapshot() {
        let tmp = tempdir().unwrap();
        let report = Snapshot::load(&tmp.path().join("nope.json")).unwrap();
        assert_eq!(report.snapshot, Snapshot::default());
    }

    #[test]
    fn reload_publishes_only_changed_collections() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("snapshot.json");
        fs::write(&path, EXPORT).unwrap();

        let mut store = SnapshotStore::open(path.clone()).unwrap();
        let updates = store.subscribe();
        assert_eq!(store.warnings().len(), 2);

        assert!(store.reload().unwrap().is_empty());
        assert!(updates.try_recv().is_err());

        let edited = EXPORT.replace("Good day", "Great day");
        fs::write(&path, edited).unwrap();
        assert_eq!(store.reload().unwrap(), [ResourceTag::JournalEntries]);
        assert_eq!(updates.try_recv().unwrap(), ResourceTag::JournalEntries);
        assert!(updates.try_recv().is_err());
        assert_eq!(store.snapshot().entries[0].title, "Great day");
    }
}
