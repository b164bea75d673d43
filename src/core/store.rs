//! Collaborator interfaces and their implementations
//!
//! - `EntryHistoryProvider`: recent journal entries, newest first
//! - `BehavioralLogProvider`: the five behavioral series, oldest first
//! - `AnalysisStore`: analyses keyed by entry id
//!
//! `JsonStore` implements all three on top of a data directory. Files that
//! are missing or unreadable load as empty; only writes can fail.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::reflection::entry_id;
use crate::error::StoreError;
use crate::types::{
    Analysis, BehavioralLog, JournalEntry, LocationRecord, MusicRecord, ScreenTimeRecord,
    SleepRecord, SuggestionType, UsageLog, WorkoutRecord,
};

pub const ENTRIES_FILE: &str = "entries.json";
pub const ANALYSES_FILE: &str = "analyses.json";
pub const BEHAVIOR_FILE: &str = "behavior.json";
pub const USAGE_FILE: &str = "usage.json";

/// Source of past journal entries
pub trait EntryHistoryProvider {
    /// Entries dated within the last `days` days before `now`, newest first
    fn recent_entries(&self, days: i64, now: NaiveDateTime) -> Vec<JournalEntry>;
}

/// Source of logged behavioral signals
pub trait BehavioralLogProvider {
    fn sleep(&self) -> &[SleepRecord];
    fn workouts(&self) -> &[WorkoutRecord];
    fn music(&self) -> &[MusicRecord];
    fn locations(&self) -> &[LocationRecord];
    fn screen_time(&self) -> &[ScreenTimeRecord];
}

/// Keyed storage for analyses
pub trait AnalysisStore {
    fn save(&mut self, entry_id: &str, analysis: Analysis) -> Result<(), StoreError>;
    fn load_all(&self) -> BTreeMap<String, Analysis>;
}

/// Entries within the window, newest first
pub fn recent_from(entries: &[JournalEntry], days: i64, now: NaiveDateTime) -> Vec<JournalEntry> {
    let cutoff = now - Duration::days(days);
    let mut recent: Vec<JournalEntry> = entries
        .iter()
        .filter(|e| e.date >= cutoff && e.date <= now)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
}

impl EntryHistoryProvider for Vec<JournalEntry> {
    fn recent_entries(&self, days: i64, now: NaiveDateTime) -> Vec<JournalEntry> {
        recent_from(self, days, now)
    }
}

impl BehavioralLogProvider for BehavioralLog {
    fn sleep(&self) -> &[SleepRecord] {
        BehavioralLog::sleep(self)
    }

    fn workouts(&self) -> &[WorkoutRecord] {
        BehavioralLog::workouts(self)
    }

    fn music(&self) -> &[MusicRecord] {
        BehavioralLog::music(self)
    }

    fn locations(&self) -> &[LocationRecord] {
        BehavioralLog::locations(self)
    }

    fn screen_time(&self) -> &[ScreenTimeRecord] {
        BehavioralLog::screen_time(self)
    }
}

impl AnalysisStore for BTreeMap<String, Analysis> {
    fn save(&mut self, entry_id: &str, analysis: Analysis) -> Result<(), StoreError> {
        self.insert(entry_id.to_string(), analysis);
        Ok(())
    }

    fn load_all(&self) -> BTreeMap<String, Analysis> {
        self.clone()
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// File-backed store in a single data directory
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    entries: Vec<JournalEntry>,
    analyses: BTreeMap<String, Analysis>,
    behavior: BehavioralLog,
    usage: UsageLog,
}

impl JsonStore {
    /// Open (and create) a data directory, loading whatever parses
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(dir.display().to_string(), e))?;

        let mut entries: Vec<JournalEntry> = load_or_default(&dir.join(ENTRIES_FILE));
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        let analyses: BTreeMap<String, Analysis> = load_or_default(&dir.join(ANALYSES_FILE));
        let mut behavior: BehavioralLog = load_or_default(&dir.join(BEHAVIOR_FILE));
        behavior.enforce_retention();
        let usage: UsageLog = load_or_default(&dir.join(USAGE_FILE));

        debug!(
            dir = %dir.display(),
            entries = entries.len(),
            analyses = analyses.len(),
            behavior_records = behavior.len(),
            "opened store"
        );

        Ok(Self {
            dir,
            entries,
            analyses,
            behavior,
            usage,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Insert in date order and persist; a failed write leaves memory unchanged
    pub fn add_entry(&mut self, entry: JournalEntry) -> Result<(), StoreError> {
        let pos = self.entries.partition_point(|e| e.date <= entry.date);
        self.entries.insert(pos, entry);
        if let Err(e) = write_json(&self.dir.join(ENTRIES_FILE), &self.entries) {
            self.entries.remove(pos);
            return Err(e);
        }
        Ok(())
    }

    /// Id for `entry` that no stored entry or analysis uses yet
    pub fn next_entry_id(&self, entry: &JournalEntry) -> String {
        let mut seq = self
            .entries
            .iter()
            .filter(|e| e.date == entry.date && e.content == entry.content)
            .count();
        loop {
            let id = entry_id(entry.date, &entry.content, seq);
            if !self.analyses.contains_key(&id) {
                return id;
            }
            seq += 1;
        }
    }

    /// Persist an entry with its analysis under a fresh id.
    ///
    /// The analysis is written first. If the entry write then fails the
    /// analysis is taken back out, so the two files never disagree.
    pub fn add_analyzed_entry(
        &mut self,
        entry: JournalEntry,
        analysis: Analysis,
    ) -> Result<String, StoreError> {
        let id = self.next_entry_id(&entry);
        self.save(&id, analysis)?;

        if let Err(e) = self.add_entry(entry) {
            self.analyses.remove(&id);
            if let Err(rollback) = write_json(&self.dir.join(ANALYSES_FILE), &self.analyses) {
                warn!(entry_id = %id, error = %rollback, "could not roll back analysis");
            }
            return Err(e);
        }

        debug!(entry_id = %id, "stored entry");
        Ok(id)
    }

    pub fn behavior(&self) -> &BehavioralLog {
        &self.behavior
    }

    /// Apply a change to the behavioral log and persist it
    pub fn update_behavior<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BehavioralLog),
    {
        change(&mut self.behavior);
        write_json(&self.dir.join(BEHAVIOR_FILE), &self.behavior)
    }

    pub fn clear_behavior(&mut self) -> Result<(), StoreError> {
        self.update_behavior(BehavioralLog::clear)
    }

    pub fn usage(&self) -> &UsageLog {
        &self.usage
    }

    /// Record that the user picked a suggestion of this type
    pub fn track_suggestion_used(&mut self, kind: SuggestionType) -> Result<(), StoreError> {
        self.usage.record(kind);
        write_json(&self.dir.join(USAGE_FILE), &self.usage)
    }
}

impl EntryHistoryProvider for JsonStore {
    fn recent_entries(&self, days: i64, now: NaiveDateTime) -> Vec<JournalEntry> {
        recent_from(&self.entries, days, now)
    }
}

impl BehavioralLogProvider for JsonStore {
    fn sleep(&self) -> &[SleepRecord] {
        self.behavior.sleep()
    }

    fn workouts(&self) -> &[WorkoutRecord] {
        self.behavior.workouts()
    }

    fn music(&self) -> &[MusicRecord] {
        self.behavior.music()
    }

    fn locations(&self) -> &[LocationRecord] {
        self.behavior.locations()
    }

    fn screen_time(&self) -> &[ScreenTimeRecord] {
        self.behavior.screen_time()
    }
}

impl AnalysisStore for JsonStore {
    fn save(&mut self, entry_id: &str, analysis: Analysis) -> Result<(), StoreError> {
        let previous = self.analyses.insert(entry_id.to_string(), analysis);
        if let Err(e) = write_json(&self.dir.join(ANALYSES_FILE), &self.analyses) {
            match previous {
                Some(previous) => self.analyses.insert(entry_id.to_string(), previous),
                None => self.analyses.remove(entry_id),
            };
            return Err(e);
        }
        Ok(())
    }

    fn load_all(&self) -> BTreeMap<String, Analysis> {
        self.analyses.clone()
    }
}

/// Read a JSON file; anything that fails to load is treated as absent
fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable store file, treating as empty");
            return T::default();
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed store file, treating as empty");
            T::default()
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| StoreError::io(path.display().to_string(), e))
}
