//! Behavioral signal records and the bounded log that holds them
//!
//! Every series is kept in timestamp order, whatever order records are
//! logged in. Each category keeps only its most recent records:
//! - sleep, location, screen time: 30
//! - workouts, music: 50

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    LOCATION_RETENTION, MUSIC_RETENTION, SCREEN_TIME_RETENTION, SLEEP_RETENTION,
    WORKOUT_RETENTION,
};

/// One night of sleep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub timestamp: NaiveDateTime,
    pub hours: f64,
    /// Self-rated quality, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

/// One workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub timestamp: NaiveDateTime,
    pub workout_type: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub intensity: String,
}

/// One listened track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicRecord {
    pub timestamp: NaiveDateTime,
    pub track: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One visited place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub timestamp: NaiveDateTime,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Screen time for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTimeRecord {
    pub timestamp: NaiveDateTime,
    pub hours: f64,
    #[serde(default)]
    pub app_categories: Vec<String>,
}

/// Time-ordered behavioral log with per-category retention caps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralLog {
    #[serde(default)]
    sleep: Vec<SleepRecord>,
    #[serde(default)]
    workouts: Vec<WorkoutRecord>,
    #[serde(default)]
    music: Vec<MusicRecord>,
    #[serde(default)]
    locations: Vec<LocationRecord>,
    #[serde(default)]
    screen_time: Vec<ScreenTimeRecord>,
}

impl BehavioralLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_sleep(&mut self, record: SleepRecord) {
        push_capped(&mut self.sleep, record, SLEEP_RETENTION);
    }

    pub fn log_workout(&mut self, record: WorkoutRecord) {
        push_capped(&mut self.workouts, record, WORKOUT_RETENTION);
    }

    pub fn log_music(&mut self, record: MusicRecord) {
        push_capped(&mut self.music, record, MUSIC_RETENTION);
    }

    pub fn log_location(&mut self, record: LocationRecord) {
        push_capped(&mut self.locations, record, LOCATION_RETENTION);
    }

    pub fn log_screen_time(&mut self, record: ScreenTimeRecord) {
        push_capped(&mut self.screen_time, record, SCREEN_TIME_RETENTION);
    }

    /// Bulk-clear every series
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Re-sort and re-apply retention caps (used after loading from disk)
    pub fn enforce_retention(&mut self) {
        sort_and_truncate(&mut self.sleep, SLEEP_RETENTION);
        sort_and_truncate(&mut self.workouts, WORKOUT_RETENTION);
        sort_and_truncate(&mut self.music, MUSIC_RETENTION);
        sort_and_truncate(&mut self.locations, LOCATION_RETENTION);
        sort_and_truncate(&mut self.screen_time, SCREEN_TIME_RETENTION);
    }

    pub fn sleep(&self) -> &[SleepRecord] {
        &self.sleep
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn music(&self) -> &[MusicRecord] {
        &self.music
    }

    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn screen_time(&self) -> &[ScreenTimeRecord] {
        &self.screen_time
    }

    /// Total records across categories
    pub fn len(&self) -> usize {
        self.sleep.len()
            + self.workouts.len()
            + self.music.len()
            + self.locations.len()
            + self.screen_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Anything stored in a time-ordered series
trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Timestamped for SleepRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for WorkoutRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for MusicRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for LocationRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for ScreenTimeRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Insert after every record with the same or an earlier timestamp, then cap
fn push_capped<T: Timestamped>(series: &mut Vec<T>, record: T, cap: usize) {
    let pos = series.partition_point(|r| r.timestamp() <= record.timestamp());
    series.insert(pos, record);
    truncate_oldest(series, cap);
}

/// Sort by timestamp and keep the newest `cap` records
fn sort_and_truncate<T: Timestamped>(series: &mut Vec<T>, cap: usize) {
    series.sort_by_key(|r| r.timestamp());
    truncate_oldest(series, cap);
}

/// Drop from the front of an already sorted series
fn truncate_oldest<T>(series: &mut Vec<T>, cap: usize) {
    if series.len() > cap {
        let excess = series.len() - cap;
        series.drain(..excess);
    }
}
