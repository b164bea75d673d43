//! World Tree: reflection engine for journal entries
//!
//! Turns journal text and logged lifestyle signals into ranked prompts:
//! text → themes + patterns → questions + insights
//! time, season, history → suggestions
//! sleep, workouts, music, places, screen time → behavioral prompts

pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// REFLECTION
// =============================================================================

/// Maximum follow-up questions per analysis
pub const MAX_QUESTIONS: usize = 5;

/// Themes that contribute questions
pub const TOP_THEMES_FOR_QUESTIONS: usize = 3;

/// A theme with strength above this contributes two questions instead of one
pub const STRONG_THEME_THRESHOLD: usize = 3;

/// Absolute/passive matches above this add a context question
pub const PATTERN_REPEAT_THRESHOLD: usize = 2;

/// Entries shorter than this get the sensory question
pub const SHORT_ENTRY_WORDS: usize = 100;

/// Entries at least this long get the depth insight
pub const DEPTH_WORDS: usize = 300;

/// Entries shorter than this get the brevity insight
pub const BREVITY_WORDS: usize = 50;

/// Stored analyses needed before trends are reported
pub const MIN_ANALYSES_FOR_TRENDS: usize = 3;

// =============================================================================
// SUGGESTIONS - priorities (higher = more relevant)
// =============================================================================

pub const PRIORITY_NEW_MONTH: u8 = 10;
pub const PRIORITY_ONBOARDING: u8 = 10;
pub const PRIORITY_TIME_OF_DAY: u8 = 9;
pub const PRIORITY_RECONNECTION: u8 = 9;
pub const PRIORITY_HABIT: u8 = 8;
pub const PRIORITY_CONTINUATION: u8 = 8;
pub const PRIORITY_WEEKEND: u8 = 7;
pub const PRIORITY_SEASONAL: u8 = 6;
pub const PRIORITY_WEATHER: u8 = 5;
pub const PRIORITY_INSPIRATION: u8 = 4;

/// Suggestions returned per request
pub const MAX_SUGGESTIONS: usize = 8;

/// Days of entry history read by the activity generator
pub const HISTORY_WINDOW_DAYS: i64 = 7;

/// Days without writing before the reconnection prompt
pub const RECONNECTION_GAP_DAYS: i64 = 3;

/// Latest entry must be longer than this to be quoted
pub const CONTINUATION_MIN_CHARS: usize = 50;

/// Characters quoted in the continuation prompt
pub const CONTINUATION_QUOTE_CHARS: usize = 50;

// =============================================================================
// BEHAVIORAL PROMPTS
// =============================================================================

pub const PRIORITY_SLEEP: u8 = 9;
pub const PRIORITY_WORKOUT: u8 = 8;
pub const PRIORITY_LOCATION: u8 = 7;
pub const PRIORITY_SCREEN: u8 = 7;
pub const PRIORITY_MUSIC: u8 = 6;

/// Recent/prior window size (entries or days)
pub const SIGNAL_WINDOW: usize = 7;

pub const SLEEP_MIN_RECORDS: usize = 3;
/// Minimum change in mean sleep hours worth a prompt
pub const SLEEP_CHANGE_HOURS: f64 = 0.5;

pub const LOCATION_MIN_RECORDS: usize = 5;
/// More distinct places than this in the last week is "scattered"
pub const LOCATION_SCATTERED_PLACES: usize = 5;

pub const WORKOUT_MIN_RECORDS: usize = 2;

pub const MUSIC_MIN_RECORDS: usize = 5;
/// Tracks inspected for the dominant mood
pub const MUSIC_WINDOW: usize = 10;
pub const DOMINANT_MOOD_MIN: usize = 5;

pub const SCREEN_MIN_RECORDS: usize = 3;
/// Deviation from the weekly mean (hours) worth a prompt
pub const SCREEN_DEVIATION_HOURS: f64 = 2.0;

// =============================================================================
// RETENTION - most recent records kept per category
// =============================================================================

pub const SLEEP_RETENTION: usize = 30;
pub const WORKOUT_RETENTION: usize = 50;
pub const MUSIC_RETENTION: usize = 50;
pub const LOCATION_RETENTION: usize = 30;
pub const SCREEN_TIME_RETENTION: usize = 30;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
