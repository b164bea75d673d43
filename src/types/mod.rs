//! Core types for World Tree

mod theme;
mod pattern;
mod analysis;
mod suggestion;
mod behavior;
mod entry;

pub use theme::{Theme, ThemeMatch};
pub use pattern::{PatternClass, PatternMatch};
pub use analysis::{Analysis, Insight, InsightKind, ThemeTrend, TrendReport};
pub use suggestion::{Suggestion, SuggestionType};
pub use behavior::{
    BehavioralLog, Coordinates, LocationRecord, MusicRecord, ScreenTimeRecord, SleepRecord,
    WorkoutRecord,
};
pub use entry::{JournalEntry, UsageLog};
