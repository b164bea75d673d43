//! Core modules for World Tree

pub mod api;
pub mod theme_classifier;
pub mod pattern_detector;
pub mod question_selector;
pub mod insights;
pub mod reflection;
pub mod suggestions;
pub mod behavior;
pub mod store;

pub use api::{create_router, run_server};
pub use theme_classifier::ThemeClassifier;
pub use pattern_detector::PatternDetector;
pub use question_selector::QuestionSelector;
pub use insights::InsightGenerator;
pub use reflection::{ReflectionService, entry_id, word_count};
pub use suggestions::{SuggestionRanker, TimeOfDay, Season, Weather};
pub use behavior::BehavioralPromptGenerator;
pub use store::{AnalysisStore, BehavioralLogProvider, EntryHistoryProvider, JsonStore};
