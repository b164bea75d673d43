//! Journal entries and suggestion usage counts

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::SuggestionType;

/// A journal entry as seen by the history provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDateTime,
    pub content: String,
}

impl JournalEntry {
    pub fn new(date: NaiveDateTime, content: impl Into<String>) -> Self {
        Self {
            date,
            content: content.into(),
        }
    }
}

/// Per-type count of suggestions the user acted on.
/// Recorded for later personalization; nothing reads it back into ranking yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLog {
    #[serde(default)]
    counts: BTreeMap<SuggestionType, u32>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: SuggestionType) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: SuggestionType) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}
