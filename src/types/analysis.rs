//! Reflection analysis results and trend reports

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{PatternClass, PatternMatch, Theme, ThemeMatch};

/// Kind of insight attached to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Dominant theme of the entry
    Theme,
    Gratitude,
    /// Challenges and growth appear together
    Resilience,
    /// Negative framing detected
    Reframe,
    /// Heavy all-or-none language
    Absolutes,
    /// Long, detailed entry
    Depth,
    /// Very short entry
    Brevity,
}

/// A short observation surfaced with an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    pub icon: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            icon: icon.into(),
        }
    }
}

/// Full analysis of one journal entry. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Themes, strongest first
    pub themes: Vec<ThemeMatch>,
    pub patterns: PatternMatch,
    /// At most `MAX_QUESTIONS` follow-up questions
    pub questions: Vec<String>,
    pub insights: Vec<Insight>,
    pub word_count: usize,
    pub analysis_date: NaiveDateTime,
}

impl Analysis {
    /// Strongest theme, if any
    pub fn top_theme(&self) -> Option<Theme> {
        self.themes.first().map(|m| m.theme)
    }

    pub fn has_theme(&self, theme: Theme) -> bool {
        self.themes.iter().any(|m| m.theme == theme)
    }
}

/// How often a theme appears across stored analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTrend {
    pub theme: Theme,
    /// Number of analyses containing the theme
    pub occurrences: usize,
    /// Share of analyses containing the theme (0-100)
    pub percentage: f64,
}

/// Aggregate view over stored analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub message: String,
    pub trends: Vec<ThemeTrend>,
    pub analyses_count: usize,
    pub average_word_count: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_pattern: Option<PatternClass>,
}

impl TrendReport {
    /// Placeholder returned while there is too little history
    pub fn placeholder(analyses_count: usize) -> Self {
        Self {
            message: "Keep journaling to discover your patterns! A few more entries will reveal your trends.".to_string(),
            trends: Vec::new(),
            analyses_count,
            average_word_count: 0.0,
            dominant_pattern: None,
        }
    }

    pub fn has_trends(&self) -> bool {
        !self.trends.is_empty()
    }
}
