//! Suggestion records produced by the ranker and the behavioral generator

use serde::{Deserialize, Serialize};

/// Source of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Time,
    Seasonal,
    Weather,
    Milestone,
    Onboarding,
    Habit,
    Reconnection,
    Continuation,
    Inspiration,
    Sleep,
    Location,
    Workout,
    Music,
    Screen,
}

impl SuggestionType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Seasonal => "seasonal",
            Self::Weather => "weather",
            Self::Milestone => "milestone",
            Self::Onboarding => "onboarding",
            Self::Habit => "habit",
            Self::Reconnection => "reconnection",
            Self::Continuation => "continuation",
            Self::Inspiration => "inspiration",
            Self::Sleep => "sleep",
            Self::Location => "location",
            Self::Workout => "workout",
            Self::Music => "music",
            Self::Screen => "screen",
        }
    }
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SuggestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "time" => Self::Time,
            "seasonal" => Self::Seasonal,
            "weather" => Self::Weather,
            "milestone" => Self::Milestone,
            "onboarding" => Self::Onboarding,
            "habit" => Self::Habit,
            "reconnection" => Self::Reconnection,
            "continuation" => Self::Continuation,
            "inspiration" => Self::Inspiration,
            "sleep" => Self::Sleep,
            "location" => Self::Location,
            "workout" => Self::Workout,
            "music" => Self::Music,
            "screen" => Self::Screen,
            other => return Err(format!("unknown suggestion type: {}", other)),
        };
        Ok(kind)
    }
}

/// A prioritized writing prompt. Higher priority = more relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub context: String,
    pub priority: u8,
    pub icon: String,
}

impl Suggestion {
    pub fn new(
        prompt: impl Into<String>,
        kind: SuggestionType,
        context: impl Into<String>,
        priority: u8,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            kind,
            context: context.into(),
            priority,
            icon: icon.into(),
        }
    }
}
