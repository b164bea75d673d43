//! Theme categories and classifier matches

use serde::{Deserialize, Serialize};

/// Semantic category a journal entry can touch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Emotions,
    Relationships,
    Challenges,
    Gratitude,
    Growth,
    Future,
}

impl Theme {
    /// All themes in table order (ties in ranking keep this order)
    pub const ALL: [Theme; 6] = [
        Theme::Emotions,
        Theme::Relationships,
        Theme::Challenges,
        Theme::Gratitude,
        Theme::Growth,
        Theme::Future,
    ];

    /// Stable lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emotions => "emotions",
            Self::Relationships => "relationships",
            Self::Challenges => "challenges",
            Self::Gratitude => "gratitude",
            Self::Growth => "growth",
            Self::Future => "future",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emotions => "your emotions",
            Self::Relationships => "the people in your life",
            Self::Challenges => "the challenges you face",
            Self::Gratitude => "gratitude",
            Self::Growth => "personal growth",
            Self::Future => "the future",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Emotions => "💭",
            Self::Relationships => "🤝",
            Self::Challenges => "⛰️",
            Self::Gratitude => "🙏",
            Self::Growth => "🌱",
            Self::Future => "🔭",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One theme found in a text.
///
/// `strength` is always `keywords.len()`. Build it with `ThemeMatch::new`;
/// deserializing recomputes `strength` from the keyword list and ignores any
/// stored value. Fields stay public for reading and struct patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ThemeMatchFields")]
pub struct ThemeMatch {
    pub theme: Theme,
    /// Number of distinct keywords matched
    pub strength: usize,
    /// Matched keywords, in keyword-table order
    pub keywords: Vec<String>,
}

/// Wire shape of `ThemeMatch` without the derived count
#[derive(Deserialize)]
struct ThemeMatchFields {
    theme: Theme,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<ThemeMatchFields> for ThemeMatch {
    fn from(fields: ThemeMatchFields) -> Self {
        ThemeMatch::new(fields.theme, fields.keywords)
    }
}

impl ThemeMatch {
    /// Build a match; strength is derived from the keyword list
    pub fn new(theme: Theme, keywords: Vec<String>) -> Self {
        Self {
            theme,
            strength: keywords.len(),
            keywords,
        }
    }
}
