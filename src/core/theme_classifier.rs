//! Theme classifier: keyword membership across six fixed categories
//!
//! Matching is case-insensitive substring containment, not word matching.
//! Short keywords can hit inside longer words ("art" in "heart").

use crate::types::{Theme, ThemeMatch};

// =============================================================================
// Keyword tables
// =============================================================================

const EMOTIONS_KEYWORDS: &[&str] = &[
    "happy", "sad", "angry", "anxious", "excited", "frustrated", "calm", "worried",
    "joy", "fear", "love", "lonely", "overwhelmed", "peaceful", "nervous", "upset",
    "hopeful", "depressed", "content", "stressed",
];

const RELATIONSHIPS_KEYWORDS: &[&str] = &[
    "friend", "family", "partner", "mother", "father", "mom", "dad", "sister",
    "brother", "colleague", "boss", "relationship", "husband", "wife", "child",
    "kids", "together", "conversation",
];

const CHALLENGES_KEYWORDS: &[&str] = &[
    "problem", "difficult", "struggle", "challenge", "hard", "obstacle", "conflict",
    "stuck", "fail", "mistake", "pressure", "deadline", "tired", "exhausted", "pain",
];

const GRATITUDE_KEYWORDS: &[&str] = &[
    "grateful", "thankful", "appreciate", "blessed", "thanks", "fortunate", "lucky",
    "gift", "kindness", "gratitude",
];

const GROWTH_KEYWORDS: &[&str] = &[
    "learn", "grow", "improve", "change", "progress", "develop", "better", "lesson",
    "realize", "understand", "practice", "habit", "goal", "achieve",
];

const FUTURE_KEYWORDS: &[&str] = &[
    "tomorrow", "future", "plan", "hope", "dream", "next", "someday", "soon",
    "goal", "want to", "will", "going to",
];

/// Keyword table for a theme
pub fn keywords(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Emotions => EMOTIONS_KEYWORDS,
        Theme::Relationships => RELATIONSHIPS_KEYWORDS,
        Theme::Challenges => CHALLENGES_KEYWORDS,
        Theme::Gratitude => GRATITUDE_KEYWORDS,
        Theme::Growth => GROWTH_KEYWORDS,
        Theme::Future => FUTURE_KEYWORDS,
    }
}

/// Theme classifier
#[derive(Debug, Default)]
pub struct ThemeClassifier;

impl ThemeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Detect themes, strongest first. Ties keep table order.
    pub fn detect_themes(&self, text: &str) -> Vec<ThemeMatch> {
        let text = text.to_lowercase();
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ThemeMatch> = Theme::ALL
            .iter()
            .map(|&theme| {
                let found = keywords(theme)
                    .iter()
                    .filter(|kw| text.contains(*kw))
                    .map(|kw| kw.to_string())
                    .collect();
                ThemeMatch::new(theme, found)
            })
            .filter(|m| m.strength > 0)
            .collect();

        // stable: equal strengths stay in table order
        matches.sort_by(|a, b| b.strength.cmp(&a.strength));
        matches
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let classifier = ThemeClassifier::new();
        assert!(classifier.detect_themes("").is_empty());
        assert!(classifier.detect_themes("   ").is_empty());
    }

    #[test]
    fn test_strength_counts_distinct_keywords() {
        let classifier = ThemeClassifier::new();
        // "grateful" twice still counts once
        let themes = classifier.detect_themes("Grateful, so grateful and thankful today");
        let gratitude = themes.iter().find(|m| m.theme == Theme::Gratitude).unwrap();
        assert_eq!(gratitude.strength, 2);
        assert_eq!(gratitude.keywords, vec!["grateful", "thankful"]);
    }

    #[test]
    fn test_sorted_by_strength() {
        let classifier = ThemeClassifier::new();
        let themes = classifier.detect_themes(
            "I felt anxious and worried and stressed about the deadline with my boss",
        );
        assert!(!themes.is_empty());
        assert_eq!(themes[0].theme, Theme::Emotions);
        for pair in themes.windows(2) {
            assert!(pair[0].strength >= pair[1].strength);
        }
    }

    #[test]
    fn test_ties_keep_table_order() {
        let classifier = ThemeClassifier::new();
        // one keyword each: challenges ("stuck"), gratitude ("thankful")
        let themes = classifier.detect_themes("thankful but stuck");
        let order: Vec<Theme> = themes.iter().map(|m| m.theme).collect();
        assert_eq!(order, vec![Theme::Challenges, Theme::Gratitude]);
    }

    #[test]
    fn test_substring_matching_is_loose() {
        let classifier = ThemeClassifier::new();
        // "hard" inside "hardware"
        let themes = classifier.detect_themes("new hardware arrived");
        assert!(themes.iter().any(|m| m.theme == Theme::Challenges));
    }

    #[test]
    fn test_no_zero_strength_themes() {
        let classifier = ThemeClassifier::new();
        let themes = classifier.detect_themes("the sky is blue");
        assert!(themes.iter().all(|m| m.strength > 0));
        assert!(themes.iter().all(|m| m.strength == m.keywords.len()));
    }

    #[test]
    fn test_determinism() {
        let classifier = ThemeClassifier::new();
        let text = "My friend and I made a plan for tomorrow, I feel hopeful";
        assert_eq!(classifier.detect_themes(text), classifier.detect_themes(text));
    }
}
