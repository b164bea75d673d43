//! Question selector: follow-up questions from themes and patterns
//!
//! Selection:
//! - top 3 themes, 2 questions each when strength > 3, else 1
//! - +2 reframing questions on negative framing
//! - +1 exceptions question when absolutes repeat (> 2)
//! - +1 locus-of-control question when passive markers repeat (> 2)
//! - +1 sensory question for short entries (< 100 words)
//! - shuffle, keep 5
//!
//! Exact duplicates are not removed; the banks are disjoint so they cannot
//! occur today, but near-duplicates across themes can.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    MAX_QUESTIONS, PATTERN_REPEAT_THRESHOLD, SHORT_ENTRY_WORDS, STRONG_THEME_THRESHOLD,
    TOP_THEMES_FOR_QUESTIONS,
};
use crate::types::{PatternMatch, Theme, ThemeMatch};

// =============================================================================
// Question banks
// =============================================================================

const EMOTIONS_QUESTIONS: &[&str] = &[
    "What triggered this feeling, and when did you first notice it?",
    "Where do you feel this emotion in your body?",
    "If this feeling could speak, what would it want you to know?",
    "How would you like to feel instead, and what might help you get there?",
    "Which emotion was strongest today, and why do you think that is?",
];

const RELATIONSHIPS_QUESTIONS: &[&str] = &[
    "What do you appreciate most about this person?",
    "What would you like them to understand about you?",
    "How has this relationship shaped who you are?",
    "What is one thing you could do to strengthen this connection?",
    "What did this interaction teach you about your own needs?",
];

const CHALLENGES_QUESTIONS: &[&str] = &[
    "What is within your control in this situation?",
    "What would you tell a friend facing the same challenge?",
    "What strengths have helped you through similar difficulties before?",
    "What is the smallest next step you could take?",
    "What might this challenge be teaching you?",
];

const GRATITUDE_QUESTIONS: &[&str] = &[
    "How did this moment of gratitude change your day?",
    "Who could you thank for something today?",
    "What small thing are you grateful for that you usually overlook?",
    "How can you bring more of this into tomorrow?",
];

const GROWTH_QUESTIONS: &[&str] = &[
    "What have you learned about yourself recently?",
    "How are you different from who you were a year ago?",
    "What habit would support the person you are becoming?",
    "What does progress look like for you right now?",
    "What are you ready to let go of?",
];

const FUTURE_QUESTIONS: &[&str] = &[
    "What does your ideal day a year from now look like?",
    "What is one step toward this goal you could take this week?",
    "What fears come up when you think about the future?",
    "What would you attempt if you knew you could not fail?",
    "What are you most looking forward to?",
];

// =============================================================================
// Context questions
// =============================================================================

/// Added when negative framing is detected
pub const NEGATIVE_REFRAME_QUESTIONS: [&str; 2] = [
    "Is there another way to look at this situation?",
    "What evidence might challenge this negative view?",
];

/// Added when absolute language repeats
pub const EXCEPTIONS_QUESTION: &str =
    "Can you think of any exceptions to these absolute statements?";

/// Added when passive markers repeat
pub const LOCUS_OF_CONTROL_QUESTION: &str =
    "What parts of this situation were within your control?";

/// Added for short entries
pub const SENSORY_QUESTION: &str =
    "Can you describe what you saw, heard, or felt in more detail?";

/// Question bank for a theme
pub fn question_bank(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Emotions => EMOTIONS_QUESTIONS,
        Theme::Relationships => RELATIONSHIPS_QUESTIONS,
        Theme::Challenges => CHALLENGES_QUESTIONS,
        Theme::Gratitude => GRATITUDE_QUESTIONS,
        Theme::Growth => GROWTH_QUESTIONS,
        Theme::Future => FUTURE_QUESTIONS,
    }
}

/// Every fixed context question
pub fn meta_questions() -> Vec<&'static str> {
    let mut all = NEGATIVE_REFRAME_QUESTIONS.to_vec();
    all.push(EXCEPTIONS_QUESTION);
    all.push(LOCUS_OF_CONTROL_QUESTION);
    all.push(SENSORY_QUESTION);
    all
}

/// Question selector
#[derive(Debug, Default)]
pub struct QuestionSelector;

impl QuestionSelector {
    pub fn new() -> Self {
        Self
    }

    /// Pick up to `MAX_QUESTIONS` follow-up questions.
    /// `themes` is expected strongest-first, as returned by the classifier.
    pub fn select_questions<R: Rng + ?Sized>(
        &self,
        themes: &[ThemeMatch],
        patterns: &PatternMatch,
        word_count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut candidates: Vec<&'static str> = Vec::new();

        for theme_match in themes.iter().take(TOP_THEMES_FOR_QUESTIONS) {
            let take = if theme_match.strength > STRONG_THEME_THRESHOLD { 2 } else { 1 };
            let mut bank = question_bank(theme_match.theme).to_vec();
            bank.shuffle(rng);
            candidates.extend(bank.into_iter().take(take));
        }

        if !patterns.negative.is_empty() {
            candidates.extend(NEGATIVE_REFRAME_QUESTIONS);
        }
        if patterns.absolute.len() > PATTERN_REPEAT_THRESHOLD {
            candidates.push(EXCEPTIONS_QUESTION);
        }
        if patterns.passive.len() > PATTERN_REPEAT_THRESHOLD {
            candidates.push(LOCUS_OF_CONTROL_QUESTION);
        }
        if word_count < SHORT_ENTRY_WORDS {
            candidates.push(SENSORY_QUESTION);
        }

        candidates.shuffle(rng);
        candidates
            .into_iter()
            .take(MAX_QUESTIONS)
            .map(String::from)
            .collect()
    }
}
