//! Cognitive-language pattern classes and matches

use serde::{Deserialize, Serialize};

/// Pattern class detected via fixed trigger phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternClass {
    /// Negative framing (never, can't, terrible...)
    Negative,
    /// All-or-none language
    Absolute,
    /// Passive voice / external locus markers
    Passive,
}

impl PatternClass {
    pub const ALL: [PatternClass; 3] = [
        PatternClass::Negative,
        PatternClass::Absolute,
        PatternClass::Passive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Absolute => "absolute",
            Self::Passive => "passive",
        }
    }
}

impl std::fmt::Display for PatternClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Trigger phrases found per pattern class. Every class is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub negative: Vec<String>,
    pub absolute: Vec<String>,
    pub passive: Vec<String>,
}

impl PatternMatch {
    /// Matches for one class
    pub fn get(&self, class: PatternClass) -> &[String] {
        match class {
            PatternClass::Negative => &self.negative,
            PatternClass::Absolute => &self.absolute,
            PatternClass::Passive => &self.passive,
        }
    }

    pub(crate) fn get_mut(&mut self, class: PatternClass) -> &mut Vec<String> {
        match class {
            PatternClass::Negative => &mut self.negative,
            PatternClass::Absolute => &mut self.absolute,
            PatternClass::Passive => &mut self.passive,
        }
    }

    /// Total matches across classes
    pub fn total(&self) -> usize {
        self.negative.len() + self.absolute.len() + self.passive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
