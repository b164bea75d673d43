//! Pattern detector: negative framing, all-or-none language, passive markers
//!
//! Same substring semantics as the theme classifier: "all" matches "ball".

use crate::types::{PatternClass, PatternMatch};

const NEGATIVE_TRIGGERS: &[&str] = &[
    "never", "can't", "won't", "shouldn't", "terrible", "awful", "horrible", "worst",
    "hate", "useless", "hopeless",
];

const ABSOLUTE_TRIGGERS: &[&str] = &[
    "always", "all", "every", "none", "nothing", "everything", "everyone", "no one",
    "nobody", "completely", "totally",
];

const PASSIVE_TRIGGERS: &[&str] = &[
    "was told", "was made", "were made", "was given", "was forced", "happened to me",
    "it was decided", "was done", "had to", "no choice",
];

/// Trigger phrases for a pattern class
pub fn triggers(class: PatternClass) -> &'static [&'static str] {
    match class {
        PatternClass::Negative => NEGATIVE_TRIGGERS,
        PatternClass::Absolute => ABSOLUTE_TRIGGERS,
        PatternClass::Passive => PASSIVE_TRIGGERS,
    }
}

/// Pattern detector
#[derive(Debug, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Trigger phrases found per class, in trigger-table order
    pub fn detect_patterns(&self, text: &str) -> PatternMatch {
        let text = text.to_lowercase();
        let mut result = PatternMatch::default();

        for class in PatternClass::ALL {
            let found = result.get_mut(class);
            for trigger in triggers(class) {
                if text.contains(trigger) {
                    found.push(trigger.to_string());
                }
            }
        }

        result
    }
}
