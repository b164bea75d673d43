//! Reflection service: one journal entry in, one `Analysis` out
//!
//! text → word count → themes → patterns → questions → insights

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::insights::InsightGenerator;
use crate::core::pattern_detector::PatternDetector;
use crate::core::question_selector::QuestionSelector;
use crate::core::store::AnalysisStore;
use crate::core::theme_classifier::ThemeClassifier;
use crate::error::StoreError;
use crate::types::{Analysis, TrendReport};

lazy_static! {
    // Words are runs of letters, digits and in-word apostrophes;
    // stray punctuation like "-" or "..." is not counted.
    static ref RE_WORD: Regex = Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").unwrap();
}

/// Number of words in `text`
pub fn word_count(text: &str) -> usize {
    RE_WORD.find_iter(text).count()
}

/// Content-addressed id for an entry without one.
/// `seq` counts earlier entries with the same date and content, so repeats
/// written in the same second still get distinct ids.
pub fn entry_id(date: NaiveDateTime, content: &str, seq: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format("%Y-%m-%dT%H:%M:%S%.f").to_string().as_bytes());
    hasher.update([0u8]);
    hasher.update(content.as_bytes());
    hasher.update([0u8]);
    hasher.update((seq as u64).to_le_bytes());
    let digest = hasher.finalize();
    let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("entry_{}", hex)
}

/// Analysis pipeline for journal entries
#[derive(Debug, Default)]
pub struct ReflectionService {
    classifier: ThemeClassifier,
    detector: PatternDetector,
    selector: QuestionSelector,
    insights: InsightGenerator,
}

impl ReflectionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze one entry
    pub fn analyze<R: Rng + ?Sized>(&self, text: &str, now: NaiveDateTime, rng: &mut R) -> Analysis {
        let word_count = word_count(text);
        let themes = self.classifier.detect_themes(text);
        let patterns = self.detector.detect_patterns(text);
        let questions = self.selector.select_questions(&themes, &patterns, word_count, rng);
        let insights = self.insights.generate(&themes, &patterns, word_count);

        // labels and counts only, never the entry text
        debug!(
            word_count,
            themes = themes.len(),
            patterns = patterns.total(),
            questions = questions.len(),
            "analyzed entry"
        );

        Analysis {
            themes,
            patterns,
            questions,
            insights,
            word_count,
            analysis_date: now,
        }
    }

    /// Analyze and persist under `entry_id`
    pub fn analyze_and_store<R: Rng + ?Sized>(
        &self,
        entry_id: &str,
        text: &str,
        now: NaiveDateTime,
        rng: &mut R,
        store: &mut dyn AnalysisStore,
    ) -> Result<Analysis, StoreError> {
        let analysis = self.analyze(text, now, rng);
        store.save(entry_id, analysis.clone())?;
        Ok(analysis)
    }

    /// Trends across every stored analysis
    pub fn generate_trends(&self, store: &dyn AnalysisStore) -> TrendReport {
        let analyses = store.load_all();
        self.insights.trends(analyses.values())
    }
}
