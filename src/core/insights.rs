//! Insight rules for single analyses and trend aggregation across many

use std::collections::HashMap;

use crate::{DEPTH_WORDS, BREVITY_WORDS, MIN_ANALYSES_FOR_TRENDS, PATTERN_REPEAT_THRESHOLD};
use crate::types::{
    Analysis, Insight, InsightKind, PatternClass, PatternMatch, Theme, ThemeMatch, ThemeTrend,
    TrendReport,
};

/// Insight generator
#[derive(Debug, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Insights for one entry, in rule order
    pub fn generate(
        &self,
        themes: &[ThemeMatch],
        patterns: &PatternMatch,
        word_count: usize,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let has = |theme: Theme| themes.iter().any(|m| m.theme == theme);

        if let Some(top) = themes.first() {
            insights.push(Insight::new(
                InsightKind::Theme,
                format!("Your writing today centers on {}.", top.theme.label()),
                top.theme.icon(),
            ));
        }

        if has(Theme::Gratitude) {
            insights.push(Insight::new(
                InsightKind::Gratitude,
                "Noticing what you are grateful for builds lasting well-being.",
                "✨",
            ));
        }

        if has(Theme::Challenges) && has(Theme::Growth) {
            insights.push(Insight::new(
                InsightKind::Resilience,
                "You are connecting your challenges with growth. That is resilience at work.",
                "💪",
            ));
        }

        if !patterns.negative.is_empty() {
            insights.push(Insight::new(
                InsightKind::Reframe,
                format!(
                    "Some negative framing showed up ({}). Try reading it back with kinder eyes.",
                    patterns.negative.join(", ")
                ),
                "🔄",
            ));
        }

        if patterns.absolute.len() > PATTERN_REPEAT_THRESHOLD {
            insights.push(Insight::new(
                InsightKind::Absolutes,
                "All-or-nothing words appear often. Reality usually has more shades.",
                "⚖️",
            ));
        }

        if word_count >= DEPTH_WORDS {
            insights.push(Insight::new(
                InsightKind::Depth,
                format!("A deep reflection of {} words. Giving thoughts room helps them settle.", word_count),
                "📖",
            ));
        } else if word_count > 0 && word_count < BREVITY_WORDS {
            insights.push(Insight::new(
                InsightKind::Brevity,
                "A short entry today. Even a few lines keep the habit alive.",
                "✏️",
            ));
        }

        insights
    }

    /// Aggregate stored analyses. Fewer than `MIN_ANALYSES_FOR_TRENDS`
    /// analyses yield the placeholder report.
    pub fn trends<'a, I>(&self, analyses: I) -> TrendReport
    where
        I: IntoIterator<Item = &'a Analysis>,
    {
        let analyses: Vec<&Analysis> = analyses.into_iter().collect();
        let count = analyses.len();
        if count < MIN_ANALYSES_FOR_TRENDS {
            return TrendReport::placeholder(count);
        }

        let mut occurrences: HashMap<Theme, usize> = HashMap::new();
        let mut pattern_totals: HashMap<PatternClass, usize> = HashMap::new();
        let mut words = 0usize;

        for analysis in &analyses {
            for m in &analysis.themes {
                *occurrences.entry(m.theme).or_insert(0) += 1;
            }
            for class in PatternClass::ALL {
                *pattern_totals.entry(class).or_insert(0) += analysis.patterns.get(class).len();
            }
            words += analysis.word_count;
        }

        let mut trends: Vec<ThemeTrend> = Theme::ALL
            .iter()
            .filter_map(|theme| {
                occurrences.get(theme).map(|&n| ThemeTrend {
                    theme: *theme,
                    occurrences: n,
                    percentage: (n as f64 / count as f64 * 1000.0).round() / 10.0,
                })
            })
            .collect();
        trends.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));

        // first class wins ties
        let dominant_pattern = PatternClass::ALL
            .iter()
            .copied()
            .filter(|c| pattern_totals.get(c).copied().unwrap_or(0) > 0)
            .fold(None, |best: Option<PatternClass>, c| match best {
                Some(b) if pattern_totals[&b] >= pattern_totals[&c] => Some(b),
                _ => Some(c),
            });

        let message = match trends.first() {
            Some(top) => format!(
                "Across {} entries, you write most about {} ({}% of entries).",
                count,
                top.theme.label(),
                top.percentage
            ),
            None => format!(
                "Across {} entries, no recurring themes yet. Try writing about how your days feel.",
                count
            ),
        };

        TrendReport {
            message,
            trends,
            analyses_count: count,
            average_word_count: words as f64 / count as f64,
            dominant_pattern,
        }
    }
}
