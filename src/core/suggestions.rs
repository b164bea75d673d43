//! Suggestion ranker: contextual writing prompts
//!
//! Six generators run on every call and are merged:
//! - time of day (priority 9)
//! - season (6)
//! - weather (5, random category until a real weather source exists)
//! - milestones: new month (10), weekend (7)
//! - recent activity: onboarding (10), habit (8), reconnection (9), continuation (8)
//! - random inspiration (4)
//!
//! Merge = dedup by prompt (first wins), stable sort by priority, keep 8.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::{
    CONTINUATION_MIN_CHARS, CONTINUATION_QUOTE_CHARS, HISTORY_WINDOW_DAYS, MAX_SUGGESTIONS,
    PRIORITY_CONTINUATION, PRIORITY_HABIT, PRIORITY_INSPIRATION, PRIORITY_NEW_MONTH,
    PRIORITY_ONBOARDING, PRIORITY_RECONNECTION, PRIORITY_SEASONAL, PRIORITY_TIME_OF_DAY,
    PRIORITY_WEATHER, PRIORITY_WEEKEND, RECONNECTION_GAP_DAYS,
};
use crate::core::store::EntryHistoryProvider;
use crate::types::{Suggestion, SuggestionType};

/// Part of the day used to pick time prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// 05:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-20:59
    Evening,
    /// 21:00-04:59
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning reflection",
            Self::Afternoon => "Afternoon check-in",
            Self::Evening => "Evening wind-down",
            Self::Night => "Late-night thoughts",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Morning => "🌅",
            Self::Afternoon => "☀️",
            Self::Evening => "🌇",
            Self::Night => "🌙",
        }
    }

    fn prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Morning => &[
                "What are you looking forward to today?",
                "How did you sleep, and how do you feel this morning?",
                "What intention would you like to set for today?",
            ],
            Self::Afternoon => &[
                "How is your day unfolding so far?",
                "What has surprised you today?",
                "What is taking most of your energy right now?",
            ],
            Self::Evening => &[
                "What was the best part of your day?",
                "What did you learn today?",
                "What would you do differently if you could replay today?",
            ],
            Self::Night => &[
                "What is on your mind as the day ends?",
                "What are you ready to let go of tonight?",
                "What brought you peace today?",
            ],
        }
    }
}

/// Calendar season by fixed month ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// March-May
    Spring,
    /// June-August
    Summer,
    /// September-November
    Autumn,
    /// December-February
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Spring => "🌸",
            Self::Summer => "🌻",
            Self::Autumn => "🍂",
            Self::Winter => "❄️",
        }
    }

    fn prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Spring => &[
                "What new beginnings are you noticing in your life?",
                "What would you like to plant and nurture this season?",
                "What are you ready to refresh or renew?",
            ],
            Self::Summer => &[
                "What makes you feel most alive these days?",
                "What adventure would you like to have this summer?",
                "Where have you found warmth and light lately?",
            ],
            Self::Autumn => &[
                "What are you ready to harvest from your efforts this year?",
                "What changes are you noticing, inside and out?",
                "What are you grateful for as the year turns?",
            ],
            Self::Winter => &[
                "How are you resting and recharging this season?",
                "What would you like to reflect on as the year comes full circle?",
                "What brings you comfort on cold, dark days?",
            ],
        }
    }
}

/// Weather categories for the placeholder weather source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
    Windy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Rainy,
        Weather::Cloudy,
        Weather::Snowy,
        Weather::Windy,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Snowy => "snowy",
            Self::Windy => "windy",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::Rainy => "🌧️",
            Self::Cloudy => "☁️",
            Self::Snowy => "🌨️",
            Self::Windy => "🌬️",
        }
    }

    fn prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Sunny => &[
                "How does the sunshine affect your mood today?",
                "What outdoor moment would make today special?",
            ],
            Self::Rainy => &[
                "What cozy thoughts come to mind on this rainy day?",
                "What would you like to wash away and start fresh?",
            ],
            Self::Cloudy => &[
                "What is clouding your thoughts lately?",
                "What silver lining can you find today?",
            ],
            Self::Snowy => &[
                "What does the quiet of snow bring up for you?",
                "What memories does this weather stir?",
            ],
            Self::Windy => &[
                "What winds of change are blowing through your life?",
                "What would you like the wind to carry away?",
            ],
        }
    }
}

const NEW_MONTH_PROMPTS: &[&str] = &[
    "A new month begins. What do you want it to be about?",
    "Looking back at last month, what are you proud of?",
];

const WEEKEND_PROMPTS: &[&str] = &[
    "How do you want to spend this weekend?",
    "What would make this weekend restful and meaningful?",
];

const ONBOARDING_PROMPT: &str =
    "Welcome to your journal. Start by describing how you feel right now.";

const HABIT_PROMPT: &str =
    "You have started a journaling habit. What made you come back today?";

const RECONNECTION_PROMPT: &str =
    "It has been a few days. What has happened since you last wrote?";

const INSPIRATION_PROMPTS: &[&str] = &[
    "Describe a small moment that made you smile recently.",
    "Write a letter to your future self.",
    "What would you do if you had a free day with no obligations?",
    "Who has influenced you the most, and how?",
    "What is a belief you held strongly that has changed?",
    "Describe your happy place in as much detail as you can.",
    "What are three things you love about yourself?",
    "What is a risk you are glad you took?",
];

/// Suggestion ranker
#[derive(Debug, Default)]
pub struct SuggestionRanker;

impl SuggestionRanker {
    pub fn new() -> Self {
        Self
    }

    /// Ranked, deduplicated suggestions for `now` (at most `MAX_SUGGESTIONS`)
    pub fn generate_suggestions<R: Rng + ?Sized>(
        &self,
        now: NaiveDateTime,
        history: &dyn EntryHistoryProvider,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let mut all = Vec::new();
        all.extend(self.time_based(now));
        all.extend(self.seasonal(now));
        all.extend(self.weather_based(rng));
        all.extend(self.milestones(now));
        all.extend(self.activity_based(now, history));
        all.extend(self.inspiration(rng));

        let generated = all.len();
        let ranked = rank(all);
        debug!(generated, kept = ranked.len(), "ranked suggestions");
        ranked
    }

    /// Prompts for the current part of the day
    pub fn time_based(&self, now: NaiveDateTime) -> Vec<Suggestion> {
        let slot = TimeOfDay::from_hour(now.hour());
        slot.prompts()
            .iter()
            .map(|p| {
                Suggestion::new(*p, SuggestionType::Time, slot.label(), PRIORITY_TIME_OF_DAY, slot.icon())
            })
            .collect()
    }

    pub fn seasonal(&self, now: NaiveDateTime) -> Vec<Suggestion> {
        let season = Season::from_month(now.month());
        let context = format!("{} reflection", season.name());
        season
            .prompts()
            .iter()
            .map(|p| {
                Suggestion::new(*p, SuggestionType::Seasonal, context.clone(), PRIORITY_SEASONAL, season.icon())
            })
            .collect()
    }

    pub fn weather_based<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Suggestion> {
        let Some(&weather) = Weather::ALL.choose(rng) else {
            return Vec::new();
        };
        let context = format!("Inspired by {} weather", weather.name());
        weather
            .prompts()
            .iter()
            .map(|p| {
                Suggestion::new(*p, SuggestionType::Weather, context.clone(), PRIORITY_WEATHER, weather.icon())
            })
            .collect()
    }

    /// New-month and weekend prompts
    pub fn milestones(&self, now: NaiveDateTime) -> Vec<Suggestion> {
        let mut out = Vec::new();

        if now.day() == 1 {
            out.extend(NEW_MONTH_PROMPTS.iter().map(|p| {
                Suggestion::new(*p, SuggestionType::Milestone, "New month", PRIORITY_NEW_MONTH, "📅")
            }));
        }

        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            out.extend(WEEKEND_PROMPTS.iter().map(|p| {
                Suggestion::new(*p, SuggestionType::Milestone, "Weekend reflection", PRIORITY_WEEKEND, "🏖️")
            }));
        }

        out
    }

    /// Prompts driven by the last week of entries
    pub fn activity_based(
        &self,
        now: NaiveDateTime,
        history: &dyn EntryHistoryProvider,
    ) -> Vec<Suggestion> {
        let recent = history.recent_entries(HISTORY_WINDOW_DAYS, now);

        match recent.len() {
            0 => vec![Suggestion::new(
                ONBOARDING_PROMPT,
                SuggestionType::Onboarding,
                "Getting started",
                PRIORITY_ONBOARDING,
                "👋",
            )],
            1 | 2 => vec![Suggestion::new(
                HABIT_PROMPT,
                SuggestionType::Habit,
                "Building a habit",
                PRIORITY_HABIT,
                "🌱",
            )],
            _ => {
                let mut out = Vec::new();
                let latest = &recent[0];

                let gap_days = (now - latest.date).num_days();
                if gap_days > RECONNECTION_GAP_DAYS {
                    out.push(Suggestion::new(
                        RECONNECTION_PROMPT,
                        SuggestionType::Reconnection,
                        format!("{} days since your last entry", gap_days),
                        PRIORITY_RECONNECTION,
                        "🔗",
                    ));
                }

                if latest.content.chars().count() > CONTINUATION_MIN_CHARS {
                    let quote: String = latest.content.chars().take(CONTINUATION_QUOTE_CHARS).collect();
                    out.push(Suggestion::new(
                        format!("Last time you wrote: \"{}...\" How do you feel about that now?", quote),
                        SuggestionType::Continuation,
                        "Continue your story",
                        PRIORITY_CONTINUATION,
                        "📝",
                    ));
                }

                out
            }
        }
    }

    pub fn inspiration<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Suggestion> {
        INSPIRATION_PROMPTS
            .choose(rng)
            .map(|p| {
                vec![Suggestion::new(*p, SuggestionType::Inspiration, "Random inspiration", PRIORITY_INSPIRATION, "💡")]
            })
            .unwrap_or_default()
    }
}

/// Dedup by prompt (first wins), sort by priority descending, cap
pub fn rank(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Suggestion> = suggestions
        .into_iter()
        .filter(|s| seen.insert(s.prompt.clone()))
        .collect();
    unique.sort_by(|a, b| b.priority.cmp(&a.priority));
    unique.truncate(MAX_SUGGESTIONS);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JournalEntry;
    use chrono::{Duration, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_time_buckets() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
    }

    #[test]
    fn test_seasons() {
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
    }

    #[test]
    fn test_milestones() {
        let ranker = SuggestionRanker::new();
        // 2024-06-01 is a Saturday
        let both = ranker.milestones(at(2024, 6, 1, 10));
        assert_eq!(both.len(), 4);
        assert!(both.iter().any(|s| s.priority == PRIORITY_NEW_MONTH));
        assert!(both.iter().any(|s| s.priority == PRIORITY_WEEKEND));
        // 2024-06-05 is a Wednesday
        assert!(ranker.milestones(at(2024, 6, 5, 10)).is_empty());
    }

    #[test]
    fn test_activity_habit() {
        let ranker = SuggestionRanker::new();
        let now = at(2024, 6, 5, 10);
        let history = vec![JournalEntry::new(now - Duration::days(1), "short")];
        let out = ranker.activity_based(now, &history);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, SuggestionType::Habit);
        assert_eq!(out[0].priority, PRIORITY_HABIT);
    }

    #[test]
    fn test_activity_reconnection_and_continuation() {
        let ranker = SuggestionRanker::new();
        let now = at(2024, 6, 10, 10);
        let long = "Today I walked along the river and thought about everything that changed this year";
        let history = vec![
            JournalEntry::new(now - Duration::days(7), "one"),
            JournalEntry::new(now - Duration::days(6), "two"),
            JournalEntry::new(now - Duration::days(5), long),
        ];
        let out = ranker.activity_based(now, &history);
        let kinds: Vec<SuggestionType> = out.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SuggestionType::Reconnection, SuggestionType::Continuation]);
        let quote: String = long.chars().take(50).collect();
        assert!(out[1].prompt.contains(&quote));
    }

    #[test]
    fn test_weather_and_inspiration_are_single_category() {
        let ranker = SuggestionRanker::new();
        let mut rng = StdRng::seed_from_u64(9);
        let weather = ranker.weather_based(&mut rng);
        assert_eq!(weather.len(), 2);
        assert_eq!(weather[0].context, weather[1].context);
        assert_eq!(ranker.inspiration(&mut rng).len(), 1);
    }

    #[test]
    fn test_rank_dedup_sort_cap() {
        let s = |p: &str, prio: u8| Suggestion::new(p, SuggestionType::Inspiration, "", prio, "");
        let input = vec![
            s("a", 1),
            s("b", 5),
            s("a", 9),
            s("c", 5),
            s("d", 2),
            s("e", 3),
            s("f", 4),
            s("g", 6),
            s("h", 7),
            s("i", 8),
        ];
        let ranked = rank(input);
        assert_eq!(ranked.len(), MAX_SUGGESTIONS);
        // first "a" (priority 1) wins dedup and is cut by the cap
        assert!(ranked.iter().all(|x| x.prompt != "a"));
        let order: Vec<&str> = ranked.iter().map(|x| x.prompt.as_str()).collect();
        assert_eq!(order, vec!["i", "h", "g", "b", "c", "f", "e", "d"]);
    }
}
