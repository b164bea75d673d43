//! Behavioral prompt generator: compares recent vs. prior windows of
//! logged signals and surfaces prompts for significant changes.
//!
//! Activation rules:
//! - sleep (>= 3 records): last 7 vs prior 7 mean hours, |change| >= 0.5h
//! - location (>= 5): last 7 visits stagnant / scattered / new place
//! - workout (>= 2): workouts in the last 7 days: 0, 3-4, >= 5
//! - music (>= 5): top mood in the last 10 tracks reaching 5
//! - screen time (>= 3): today vs mean of preceding 7, |deviation| > 2h

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::{
    DOMINANT_MOOD_MIN, LOCATION_MIN_RECORDS, LOCATION_SCATTERED_PLACES, MUSIC_MIN_RECORDS,
    MUSIC_WINDOW, PRIORITY_LOCATION, PRIORITY_MUSIC, PRIORITY_SCREEN, PRIORITY_SLEEP,
    PRIORITY_WORKOUT, SCREEN_DEVIATION_HOURS, SCREEN_MIN_RECORDS, SIGNAL_WINDOW,
    SLEEP_CHANGE_HOURS, SLEEP_MIN_RECORDS, WORKOUT_MIN_RECORDS,
};
use crate::core::store::BehavioralLogProvider;
use crate::types::{LocationRecord, MusicRecord, ScreenTimeRecord, SleepRecord, Suggestion, SuggestionType, WorkoutRecord};

/// Behavioral prompt generator
#[derive(Debug, Default)]
pub struct BehavioralPromptGenerator;

impl BehavioralPromptGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Prompts from all analyzers, highest priority first
    pub fn generate_contextual_prompts(
        &self,
        log: &dyn BehavioralLogProvider,
        now: NaiveDateTime,
    ) -> Vec<Suggestion> {
        let mut prompts: Vec<Suggestion> = [
            self.sleep_prompt(log.sleep()),
            self.location_prompt(log.locations(), now),
            self.workout_prompt(log.workouts(), now),
            self.music_prompt(log.music()),
            self.screen_time_prompt(log.screen_time(), now),
        ]
        .into_iter()
        .flatten()
        .collect();

        prompts.sort_by(|a, b| b.priority.cmp(&a.priority));
        debug!(count = prompts.len(), "behavioral prompts");
        prompts
    }

    /// Mean hours of the last 7 nights against the 7 before
    pub fn sleep_prompt(&self, records: &[SleepRecord]) -> Option<Suggestion> {
        if records.len() < SLEEP_MIN_RECORDS {
            return None;
        }

        let (prior, recent) = split_windows(records, SIGNAL_WINDOW);
        if prior.is_empty() {
            return None;
        }

        let recent_avg = mean(recent.iter().map(|r| r.hours));
        let prior_avg = mean(prior.iter().map(|r| r.hours));
        let change = recent_avg - prior_avg;
        if change.abs() < SLEEP_CHANGE_HOURS {
            return None;
        }

        let prompt = if change < 0.0 {
            format!(
                "You've been sleeping {:.1} hours less than usual. How is this affecting your energy and mood?",
                change.abs()
            )
        } else {
            format!(
                "You've been sleeping {:.1} hours more than usual. What has changed in your routine?",
                change
            )
        };

        Some(Suggestion::new(
            prompt,
            SuggestionType::Sleep,
            format!("Sleep average {:.1}h (was {:.1}h)", recent_avg, prior_avg),
            PRIORITY_SLEEP,
            "😴",
        ))
    }

    /// Variety of places visited recently
    pub fn location_prompt(&self, records: &[LocationRecord], now: NaiveDateTime) -> Option<Suggestion> {
        if records.len() < LOCATION_MIN_RECORDS {
            return None;
        }

        let (_, last) = split_windows(records, SIGNAL_WINDOW);
        let distinct: HashSet<&str> = last.iter().map(|r| r.name.as_str()).collect();

        if distinct.len() == 1 {
            let place = last.last().map(|r| r.name.as_str()).unwrap_or_default();
            return Some(Suggestion::new(
                format!("You've spent a lot of time at {} lately. How does staying close to one place feel?", place),
                SuggestionType::Location,
                "Same place all week",
                PRIORITY_LOCATION,
                "🏠",
            ));
        }

        if distinct.len() > LOCATION_SCATTERED_PLACES {
            return Some(Suggestion::new(
                format!("You've been to {} different places recently. How are you handling all the movement?", distinct.len()),
                SuggestionType::Location,
                "On the move",
                PRIORITY_LOCATION,
                "🧭",
            ));
        }

        let week_ago = now - Duration::days(7);
        let two_weeks_ago = now - Duration::days(14);
        let earlier: HashSet<&str> = records
            .iter()
            .filter(|r| r.timestamp >= two_weeks_ago && r.timestamp < week_ago)
            .map(|r| r.name.as_str())
            .collect();
        if earlier.is_empty() {
            return None;
        }

        records
            .iter()
            .rev()
            .filter(|r| r.timestamp >= week_ago && r.timestamp <= now)
            .find(|r| !earlier.contains(r.name.as_str()))
            .map(|r| {
                Suggestion::new(
                    format!("You visited {} for the first time in a while. What was that experience like?", r.name),
                    SuggestionType::Location,
                    "New place",
                    PRIORITY_LOCATION,
                    "📍",
                )
            })
    }

    /// Workouts in the last 7 days
    pub fn workout_prompt(&self, records: &[WorkoutRecord], now: NaiveDateTime) -> Option<Suggestion> {
        if records.len() < WORKOUT_MIN_RECORDS {
            return None;
        }

        let week_ago = now - Duration::days(7);
        let this_week: Vec<&WorkoutRecord> = records
            .iter()
            .filter(|r| r.timestamp >= week_ago && r.timestamp <= now)
            .collect();

        match this_week.len() {
            0 => Some(Suggestion::new(
                "You haven't worked out this week. What's been getting in the way?",
                SuggestionType::Workout,
                "Missed workouts",
                PRIORITY_WORKOUT,
                "🛋️",
            )),
            n if n >= 5 => Some(Suggestion::new(
                format!("{} workouts this week - you're crushing it! How does your body feel?", n),
                SuggestionType::Workout,
                "Crushing it",
                PRIORITY_WORKOUT,
                "🔥",
            )),
            n @ 3..=4 => {
                let favorite = most_frequent(this_week.iter().map(|r| r.workout_type.as_str()))
                    .map(|(kind, _)| kind)
                    .unwrap_or("exercise");
                Some(Suggestion::new(
                    format!("You're building momentum with {}. What keeps you motivated?", favorite),
                    SuggestionType::Workout,
                    format!("{} workouts this week", n),
                    PRIORITY_WORKOUT,
                    "💪",
                ))
            }
            _ => None,
        }
    }

    /// Dominant mood across the last 10 tracks
    pub fn music_prompt(&self, records: &[MusicRecord]) -> Option<Suggestion> {
        if records.len() < MUSIC_MIN_RECORDS {
            return None;
        }

        let (_, last) = split_windows(records, MUSIC_WINDOW);
        let (mood, count) = most_frequent(
            last.iter()
                .map(|r| r.mood.as_str())
                .filter(|m| !m.is_empty()),
        )?;
        if count < DOMINANT_MOOD_MIN {
            return None;
        }

        let prompt = match mood.to_lowercase().as_str() {
            "sad" => "You've been listening to a lot of sad music. What emotions are you processing?".to_string(),
            "energetic" => "Your playlist has been full of energy. What's fueling you right now?".to_string(),
            "calm" => "You've been drawn to calm music lately. What are you seeking peace from?".to_string(),
            "nostalgic" => "Your music has been nostalgic lately. What memories keep coming back?".to_string(),
            other => format!("Your music has had a {} mood lately. How does it mirror how you feel?", other),
        };

        let genre = most_frequent(
            last.iter()
                .map(|r| r.genre.as_str())
                .filter(|g| !g.is_empty()),
        )
        .map(|(g, _)| g)
        .unwrap_or("mixed");

        Some(Suggestion::new(
            prompt,
            SuggestionType::Music,
            format!("Mostly {} music ({} of {} tracks)", genre, count, last.len()),
            PRIORITY_MUSIC,
            "🎵",
        ))
    }

    /// Today's screen time against the preceding week
    pub fn screen_time_prompt(&self, records: &[ScreenTimeRecord], now: NaiveDateTime) -> Option<Suggestion> {
        if records.len() < SCREEN_MIN_RECORDS {
            return None;
        }

        let today = now.date();
        let (latest, earlier) = records.split_last()?;
        if latest.timestamp.date() != today {
            return None;
        }

        let previous: Vec<f64> = earlier
            .iter()
            .rev()
            .filter(|r| r.timestamp.date() != today)
            .take(SIGNAL_WINDOW)
            .map(|r| r.hours)
            .collect();
        if previous.is_empty() {
            return None;
        }

        let average = mean(previous.iter().copied());
        let deviation = latest.hours - average;

        if deviation > SCREEN_DEVIATION_HOURS {
            Some(Suggestion::new(
                format!(
                    "Your screen time is {:.1} hours higher than usual today. What's pulling you in?",
                    deviation
                ),
                SuggestionType::Screen,
                format!("{:.1}h today vs {:.1}h average", latest.hours, average),
                PRIORITY_SCREEN,
                "📱",
            ))
        } else if deviation < -SCREEN_DEVIATION_HOURS {
            Some(Suggestion::new(
                format!(
                    "You've spent {:.1} fewer hours on screens today. What did you do instead?",
                    deviation.abs()
                ),
                SuggestionType::Screen,
                format!("{:.1}h today vs {:.1}h average", latest.hours, average),
                PRIORITY_SCREEN,
                "🌿",
            ))
        } else {
            None
        }
    }
}

/// Split into (prior window, recent window), each at most `size` long
fn split_windows<T>(records: &[T], size: usize) -> (&[T], &[T]) {
    let recent_start = records.len().saturating_sub(size);
    let prior_start = recent_start.saturating_sub(size);
    (&records[prior_start..recent_start], &records[recent_start..])
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Most frequent value; earliest first occurrence wins ties
fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> Option<(&'a str, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, v) in values.enumerate() {
        counts.entry(v).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, (n, _))| (v, n))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap().and_hms_opt(21, 0, 0).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDateTime {
        now() - Duration::days(n)
    }

    fn sleep(hours: &[f64]) -> Vec<SleepRecord> {
        let len = hours.len() as i64;
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| SleepRecord { timestamp: days_ago(len - i as i64), hours: *h, quality: None })
            .collect()
    }

    fn place(name: &str, ago: i64) -> LocationRecord {
        LocationRecord { timestamp: days_ago(ago), name: name.into(), coordinates: None }
    }

    fn workout(kind: &str, ago: i64) -> WorkoutRecord {
        WorkoutRecord { timestamp: days_ago(ago), workout_type: kind.into(), duration_minutes: 30, intensity: "medium".into() }
    }

    fn track(genre: &str, mood: &str) -> MusicRecord {
        MusicRecord { timestamp: days_ago(1), track: "t".into(), genre: genre.into(), mood: mood.into() }
    }

    fn screen(hours: f64, ago: i64) -> ScreenTimeRecord {
        ScreenTimeRecord { timestamp: days_ago(ago), hours, app_categories: vec![] }
    }

    #[test]
    fn test_sleep_decrease() {
        let gen = BehavioralPromptGenerator::new();
        let mut hours = vec![8.0; 7];
        hours.extend(vec![5.0; 7]);
        let prompt = gen.sleep_prompt(&sleep(&hours)).unwrap();
        assert_eq!(prompt.priority, PRIORITY_SLEEP);
        assert!(prompt.prompt.contains("3.0 hours less"), "{}", prompt.prompt);
    }

    #[test]
    fn test_sleep_small_change_ignored() {
        let gen = BehavioralPromptGenerator::new();
        let mut hours = vec![7.0; 7];
        hours.extend(vec![7.4; 7]);
        assert!(gen.sleep_prompt(&sleep(&hours)).is_none());
        assert!(gen.sleep_prompt(&sleep(&[8.0, 5.0])).is_none());
    }

    #[test]
    fn test_sleep_short_history_uses_available_prior() {
        let gen = BehavioralPromptGenerator::new();
        // 8 records: prior window is the first one only
        let hours = [4.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0];
        let prompt = gen.sleep_prompt(&sleep(&hours)).unwrap();
        assert!(prompt.prompt.contains("4.0 hours more"), "{}", prompt.prompt);
    }

    #[test]
    fn test_location_stagnant_and_scattered() {
        let gen = BehavioralPromptGenerator::new();
        let home: Vec<_> = (0..7).map(|i| place("Home", i)).collect();
        let p = gen.location_prompt(&home, now()).unwrap();
        assert!(p.prompt.contains("Home"));
        assert_eq!(p.context, "Same place all week");

        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let many: Vec<_> = names.iter().enumerate().map(|(i, n)| place(n, i as i64)).collect();
        assert_eq!(gen.location_prompt(&many, now()).unwrap().context, "On the move");
    }

    #[test]
    fn test_location_new_place() {
        let gen = BehavioralPromptGenerator::new();
        let records = vec![
            place("Home", 10),
            place("Office", 9),
            place("Home", 3),
            place("Office", 2),
            place("Museum", 1),
        ];
        let p = gen.location_prompt(&records, now()).unwrap();
        assert!(p.prompt.contains("Museum"));
        assert_eq!(p.priority, PRIORITY_LOCATION);
    }

    #[test]
    fn test_workout_buckets() {
        let gen = BehavioralPromptGenerator::new();

        let missed = vec![workout("run", 20), workout("run", 12)];
        assert_eq!(gen.workout_prompt(&missed, now()).unwrap().context, "Missed workouts");

        let momentum = vec![workout("yoga", 1), workout("run", 2), workout("yoga", 3)];
        let p = gen.workout_prompt(&momentum, now()).unwrap();
        assert!(p.prompt.contains("yoga"));

        let crushing: Vec<_> = (0..5).map(|i| workout("swim", i)).collect();
        assert_eq!(gen.workout_prompt(&crushing, now()).unwrap().context, "Crushing it");

        let quiet = vec![workout("run", 20), workout("run", 1)];
        assert!(gen.workout_prompt(&quiet, now()).is_none());
    }

    #[test]
    fn test_music_mood_mapping() {
        let gen = BehavioralPromptGenerator::new();
        let mut tracks: Vec<_> = (0..5).map(|_| track("indie", "sad")).collect();
        tracks.extend((0..3).map(|_| track("pop", "happy")));
        let p = gen.music_prompt(&tracks).unwrap();
        assert!(p.prompt.contains("sad music"));
        assert!(p.context.contains("indie"));

        let generic: Vec<_> = (0..6).map(|_| track("jazz", "dreamy")).collect();
        assert!(gen.music_prompt(&generic).unwrap().prompt.contains("dreamy"));

        let mixed: Vec<_> = ["a", "b", "c", "d", "e", "f"].iter().map(|m| track("pop", m)).collect();
        assert!(gen.music_prompt(&mixed).is_none());
    }

    #[test]
    fn test_screen_time_deviation() {
        let gen = BehavioralPromptGenerator::new();
        let mut records: Vec<_> = (1..=7).map(|i| screen(3.0, i)).collect();
        records.push(screen(6.5, 0));
        let p = gen.screen_time_prompt(&records, now()).unwrap();
        assert!(p.prompt.contains("3.5 hours higher"), "{}", p.prompt);

        records.pop();
        records.push(screen(0.5, 0));
        assert!(gen.screen_time_prompt(&records, now()).unwrap().prompt.contains("2.5 fewer"));

        records.pop();
        records.push(screen(4.0, 0));
        assert!(gen.screen_time_prompt(&records, now()).is_none());
    }

    #[test]
    fn test_screen_time_needs_today() {
        let gen = BehavioralPromptGenerator::new();
        let records: Vec<_> = (1..=5).map(|i| screen(i as f64 * 3.0, i)).collect();
        assert!(gen.screen_time_prompt(&records, now()).is_none());
    }

    #[test]
    fn test_most_frequent_tie_keeps_first() {
        let values = ["b", "a", "a", "b"];
        assert_eq!(most_frequent(values.iter().copied()), Some(("b", 2)));
    }
}
