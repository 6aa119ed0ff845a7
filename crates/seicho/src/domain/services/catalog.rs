//! Badge catalog and unlock rules
//!
//! The catalog is static data; unlock conditions live here as ordered
//! `(threshold, badge_id)` rule tables per statistic category rather than
//! as code inside the [`Badge`] entity.

use crate::domain::entities::Badge;
use crate::domain::value_objects::{Rarity, StatsSnapshot};

/// All badge definitions
pub const BADGES: &[Badge] = &[
    // Vocabulary
    Badge::new(
        "first_word",
        "First Word",
        "Master your first word",
        "🌱",
        Rarity::Common,
    ),
    Badge::new(
        "words_50",
        "Word Collector",
        "Master 50 words",
        "📚",
        Rarity::Common,
    ),
    Badge::new(
        "words_200",
        "Lexicon Builder",
        "Master 200 words",
        "🧠",
        Rarity::Rare,
    ),
    Badge::new(
        "words_500",
        "Walking Dictionary",
        "Master 500 words",
        "🏛️",
        Rarity::Epic,
    ),
    // Diary
    Badge::new(
        "first_diary",
        "Dear Diary",
        "Write your first diary entry",
        "✏️",
        Rarity::Common,
    ),
    Badge::new(
        "diary_10",
        "Regular Writer",
        "Write 10 diary entries",
        "📔",
        Rarity::Rare,
    ),
    Badge::new(
        "diary_50",
        "Chronicler",
        "Write 50 diary entries",
        "📜",
        Rarity::Epic,
    ),
    Badge::new(
        "diary_streak_3",
        "Pen Habit",
        "Write a diary entry 3 days in a row",
        "🖊️",
        Rarity::Common,
    ),
    Badge::new(
        "diary_streak_7",
        "Weekly Journalist",
        "Write a diary entry 7 days in a row",
        "🗞️",
        Rarity::Rare,
    ),
    // Conversation
    Badge::new(
        "first_conversation",
        "Ice Breaker",
        "Complete your first conversation",
        "💬",
        Rarity::Common,
    ),
    Badge::new(
        "conversations_10",
        "Chatterbox",
        "Complete 10 conversations",
        "🗣️",
        Rarity::Rare,
    ),
    Badge::new(
        "conversations_50",
        "Smooth Talker",
        "Complete 50 conversations",
        "🎙️",
        Rarity::Epic,
    ),
    // Shadowing
    Badge::new(
        "first_shadowing",
        "Echo",
        "Master your first shadowing exercise",
        "🎧",
        Rarity::Common,
    ),
    Badge::new(
        "shadowing_10",
        "Mimic",
        "Master 10 shadowing exercises",
        "🎵",
        Rarity::Rare,
    ),
    Badge::new(
        "shadowing_30",
        "Native Ear",
        "Master 30 shadowing exercises",
        "👂",
        Rarity::Epic,
    ),
    // Login streak
    Badge::new(
        "streak_3",
        "Getting Started",
        "Log in 3 days in a row",
        "🔥",
        Rarity::Common,
    ),
    Badge::new(
        "streak_7",
        "Weekly Warrior",
        "Log in 7 days in a row",
        "⚡",
        Rarity::Rare,
    ),
    Badge::new(
        "streak_14",
        "Fortnight Fighter",
        "Log in 14 days in a row",
        "🌟",
        Rarity::Rare,
    ),
    Badge::new(
        "streak_30",
        "Monthly Maven",
        "Log in 30 days in a row",
        "🏆",
        Rarity::Epic,
    ),
    Badge::new(
        "streak_100",
        "Century Club",
        "Log in 100 days in a row",
        "👑",
        Rarity::Legendary,
    ),
    // Levels
    Badge::new(
        "level_5",
        "Apprentice",
        "Reach level 5",
        "🥉",
        Rarity::Common,
    ),
    Badge::new("level_10", "Adept", "Reach level 10", "🥈", Rarity::Rare),
    Badge::new("level_15", "Expert", "Reach level 15", "🥇", Rarity::Epic),
    Badge::new(
        "level_20",
        "Grandmaster",
        "Reach level 20",
        "💎",
        Rarity::Legendary,
    ),
    // Time of day
    Badge::new(
        "early_riser",
        "Early Riser",
        "Study before 6am",
        "🌅",
        Rarity::Rare,
    ),
    Badge::new(
        "night_owl",
        "Night Owl",
        "Study between midnight and 4am",
        "🦉",
        Rarity::Rare,
    ),
    // Daily goal
    Badge::new(
        "goal_getter",
        "Goal Getter",
        "Reach your daily study goal",
        "🎯",
        Rarity::Common,
    ),
];

/// An ordered count rule: reaching `threshold` earns `badge_id`
#[derive(Debug, Clone, Copy)]
pub struct CountRule {
    pub threshold: u64,
    pub badge_id: &'static str,
}

const fn rule(threshold: u64, badge_id: &'static str) -> CountRule {
    CountRule {
        threshold,
        badge_id,
    }
}

const MASTERED_WORD_RULES: &[CountRule] = &[
    rule(1, "first_word"),
    rule(50, "words_50"),
    rule(200, "words_200"),
    rule(500, "words_500"),
];

const DIARY_STREAK_RULES: &[CountRule] = &[rule(3, "diary_streak_3"), rule(7, "diary_streak_7")];

const DIARY_COUNT_RULES: &[CountRule] = &[
    rule(1, "first_diary"),
    rule(10, "diary_10"),
    rule(50, "diary_50"),
];

const CONVERSATION_RULES: &[CountRule] = &[
    rule(1, "first_conversation"),
    rule(10, "conversations_10"),
    rule(50, "conversations_50"),
];

const SHADOWING_RULES: &[CountRule] = &[
    rule(1, "first_shadowing"),
    rule(10, "shadowing_10"),
    rule(30, "shadowing_30"),
];

const STREAK_RULES: &[CountRule] = &[
    rule(3, "streak_3"),
    rule(7, "streak_7"),
    rule(14, "streak_14"),
    rule(30, "streak_30"),
    rule(100, "streak_100"),
];

const LEVEL_RULES: &[CountRule] = &[
    rule(5, "level_5"),
    rule(10, "level_10"),
    rule(15, "level_15"),
    rule(20, "level_20"),
];

/// Look up a badge definition by id
pub fn get_badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|badge| badge.id == id)
}

fn satisfied(rules: &'static [CountRule], value: u64) -> impl Iterator<Item = &'static str> {
    rules
        .iter()
        .filter(move |rule| rule.threshold <= value)
        .map(|rule| rule.badge_id)
}

/// Badge ids satisfied by a statistics snapshot, in category order:
/// mastered words, diary streak, diary count, conversations, shadowing,
/// login streak, daily goal. Within a category, ascending threshold.
/// Absent fields contribute nothing.
///
/// The order is load-bearing: when several badges unlock in one call the
/// last id returned here ends up as the pending notification.
pub fn badges_for(stats: &StatsSnapshot) -> Vec<&'static str> {
    let mut ids = Vec::new();

    if let Some(count) = stats.mastered_words {
        ids.extend(satisfied(MASTERED_WORD_RULES, count));
    }
    if let Some(streak) = stats.diary_streak {
        ids.extend(satisfied(DIARY_STREAK_RULES, streak));
    }
    if let Some(count) = stats.diary_count {
        ids.extend(satisfied(DIARY_COUNT_RULES, count));
    }
    if let Some(count) = stats.conversation_count {
        ids.extend(satisfied(CONVERSATION_RULES, count));
    }
    if let Some(count) = stats.shadowing_mastered {
        ids.extend(satisfied(SHADOWING_RULES, count));
    }
    if let Some(streak) = stats.streak {
        ids.extend(satisfied(STREAK_RULES, streak));
    }
    if stats.daily_goal_reached == Some(true) {
        ids.push("goal_getter");
    }

    ids
}

/// Badge ids earned by reaching `level`
pub fn level_badges(level: u32) -> Vec<&'static str> {
    satisfied(LEVEL_RULES, level as u64).collect()
}

/// Badge ids earned by studying at `local_hour` (0-23).
/// Early riser covers any pre-dawn hour; night owl only [0, 4).
pub fn time_of_day_badges(local_hour: u32) -> Vec<&'static str> {
    let mut ids = Vec::new();
    if local_hour < 6 {
        ids.push("early_riser");
    }
    if local_hour < 4 {
        ids.push("night_owl");
    }
    ids
}
