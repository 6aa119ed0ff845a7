//! StatsSnapshot - Partial gameplay statistics reported by feature modules
//!
//! Every field is optional: a caller reports only the statistics it owns,
//! and absent fields are skipped entirely during badge evaluation. This
//! lets e.g. the diary module report its counters without re-triggering
//! vocabulary checks.

use serde::{Deserialize, Serialize};

/// A partial snapshot of player statistics
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Vocabulary items fully mastered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastered_words: Option<u64>,
    /// Consecutive days with a diary entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diary_streak: Option<u64>,
    /// Total diary entries written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diary_count: Option<u64>,
    /// Practice conversations completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_count: Option<u64>,
    /// Shadowing exercises mastered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadowing_mastered: Option<u64>,
    /// Consecutive login days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u64>,
    /// Whether today's study goal was reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goal_reached: Option<bool>,
}

impl StatsSnapshot {
    /// True when no field is populated (evaluation would be a no-op)
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_empty() {
        assert!(StatsSnapshot::default().is_empty());
    }

    #[test]
    fn test_any_populated_field_marks_non_empty() {
        let stats = StatsSnapshot {
            streak: Some(0),
            ..Default::default()
        };
        assert!(!stats.is_empty());

        let stats = StatsSnapshot {
            daily_goal_reached: Some(false),
            ..Default::default()
        };
        assert!(!stats.is_empty());
    }
}
