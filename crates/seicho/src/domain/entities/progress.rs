//! ProgressRecord - Mutable per-player progression state
//!
//! The record is a singleton per player. `total_xp` only ever grows,
//! `level` is derived from it, and the unlocked badge set is append-only.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::services::levels;

/// Per-player progression state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressRecord {
    /// Cumulative XP, monotonically non-decreasing
    pub total_xp: u64,
    /// Derived from `total_xp`; recomputed on every mutation and on load
    pub level: u32,
    /// Unlocked badge ids, append-only and duplicate-free
    #[serde(default)]
    pub unlocked_badge_ids: Vec<String>,
    /// When each badge was unlocked (absent for blobs written before
    /// timestamps were persisted)
    #[serde(default)]
    pub badge_unlocked_at: BTreeMap<String, DateTime<Utc>>,
    /// Local date of the last XP-earning action
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    /// XP earned since the start of the current local day
    pub daily_xp: u64,
    /// Per-weekday running totals, index 0 = Sunday
    pub weekly_xp: [u64; 7],
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
            unlocked_badge_ids: Vec::new(),
            badge_unlocked_at: BTreeMap::new(),
            last_activity_date: None,
            daily_xp: 0,
            weekly_xp: [0; 7],
        }
    }
}

impl ProgressRecord {
    /// Apply an XP delta for `today`.
    ///
    /// Rejects a zero delta (a zero or negative amount would violate the
    /// monotonicity invariant or be meaningless). On a day rollover the
    /// daily counter and today's weekly slot reset to the delta; the other
    /// six weekly slots are untouched.
    pub fn apply_xp(&mut self, amount: u64, today: NaiveDate) -> Result<(), DomainError> {
        if amount == 0 {
            return Err(DomainError::validation("XP amount must be positive"));
        }

        let is_new_day = self.last_activity_date != Some(today);
        let weekday = today.weekday().num_days_from_sunday() as usize;

        self.total_xp += amount;
        self.level = levels::level_for(self.total_xp);
        self.daily_xp = if is_new_day {
            amount
        } else {
            self.daily_xp + amount
        };
        self.weekly_xp[weekday] = if is_new_day {
            amount
        } else {
            self.weekly_xp[weekday] + amount
        };
        self.last_activity_date = Some(today);

        Ok(())
    }

    /// True when the badge id is already in the unlocked set
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.unlocked_badge_ids.iter().any(|id| id == badge_id)
    }

    /// Record a badge unlock. Idempotent: returns false when the badge
    /// was already unlocked and leaves the record untouched.
    pub fn record_unlock(&mut self, badge_id: &str, at: DateTime<Utc>) -> bool {
        if self.has_badge(badge_id) {
            return false;
        }
        self.unlocked_badge_ids.push(badge_id.to_string());
        self.badge_unlocked_at.insert(badge_id.to_string(), at);
        true
    }

    /// Re-derive the level from total XP. Called after loading a persisted
    /// blob so a stored level can never diverge from `total_xp`.
    pub fn recompute_level(&mut self) {
        self.level = levels::level_for(self.total_xp);
    }
}
