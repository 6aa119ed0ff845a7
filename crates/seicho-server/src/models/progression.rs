//! Progression DTOs - XP, level and badge payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use seicho::domain::Badge;

use crate::application::{Overview, ProgressSummary, UnlockedBadge, XpGain};

/// A badge definition, optionally with its unlock time
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<&'static Badge> for BadgeResponse {
    fn from(badge: &'static Badge) -> Self {
        Self {
            id: badge.id.to_string(),
            name: badge.name.to_string(),
            description: badge.description.to_string(),
            icon: badge.icon.to_string(),
            rarity: badge.rarity.to_string(),
            unlocked_at: None,
        }
    }
}

impl From<&UnlockedBadge> for BadgeResponse {
    fn from(unlocked: &UnlockedBadge) -> Self {
        let mut response = BadgeResponse::from(unlocked.badge);
        response.unlocked_at = unlocked.unlocked_at;
        response
    }
}

/// XP and level summary
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressSummaryResponse {
    pub total_xp: u64,
    pub level: u32,
    pub xp_to_next_level: u64,
    /// Percent through the current level band, in [0, 100]
    pub xp_progress: f64,
    pub daily_xp: u64,
    /// Per-weekday XP totals, index 0 = Sunday
    pub weekly_xp: Vec<u64>,
}

impl From<&ProgressSummary> for ProgressSummaryResponse {
    fn from(summary: &ProgressSummary) -> Self {
        Self {
            total_xp: summary.total_xp,
            level: summary.level,
            xp_to_next_level: summary.xp_to_next_level,
            xp_progress: summary.xp_progress,
            daily_xp: summary.daily_xp,
            weekly_xp: summary.weekly_xp.to_vec(),
        }
    }
}

/// Full progression overview for UI collaborators
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressionResponse {
    pub progress: ProgressSummaryResponse,
    pub unlocked_badges: Vec<BadgeResponse>,
    pub locked_badges: Vec<BadgeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<BadgeResponse>,
}

impl From<&Overview> for ProgressionResponse {
    fn from(overview: &Overview) -> Self {
        Self {
            progress: ProgressSummaryResponse::from(&overview.summary),
            unlocked_badges: overview.unlocked_badges.iter().map(Into::into).collect(),
            locked_badges: overview
                .locked_badges
                .iter()
                .copied()
                .map(Into::into)
                .collect(),
            pending: overview.pending.map(Into::into),
        }
    }
}

/// Add XP request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddXpRequest {
    /// XP delta, must be positive
    pub amount: u64,
    /// Optional action tag, informational only
    #[serde(default)]
    pub action: Option<String>,
}

/// Result of an XP mutation
#[derive(Debug, Serialize, ToSchema)]
pub struct XpGainResponse {
    pub progress: ProgressSummaryResponse,
    pub leveled_up: bool,
    pub newly_unlocked: Vec<BadgeResponse>,
}

impl From<&XpGain> for XpGainResponse {
    fn from(gain: &XpGain) -> Self {
        Self {
            progress: ProgressSummaryResponse::from(&gain.summary),
            leveled_up: gain.leveled_up,
            newly_unlocked: gain.newly_unlocked.iter().copied().map(Into::into).collect(),
        }
    }
}

/// Partial statistics snapshot; absent fields are skipped during
/// evaluation. All counters must be non-negative integers, which typed
/// deserialization enforces before the engine runs.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EvaluateStatsRequest {
    #[serde(default)]
    pub mastered_words: Option<u64>,
    #[serde(default)]
    pub diary_streak: Option<u64>,
    #[serde(default)]
    pub diary_count: Option<u64>,
    #[serde(default)]
    pub conversation_count: Option<u64>,
    #[serde(default)]
    pub shadowing_mastered: Option<u64>,
    #[serde(default)]
    pub streak: Option<u64>,
    #[serde(default)]
    pub daily_goal_reached: Option<bool>,
}

impl From<EvaluateStatsRequest> for seicho::StatsSnapshot {
    fn from(request: EvaluateStatsRequest) -> Self {
        Self {
            mastered_words: request.mastered_words,
            diary_streak: request.diary_streak,
            diary_count: request.diary_count,
            conversation_count: request.conversation_count,
            shadowing_mastered: request.shadowing_mastered,
            streak: request.streak,
            daily_goal_reached: request.daily_goal_reached,
        }
    }
}

/// Badges newly unlocked by an evaluation or direct unlock
#[derive(Debug, Serialize, ToSchema)]
pub struct UnlockResponse {
    pub newly_unlocked: Vec<BadgeResponse>,
}
