//! Seicho API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// API Client for Seicho
pub struct SeichoClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct BadgeResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: String,
    #[serde(default)]
    pub unlocked_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressSummary {
    pub total_xp: u64,
    pub level: u32,
    pub xp_to_next_level: u64,
    pub xp_progress: f64,
    pub daily_xp: u64,
    pub weekly_xp: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressionResponse {
    pub progress: ProgressSummary,
    pub unlocked_badges: Vec<BadgeResponse>,
    pub locked_badges: Vec<BadgeResponse>,
    #[serde(default)]
    pub pending: Option<BadgeResponse>,
}

#[derive(Debug, Deserialize)]
pub struct XpGainResponse {
    pub progress: ProgressSummary,
    pub leveled_up: bool,
    pub newly_unlocked: Vec<BadgeResponse>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockResponse {
    pub newly_unlocked: Vec<BadgeResponse>,
}

#[derive(Debug, Serialize)]
pub struct AddXpRequest {
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct EvaluateStatsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered_words: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diary_streak: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diary_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadowing_mastered: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_goal_reached: Option<bool>,
}

impl SeichoClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Get the progression overview
    pub async fn progression(&self) -> Result<ProgressionResponse> {
        let url = format!("{}/dashboard/progression", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to connect to Seicho API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let progression: ProgressionResponse =
            resp.json().await.context("Failed to parse response")?;

        Ok(progression)
    }

    /// Add an XP delta
    pub async fn add_xp(&self, amount: u64, action: Option<String>) -> Result<XpGainResponse> {
        let url = format!("{}/dashboard/progression/xp", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&AddXpRequest { amount, action })
            .send()
            .await
            .context("Failed to connect to Seicho API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let gain: XpGainResponse = resp.json().await.context("Failed to parse response")?;

        Ok(gain)
    }

    /// Record a rewarded action
    pub async fn record_action(&self, action: &str) -> Result<XpGainResponse> {
        let url = format!("{}/dashboard/progression/actions/{}", self.base_url, action);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to connect to Seicho API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let gain: XpGainResponse = resp.json().await.context("Failed to parse response")?;

        Ok(gain)
    }

    /// Report a statistics snapshot for badge evaluation
    pub async fn evaluate(&self, stats: &EvaluateStatsRequest) -> Result<UnlockResponse> {
        let url = format!("{}/dashboard/progression/stats", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(stats)
            .send()
            .await
            .context("Failed to connect to Seicho API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let unlocked: UnlockResponse = resp.json().await.context("Failed to parse response")?;

        Ok(unlocked)
    }

    /// Acknowledge the pending badge notification
    pub async fn acknowledge(&self) -> Result<()> {
        let url = format!(
            "{}/dashboard/progression/notification/ack",
            self.base_url
        );
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to connect to Seicho API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        Ok(())
    }
}
