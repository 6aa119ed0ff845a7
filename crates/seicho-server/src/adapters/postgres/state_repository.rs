//! PostgreSQL implementation of StateRepository
//!
//! One row per namespaced key in `dashboard_state`, value stored as JSONB.

use async_trait::async_trait;
use sqlx::PgPool;

use seicho::{DomainError, StateRepository};

/// PostgreSQL implementation of StateRepository
pub struct PgStateRepository {
    pool: PgPool,
}

impl PgStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for PgStateRepository {
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let value = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM dashboard_state WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(value)
    }

    async fn write(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO dashboard_state (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
