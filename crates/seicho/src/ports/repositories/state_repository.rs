//! State Repository Port
//!
//! Abstract key-value interface for persisted dashboard state. The engine
//! stores the serialized progress record under a single namespaced key,
//! distinct from unrelated settings state.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Key-value persistence interface
///
/// Writes are idempotent: writing the same value twice is safe, which is
/// what lets the engine retry on the next mutation after a failed write.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Read the value stored under `key`, None when absent
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Store `value` under `key`, replacing any previous value
    async fn write(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError>;
}
