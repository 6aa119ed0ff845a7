//! Seicho Progression Domain Library
//!
//! Core domain types and interfaces for the Seicho dashboard progression
//! engine: XP accumulation, level derivation and badge unlocks.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (ProgressRecord, Badge)
//!   - `value_objects/`: Immutable value types (Rarity, StatsSnapshot)
//!   - `services/`: Pure domain rules (levels, catalog, rewards)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Key-value persistence interface
//!   - `services/`: Clock interface for injectable time
//!
//! # Usage
//!
//! ```rust,ignore
//! use seicho::domain::{ProgressRecord, Badge, StatsSnapshot};
//! use seicho::ports::{StateRepository, Clock};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    catalog, get_badge, levels, rewards, Badge, DomainError, LevelProgress, ProgressRecord, Rarity,
    StatsSnapshot, BADGES,
};
pub use ports::{Clock, StateRepository};
