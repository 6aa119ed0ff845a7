//! Value Objects
//!
//! Immutable value types used across the progression domain.

mod rarity;
mod stats;

pub use rarity::Rarity;
pub use stats::StatsSnapshot;
