//! Application Services (Use Cases)
//!
//! Orchestration around the progression domain: load, mutate, persist.

mod progression;

pub use progression::{
    Overview, ProgressSummary, ProgressionService, UnlockedBadge, XpGain, PROGRESS_KEY,
};
