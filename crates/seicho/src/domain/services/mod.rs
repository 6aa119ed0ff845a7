//! Domain Services
//!
//! Pure progression rules with no infrastructure dependencies:
//! the level threshold table, the badge catalog with its unlock rule
//! tables, and the action reward table.

pub mod catalog;
pub mod levels;
pub mod rewards;

pub use catalog::{get_badge, BADGES};
pub use levels::LevelProgress;
