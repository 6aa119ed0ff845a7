//! Domain Entities
//!
//! - ProgressRecord: the single mutable per-player progress state
//! - Badge: an immutable catalog-wide badge definition

mod badge;
mod progress;

pub use badge::Badge;
pub use progress::ProgressRecord;
