//! Seicho API Routes
//!
//! - /dashboard/progression - XP, level and badge state
//! - /dashboard/progression/xp - XP accumulation
//! - /dashboard/progression/actions/:action - reward-table actions
//! - /dashboard/progression/stats - statistics-driven badge evaluation
//! - /dashboard/progression/badges/:id/unlock - direct unlock
//! - /dashboard/progression/notification/ack - toast acknowledgement

pub mod progression;
pub mod swagger;
