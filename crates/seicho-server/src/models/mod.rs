//! Seicho API Data Models
//!
//! Request/response DTOs for the progression HTTP surface.

mod progression;

pub use progression::*;
