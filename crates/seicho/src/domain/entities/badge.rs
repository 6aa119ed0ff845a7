//! Badge - An immutable badge definition
//!
//! Definitions carry display metadata only; unlock conditions live in the
//! catalog rule tables, not inside the entity.

use serde::Serialize;

use crate::domain::value_objects::Rarity;

/// A badge definition from the static catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Badge {
    /// Unique identifier, stable across releases
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Description of how to earn the badge
    pub description: &'static str,
    /// Emoji shown next to the badge
    pub icon: &'static str,
    /// Rarity tier
    pub rarity: Rarity,
}

impl Badge {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name,
            description,
            icon,
            rarity,
        }
    }
}
