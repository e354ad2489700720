//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity type tag. Drives collision-response branching and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    Creep,
    Bullet,
    Environment,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Creep => "Creep",
            EntityType::Bullet => "Bullet",
            EntityType::Environment => "Environment",
        }
    }
}

/// Kind of static environment piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentKind {
    Terrain,
    Trap,
    #[default]
    Wall,
    Liquid,
}

/// Why an entity was flagged for the end-of-frame sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Lifetime ran out.
    Expired,
    /// Health dropped to zero or below.
    Killed,
    /// Stopped on contact (bullets).
    Consumed,
}

/// Broad-phase strategy used to generate collision candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhase {
    /// Uniform grid partition with neighbor-cell tests.
    #[default]
    Grid,
    /// Every unordered pair once. Reference for small entity counts.
    BruteForce,
}
