//! Events emitted by the simulation for UI and log feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, RemovalCause};
use crate::types::EntityId;

/// Discrete things that happened during a frame, drained by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Entity registered. `parent` is the shooter for autofired bullets.
    Spawned {
        id: EntityId,
        entity_type: EntityType,
        parent: Option<EntityId>,
        frame: u64,
    },
    /// A creep took bullet damage.
    Damaged {
        id: EntityId,
        bullet: EntityId,
        amount: i32,
        health: i32,
        frame: u64,
    },
    /// Entity swept at the end of a frame.
    Removed {
        id: EntityId,
        entity_type: EntityType,
        cause: RemovalCause,
        position: DVec2,
        frame: u64,
    },
    /// An entity's update failed and was rolled back; the frame continued.
    UpdateFailed {
        id: EntityId,
        error: String,
        frame: u64,
    },
}
