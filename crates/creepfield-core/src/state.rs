//! Frame snapshot: the complete visible state handed to the renderer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;
use crate::types::{Aabb, EntityId, FrameClock};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub clock: FrameClock,
    pub paused: bool,
    pub stats: FrameStats,
    /// Live entities in registry (spawn) order.
    pub entities: Vec<EntityView>,
}

/// Counters for the on-screen debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub entity_count: usize,
    pub creeps: usize,
    pub bullets: usize,
    pub walls: usize,
    /// Narrow-phase overlaps found in the last frame.
    pub collisions: usize,
}

/// One entity as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub center: DVec2,
    pub bounds: Aabb,
    pub visual: Visual,
}

/// Variant-specific drawing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Visual {
    Creep {
        /// Facing angle in radians, [0, 2π).
        rotation: f64,
        /// Idle breathing scale around the center (1.0 = rest size).
        breath_scale: f64,
        health: i32,
    },
    Bullet,
    /// Grid coordinates let the renderer query terrain adjacency.
    Wall { grid_x: i32, grid_y: i32 },
}

/// Render collaborator contract. Drawing, color and DPI are its concern.
pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameSnapshot);
}
