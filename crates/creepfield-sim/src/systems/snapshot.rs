//! Snapshot system: builds the render view of the current entity set.
//!
//! Read-only; never modifies the world.

use creepfield_core::enums::EntityType;
use creepfield_core::state::{EntityView, FrameSnapshot, FrameStats, Visual};
use creepfield_core::types::FrameClock;

use crate::entity::{Entity, EntityKind};

/// Build a complete FrameSnapshot from the current entity list.
pub fn build_snapshot(
    entities: &[Entity],
    clock: &FrameClock,
    paused: bool,
    collisions: usize,
) -> FrameSnapshot {
    FrameSnapshot {
        clock: *clock,
        paused,
        stats: build_stats(entities, collisions),
        entities: entities.iter().map(build_view).collect(),
    }
}

fn build_stats(entities: &[Entity], collisions: usize) -> FrameStats {
    let count = |t: EntityType| entities.iter().filter(|e| e.entity_type() == t).count();
    FrameStats {
        entity_count: entities.len(),
        creeps: count(EntityType::Creep),
        bullets: count(EntityType::Bullet),
        walls: count(EntityType::Environment),
        collisions,
    }
}

fn build_view(entity: &Entity) -> EntityView {
    let visual = match &entity.kind {
        EntityKind::Creep(creep) => Visual::Creep {
            rotation: creep.current_rotation,
            breath_scale: creep.breath_scale(entity.body.size.x),
            health: creep.health,
        },
        EntityKind::Bullet(_) => Visual::Bullet,
        EntityKind::Wall(wall) => Visual::Wall {
            grid_x: wall.grid_x,
            grid_y: wall.grid_y,
        },
    };
    EntityView {
        id: entity.id(),
        entity_type: entity.entity_type(),
        center: entity.center(),
        bounds: entity.bounds(),
        visual,
    }
}
