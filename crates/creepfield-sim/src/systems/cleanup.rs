//! Sweep: drops entities flagged for removal during the frame.

use creepfield_core::events::SimEvent;

use crate::entity::Entity;

/// Remove every flagged entity, keeping the rest in order. Returns the
/// number removed.
pub fn run(entities: &mut Vec<Entity>, events: &mut Vec<SimEvent>, frame: u64) -> usize {
    let before = entities.len();
    entities.retain(|entity| {
        let Some(cause) = entity.removal() else {
            return true;
        };
        log::debug!("removing {} ({cause:?})", entity.id());
        events.push(SimEvent::Removed {
            id: entity.id(),
            entity_type: entity.entity_type(),
            cause,
            position: entity.body.position,
            frame,
        });
        false
    });
    before - entities.len()
}
