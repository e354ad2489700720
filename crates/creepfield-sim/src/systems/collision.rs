//! Collision response.
//!
//! Pairs come from [`crate::spatial::overlapping_pairs`] in ascending order.
//! Each pair runs both sides' handlers once. A handler only mutates its own
//! entity, reading a copy of what it needs from the other side.

use creepfield_core::config::CombatPolicy;
use creepfield_core::enums::{BroadPhase, EntityType, RemovalCause};
use creepfield_core::events::SimEvent;
use creepfield_core::types::EntityId;

use crate::entity::{Entity, EntityKind, ShooterRef};
use crate::spatial;

/// What a handler may know about the entity it touched.
#[derive(Debug, Clone, Copy)]
struct Contact {
    id: EntityId,
    entity_type: EntityType,
    /// Damage and shooter, when the other side is a bullet.
    bullet: Option<(i32, Option<ShooterRef>)>,
}

impl Contact {
    fn of(entity: &Entity) -> Self {
        Self {
            id: entity.id(),
            entity_type: entity.entity_type(),
            bullet: entity.as_bullet().map(|b| (b.damage, b.shooter)),
        }
    }
}

/// Resolve all collisions in the current entity set. Returns the number of
/// overlapping pairs.
pub fn run(
    entities: &mut [Entity],
    broad_phase: BroadPhase,
    cell_size: f64,
    policy: &CombatPolicy,
    events: &mut Vec<SimEvent>,
    frame: u64,
) -> usize {
    let pairs = spatial::overlapping_pairs(entities, broad_phase, cell_size);
    for &(i, j) in &pairs {
        let a = Contact::of(&entities[i]);
        let b = Contact::of(&entities[j]);
        handle(&mut entities[i], &b, policy, events, frame);
        handle(&mut entities[j], &a, policy, events, frame);
    }
    pairs.len()
}

fn handle(
    entity: &mut Entity,
    other: &Contact,
    policy: &CombatPolicy,
    events: &mut Vec<SimEvent>,
    frame: u64,
) {
    let id = entity.id();
    match &mut entity.kind {
        EntityKind::Creep(creep) => {
            let Some((damage, shooter)) = other.bullet else {
                return;
            };
            if is_own_bullet(shooter, id, policy) {
                return;
            }
            if !policy.damages(shooter.map(|s| s.kind), EntityType::Creep) {
                return;
            }
            let killed = creep.take_damage(damage);
            events.push(SimEvent::Damaged {
                id,
                bullet: other.id,
                amount: damage,
                health: creep.health,
                frame,
            });
            if killed && entity.mark_for_removal(RemovalCause::Killed) {
                log::debug!("{id} killed by {}", other.id);
            }
        }
        EntityKind::Bullet(bullet) => {
            if is_own_bullet(bullet.shooter, other.id, policy) {
                return;
            }
            if policy.consumes(bullet.shooter_type(), other.entity_type) {
                entity.mark_for_removal(RemovalCause::Consumed);
            }
        }
        EntityKind::Wall(_) => {}
    }
}

fn is_own_bullet(shooter: Option<ShooterRef>, id: EntityId, policy: &CombatPolicy) -> bool {
    !policy.self_hit && shooter.is_some_and(|s| s.id == id)
}
