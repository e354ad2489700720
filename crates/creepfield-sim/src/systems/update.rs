//! Update phase: every entity steps once, in insertion order.

use creepfield_core::events::SimEvent;

use crate::bullet::BulletSpec;
use crate::entity::{Entity, UpdateContext};

/// Step each entity. Bullets fired go to `pending` in request order.
///
/// A failing entity is rolled back to its pre-update state, its shots are
/// dropped, and the rest of the frame carries on.
pub fn run(
    entities: &mut [Entity],
    ctx: &UpdateContext<'_>,
    pending: &mut Vec<BulletSpec>,
    events: &mut Vec<SimEvent>,
    frame: u64,
) {
    let mut fired = Vec::new();
    for entity in entities.iter_mut() {
        let before = entity.clone();
        fired.clear();
        match entity.update(ctx, &mut fired) {
            Ok(()) => pending.append(&mut fired),
            Err(err) => {
                log::warn!("update of {} failed, rolled back: {err}", entity.id());
                *entity = before;
                events.push(SimEvent::UpdateFailed {
                    id: entity.id(),
                    error: err.to_string(),
                    frame,
                });
            }
        }
    }
}
