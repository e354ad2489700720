//! The world: entity registry and frame driver.
//!
//! `World` owns the live entities in spawn order, the frame clock, the
//! pending-spawn queue and the event buffer. Completely headless, so the
//! same frame sequence always produces the same state.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use creepfield_core::config::SimConfig;
use creepfield_core::enums::EntityType;
use creepfield_core::error::SimError;
use creepfield_core::events::SimEvent;
use creepfield_core::input::KeyState;
use creepfield_core::state::{FrameRenderer, FrameSnapshot};
use creepfield_core::types::{EntityId, FrameClock};

use crate::bullet::{Bullet, BulletSpec};
use crate::creep::{Creep, CreepParams};
use crate::entity::{Body, Entity, EntityKind, UpdateContext, Wall};
use crate::systems;

/// Log a broken invariant. Panics in debug builds.
pub(crate) fn report_invariant(detail: impl Into<String>) {
    let err = SimError::InvariantViolation(detail.into());
    log::error!("{err}");
    if cfg!(debug_assertions) {
        panic!("{err}");
    }
}

pub struct World {
    config: SimConfig,
    entities: Vec<Entity>,
    next_id: u64,
    clock: FrameClock,
    paused: bool,
    pending: Vec<BulletSpec>,
    events: Vec<SimEvent>,
    rng: ChaCha8Rng,
    last_collisions: usize,
}

impl Default for World {
    fn default() -> Self {
        Self::with_config(SimConfig::default())
    }
}

impl World {
    /// Create an empty world after validating `config`.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            entities: Vec::new(),
            next_id: 1,
            clock: FrameClock::default(),
            paused: false,
            pending: Vec::new(),
            events: Vec::new(),
            last_collisions: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    // --- Spawning ---

    pub fn spawn_creep(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        params: CreepParams,
    ) -> Result<EntityId, SimError> {
        let speed = params.speed.unwrap_or(self.config.creep.speed);
        let body = Body::checked("World::spawn_creep", x, y, width, height, speed)?;
        let creep = Creep::checked("World::spawn_creep", &params, &self.config.creep)?;
        Ok(self.register(body, EntityKind::Creep(creep), None))
    }

    /// Register a wall at canvas `(x, y)` for terrain cell (column `grid_x`, row `grid_y`).
    pub fn spawn_wall(
        &mut self,
        grid_x: i32,
        grid_y: i32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<EntityId, SimError> {
        let body = Body::checked("World::spawn_wall", x, y, width, height, 0.0)?;
        Ok(self.register(body, EntityKind::Wall(Wall::new(grid_x, grid_y)), None))
    }

    pub fn spawn_bullet(&mut self, spec: BulletSpec) -> Result<EntityId, SimError> {
        let (body, bullet) = Bullet::from_spec(&spec).inspect_err(|e| {
            log::warn!("bullet rejected: {e}");
        })?;
        let parent = spec.shooter.map(|s| s.id);
        Ok(self.register(body, EntityKind::Bullet(bullet), parent))
    }

    fn register(&mut self, body: Body, kind: EntityKind, parent: Option<EntityId>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        // find_by_id binary-searches, so ids must stay strictly increasing.
        if let Some(last) = self.entities.last().map(Entity::id) {
            if last >= id {
                report_invariant(format!("entity id {id} registered after {last}"));
            }
        }

        let entity = Entity::new(id, body, kind);
        let entity_type = entity.entity_type();
        log::debug!("spawned {} {id} at {}", entity_type.as_str(), entity.body.position);
        self.entities.push(entity);
        self.events.push(SimEvent::Spawned {
            id,
            entity_type,
            parent,
            frame: self.clock.frame,
        });
        id
    }

    // --- Queries ---

    /// Entities in spawn order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<&Entity> {
        // Ids are assigned in increasing order and the list keeps spawn order.
        self.entities
            .binary_search_by_key(&id, Entity::id)
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = self.entities.binary_search_by_key(&id, Entity::id).ok()?;
        Some(&mut self.entities[i])
    }

    pub fn find_by_type(&self, entity_type: EntityType) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .iter()
            .filter(move |e| e.entity_type() == entity_type)
    }

    /// Other entities whose centers lie within `radius` of `id`'s center on
    /// both axes. Empty if `id` is unknown.
    pub fn entities_near(&self, id: EntityId, radius: f64) -> Vec<&Entity> {
        let Some(origin) = self.find_by_id(id).map(Entity::center) else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|e| e.id() != id)
            .filter(|e| {
                let d = (e.center() - origin).abs();
                d.x <= radius && d.y <= radius
            })
            .collect()
    }

    // --- Frame ---

    /// Advance one frame of `dt` seconds with `keys` held. No-op while paused.
    pub fn advance_frame(&mut self, dt: f64, keys: &KeyState) {
        if self.paused {
            return;
        }
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("advance_frame: bad dt {dt}, using 0");
            0.0
        };

        self.clock.advance(dt);
        let frame = self.clock.frame;

        let ctx = UpdateContext {
            dt,
            keys,
            bounds: self.config.bounds,
            smoothing: self.config.movement_smoothing,
            bullet: &self.config.bullet,
        };
        systems::update::run(
            &mut self.entities,
            &ctx,
            &mut self.pending,
            &mut self.events,
            frame,
        );

        self.flush_pending();

        self.last_collisions = systems::collision::run(
            &mut self.entities,
            self.config.collision.broad_phase,
            self.config.collision.cell_size,
            &self.config.combat,
            &mut self.events,
            frame,
        );

        systems::cleanup::run(&mut self.entities, &mut self.events, frame);
    }

    /// Advance using a display-refresh timestamp in milliseconds. The first
    /// call only primes the clock. Timestamps are tracked while paused so
    /// resuming does not produce one huge step.
    pub fn advance_to(&mut self, timestamp_ms: f64, keys: &KeyState) {
        let dt = self.clock.delta_from_timestamp(timestamp_ms);
        self.advance_frame(dt, keys);
    }

    fn flush_pending(&mut self) {
        for spec in std::mem::take(&mut self.pending) {
            // Rejections are logged by spawn_bullet.
            let _ = self.spawn_bullet(spec);
        }
    }

    // --- Output ---

    pub fn snapshot(&self) -> FrameSnapshot {
        systems::snapshot::build_snapshot(
            &self.entities,
            &self.clock,
            self.paused,
            self.last_collisions,
        )
    }

    pub fn render(&self, renderer: &mut impl FrameRenderer) {
        renderer.render(&self.snapshot());
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Center of `id`, if it is registered.
    pub fn center_of(&self, id: EntityId) -> Option<DVec2> {
        self.find_by_id(id).map(Entity::center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "registered after")]
    fn test_reused_id_is_an_invariant_violation() {
        let mut world = World::default();
        world.spawn_wall(0, 0, 0.0, 0.0, 40.0, 40.0).unwrap();
        world.next_id = 1;
        let _ = world.spawn_wall(1, 0, 40.0, 0.0, 40.0, 40.0);
    }

    #[test]
    fn test_ids_increase_across_kinds() {
        let mut world = World::default();
        let wall = world.spawn_wall(0, 0, 0.0, 0.0, 40.0, 40.0).unwrap();
        let creep = world
            .spawn_creep(100.0, 100.0, 15.0, 15.0, CreepParams::default())
            .unwrap();
        assert!(creep > wall);
        assert_eq!(world.find_by_id(creep).map(Entity::id), Some(creep));
    }
}
