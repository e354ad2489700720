//! Simulation engine for CREEPFIELD.
//!
//! Owns the entity registry, runs the per-frame systems (update, spawn
//! flush, collision, sweep) and produces `FrameSnapshot`s for a renderer.

pub mod bullet;
pub mod creep;
pub mod engine;
pub mod entity;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use creepfield_core as core;
pub use bullet::{Bullet, BulletSpec};
pub use creep::{Creep, CreepParams};
pub use engine::World;
pub use entity::{Entity, EntityKind, ShooterRef};
