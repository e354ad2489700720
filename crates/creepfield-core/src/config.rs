//! Simulation configuration.
//!
//! Every field has a default taken from [`crate::constants`], so a config
//! file only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BroadPhase, EntityType};
use crate::error::SimError;
use crate::types::Bounds;

/// Top-level configuration for a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for scattered spawns. Same seed = same layout.
    pub seed: u64,
    /// Canvas size used for clamping.
    pub bounds: Bounds,
    /// Fraction of remaining distance covered per frame by smoothed movement.
    pub movement_smoothing: f64,
    pub creep: CreepDefaults,
    pub bullet: BulletDefaults,
    pub collision: CollisionConfig,
    pub combat: CombatPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            bounds: Bounds::default(),
            movement_smoothing: MOVEMENT_SMOOTHING,
            creep: CreepDefaults::default(),
            bullet: BulletDefaults::default(),
            collision: CollisionConfig::default(),
            combat: CombatPolicy::default(),
        }
    }
}

/// Defaults applied to creeps spawned without explicit parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreepDefaults {
    pub health: i32,
    pub speed: f64,
    pub rotation_speed: f64,
    pub shoot_interval: f64,
    pub attack_offset: f64,
    pub breath_speed: f64,
}

impl Default for CreepDefaults {
    fn default() -> Self {
        Self {
            health: CREEP_HEALTH,
            speed: CREEP_SPEED,
            rotation_speed: CREEP_ROTATION_SPEED,
            shoot_interval: CREEP_SHOOT_INTERVAL,
            attack_offset: CREEP_ATTACK_OFFSET,
            breath_speed: CREEP_BREATH_SPEED,
        }
    }
}

/// Parameters of bullets fired by creeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletDefaults {
    /// Units per second.
    pub speed: f64,
    pub radius: f64,
    pub damage: i32,
    /// Seconds.
    pub max_life_time: f64,
}

impl Default for BulletDefaults {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            damage: BULLET_DAMAGE,
            max_life_time: BULLET_MAX_LIFETIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub broad_phase: BroadPhase,
    /// Grid cell edge in pixels. Ignored by the brute-force broad phase.
    pub cell_size: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            broad_phase: BroadPhase::Grid,
            cell_size: COLLISION_CELL_SIZE,
        }
    }
}

/// Friendly-fire and bullet-consumption rules.
///
/// "Creep fire" is a bullet whose shooter was a creep when it fired. Any
/// other bullet (fired by a non-creep or with no shooter) is "foreign fire".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatPolicy {
    /// Creep fire damages creeps.
    pub creep_fire_hurts_creeps: bool,
    /// Creep fire stops on contact with a creep or wall.
    pub creep_fire_consumed_on_hit: bool,
    /// Foreign fire stops on contact with a creep or wall.
    pub foreign_fire_consumed_on_hit: bool,
    /// Every bullet stops on contact with a wall.
    pub walls_stop_bullets: bool,
    /// Bullets may touch the entity that fired them.
    pub self_hit: bool,
}

impl Default for CombatPolicy {
    fn default() -> Self {
        Self {
            creep_fire_hurts_creeps: false,
            creep_fire_consumed_on_hit: false,
            foreign_fire_consumed_on_hit: true,
            walls_stop_bullets: false,
            self_hit: false,
        }
    }
}

impl CombatPolicy {
    /// Whether a bullet fired by `shooter` damages an entity of type `target`.
    pub fn damages(&self, shooter: Option<EntityType>, target: EntityType) -> bool {
        match target {
            EntityType::Creep => {
                if shooter == Some(EntityType::Creep) {
                    self.creep_fire_hurts_creeps
                } else {
                    true
                }
            }
            EntityType::Bullet | EntityType::Environment => false,
        }
    }

    /// Whether a bullet fired by `shooter` stops on contact with `target`.
    pub fn consumes(&self, shooter: Option<EntityType>, target: EntityType) -> bool {
        match target {
            EntityType::Bullet => false,
            EntityType::Environment if self.walls_stop_bullets => true,
            EntityType::Creep | EntityType::Environment => {
                if shooter == Some(EntityType::Creep) {
                    self.creep_fire_consumed_on_hit
                } else {
                    self.foreign_fire_consumed_on_hit
                }
            }
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Reject values that would make the simulation ill-defined.
    pub fn validate(&self) -> Result<(), SimError> {
        fn positive(name: &str, v: f64) -> Result<(), SimError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SimError::Config(format!("{name} must be positive, got {v}")))
            }
        }

        positive("bounds.width", self.bounds.width)?;
        positive("bounds.height", self.bounds.height)?;
        if !(self.movement_smoothing > 0.0 && self.movement_smoothing <= 1.0) {
            return Err(SimError::Config(format!(
                "movement_smoothing must be in (0, 1], got {}",
                self.movement_smoothing
            )));
        }
        if self.creep.health <= 0 {
            return Err(SimError::Config(format!(
                "creep.health must be positive, got {}",
                self.creep.health
            )));
        }
        positive("creep.shoot_interval", self.creep.shoot_interval)?;
        if !self.creep.speed.is_finite() || self.creep.speed < 0.0 {
            return Err(SimError::Config(format!(
                "creep.speed must be non-negative, got {}",
                self.creep.speed
            )));
        }
        if !self.creep.rotation_speed.is_finite() {
            return Err(SimError::Config("creep.rotation_speed must be finite".into()));
        }
        positive("bullet.speed", self.bullet.speed)?;
        positive("bullet.radius", self.bullet.radius)?;
        positive("bullet.max_life_time", self.bullet.max_life_time)?;
        positive("collision.cell_size", self.collision.cell_size)?;
        Ok(())
    }
}
