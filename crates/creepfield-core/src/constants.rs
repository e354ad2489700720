//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::SimConfig`]; every value
//! here can be overridden from a config file.

// --- Arena ---

/// Default canvas width in pixels.
pub const DEFAULT_BOUNDS_WIDTH: f64 = 800.0;

/// Default canvas height in pixels.
pub const DEFAULT_BOUNDS_HEIGHT: f64 = 600.0;

// --- Movement ---

/// Fraction of the remaining distance covered by the visible position each frame.
pub const MOVEMENT_SMOOTHING: f64 = 0.1;

/// Intent components at or below this magnitude snap to exactly zero.
pub const MIN_DIRECTION: f64 = 1e-4;

/// Per-axis distance under which an entity counts as resting on its target.
pub const IDLE_EPSILON: f64 = 0.1;

// --- Creep ---

pub const CREEP_HEALTH: i32 = 100;

/// Pixels per frame at full intent.
pub const CREEP_SPEED: f64 = 2.0;

/// Fraction of the shortest angular delta applied per frame.
pub const CREEP_ROTATION_SPEED: f64 = 0.15;

/// Seconds between autofire shots.
pub const CREEP_SHOOT_INTERVAL: f64 = 0.1;

/// Distance from the creep center to the muzzle point.
pub const CREEP_ATTACK_OFFSET: f64 = 20.0;

/// Idle breathing phase speed (radians per second).
pub const CREEP_BREATH_SPEED: f64 = 6.0;

/// Idle breathing amplitude in pixels, divided by the creep width for scale.
pub const CREEP_BREATH_AMPLITUDE: f64 = 0.4;

// --- Bullet ---

/// Units per second (5 px per frame at 60 Hz).
pub const BULLET_SPEED: f64 = 300.0;

pub const BULLET_RADIUS: f64 = 2.5;

pub const BULLET_DAMAGE: i32 = 10;

/// Seconds before a bullet expires.
pub const BULLET_MAX_LIFETIME: f64 = 4.0;

// --- Environment ---

/// Edge length of one terrain cell in pixels.
pub const WALL_CELL_SIZE: f64 = 40.0;

// --- Collision ---

/// Broad-phase grid cell edge in pixels. Matches the largest common diameter.
pub const COLLISION_CELL_SIZE: f64 = 40.0;

// --- Seeding ---

/// Default RNG seed for scattered spawns.
pub const DEFAULT_SEED: u64 = 42;
