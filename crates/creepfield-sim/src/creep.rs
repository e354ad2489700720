//! Player-controlled creep: movement, aiming, autofire and idle breathing.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::DVec2;

use creepfield_core::config::CreepDefaults;
use creepfield_core::constants::CREEP_BREATH_AMPLITUDE;
use creepfield_core::enums::EntityType;
use creepfield_core::error::SimError;
use creepfield_core::input::{KeyState, ARROW_DOWN, ARROW_KEYS, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};
use creepfield_core::types::EntityId;

use crate::bullet::BulletSpec;
use crate::entity::{Body, ShooterRef, UpdateContext};
use crate::systems::movement;

/// Optional overrides for a spawned creep. `None` fields use config defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreepParams {
    pub health: Option<i32>,
    pub speed: Option<f64>,
    pub rotation_speed: Option<f64>,
    pub shoot_interval: Option<f64>,
}

impl CreepParams {
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_shoot_interval(mut self, interval: f64) -> Self {
        self.shoot_interval = Some(interval);
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f64) -> Self {
        self.rotation_speed = Some(rotation_speed);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Creep {
    pub health: i32,
    /// Fraction of the shortest angular delta applied per frame.
    pub rotation_speed: f64,
    pub target_rotation: f64,
    /// Radians in [0, 2π).
    pub current_rotation: f64,
    pub shoot_timer: f64,
    pub shoot_interval: f64,
    pub attack_offset: f64,
    pub breath_phase: f64,
    pub breath_speed: f64,
}

impl Creep {
    pub fn new(params: &CreepParams, defaults: &CreepDefaults) -> Self {
        Self {
            health: params.health.unwrap_or(defaults.health),
            rotation_speed: params.rotation_speed.unwrap_or(defaults.rotation_speed),
            target_rotation: 0.0,
            current_rotation: 0.0,
            shoot_timer: 0.0,
            shoot_interval: params.shoot_interval.unwrap_or(defaults.shoot_interval),
            attack_offset: defaults.attack_offset,
            breath_phase: 0.0,
            breath_speed: defaults.breath_speed,
        }
    }

    /// Like [`Creep::new`], but rejects resolved values a live creep cannot
    /// run with.
    pub fn checked(
        context: &'static str,
        params: &CreepParams,
        defaults: &CreepDefaults,
    ) -> Result<Self, SimError> {
        let creep = Self::new(params, defaults);
        let problem = if creep.health <= 0 {
            Some(format!("health must be positive, got {}", creep.health))
        } else if !(creep.shoot_interval.is_finite() && creep.shoot_interval > 0.0) {
            Some(format!("shoot interval must be positive, got {}", creep.shoot_interval))
        } else if !creep.rotation_speed.is_finite() {
            Some(format!("rotation speed must be finite, got {}", creep.rotation_speed))
        } else {
            None
        };
        match problem {
            Some(detail) => {
                let err = SimError::invalid(context, detail);
                log::warn!("{err}");
                Err(err)
            }
            None => Ok(creep),
        }
    }

    pub(crate) fn update(
        &mut self,
        id: EntityId,
        body: &mut Body,
        ctx: &UpdateContext<'_>,
        fired: &mut Vec<BulletSpec>,
    ) -> Result<(), SimError> {
        if self.shoot_interval.is_nan() || self.shoot_interval <= 0.0 {
            return Err(SimError::invalid(
                "Creep::update",
                format!("shoot interval must be positive, got {}", self.shoot_interval),
            ));
        }

        // Idle check uses last frame's motion.
        if body.motion.is_idle() {
            self.breath_phase += ctx.dt * self.breath_speed;
        }

        let intent = movement::compute_intent(ctx.keys);
        movement::integrate(body, intent, ctx.bounds, ctx.smoothing);

        self.aim(ctx.keys, intent);
        self.rotate();

        self.shoot_timer += ctx.dt;
        while self.shoot_timer >= self.shoot_interval {
            let shooter = ShooterRef {
                id,
                kind: EntityType::Creep,
            };
            fired.push(
                BulletSpec::new(self.muzzle(body.center()), self.facing(), ctx.bullet)
                    .with_shooter(shooter),
            );
            self.shoot_timer -= self.shoot_interval;
        }
        Ok(())
    }

    /// Pick the target rotation. Arrow keys win over movement; with neither
    /// the target holds.
    pub fn aim(&mut self, keys: &KeyState, intent: DVec2) {
        if let Some(angle) = arrow_rotation(keys) {
            self.target_rotation = angle;
        } else if intent != DVec2::ZERO {
            self.target_rotation = intent.y.atan2(intent.x);
        }
    }

    /// Turn a `rotation_speed` fraction of the shortest way toward the target.
    pub fn rotate(&mut self) {
        let raw = self.target_rotation - self.current_rotation;
        let delta = raw.sin().atan2(raw.cos());
        self.current_rotation =
            (self.current_rotation + delta * self.rotation_speed).rem_euclid(TAU);
    }

    pub fn facing(&self) -> DVec2 {
        DVec2::new(self.current_rotation.cos(), self.current_rotation.sin())
    }

    /// Bullet spawn point: `attack_offset` along the facing from `center`.
    pub fn muzzle(&self, center: DVec2) -> DVec2 {
        center + self.facing() * self.attack_offset
    }

    /// Render scale for the idle breathing animation.
    pub fn breath_scale(&self, width: f64) -> f64 {
        1.0 + self.breath_phase.sin() * CREEP_BREATH_AMPLITUDE / width
    }

    /// Apply bullet damage. Returns true when health is gone.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health <= 0
    }
}

/// Aim direction from the arrow keys, if any is held. Diagonals take precedence.
pub fn arrow_rotation(keys: &KeyState) -> Option<f64> {
    if !keys.any_down(&ARROW_KEYS) {
        return None;
    }
    let up = keys.is_down(ARROW_UP);
    let down = keys.is_down(ARROW_DOWN);
    let left = keys.is_down(ARROW_LEFT);
    let right = keys.is_down(ARROW_RIGHT);

    let mut angle = 0.0;
    if up {
        angle = -FRAC_PI_2;
    }
    if down {
        angle = FRAC_PI_2;
    }
    if left {
        angle = PI;
    }
    if right {
        angle = 0.0;
    }

    if right && up {
        angle = -FRAC_PI_4;
    }
    if right && down {
        angle = FRAC_PI_4;
    }
    if left && up {
        angle = PI + FRAC_PI_4;
    }
    if left && down {
        angle = PI - FRAC_PI_4;
    }
    Some(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use creepfield_core::config::BulletDefaults;
    use creepfield_core::input::{KEY_RIGHT, KEY_UP};
    use creepfield_core::types::Bounds;

    fn creep() -> Creep {
        Creep::new(&CreepParams::default(), &CreepDefaults::default())
    }

    fn body() -> Body {
        Body::checked("test", 400.0, 400.0, 15.0, 15.0, 2.0).unwrap()
    }

    fn step(creep: &mut Creep, body: &mut Body, keys: &KeyState, dt: f64) -> Vec<BulletSpec> {
        let bullet = BulletDefaults::default();
        let ctx = UpdateContext {
            dt,
            keys,
            bounds: Bounds::default(),
            smoothing: 0.1,
            bullet: &bullet,
        };
        let mut fired = Vec::new();
        creep.update(EntityId(1), body, &ctx, &mut fired).unwrap();
        fired
    }

    #[test]
    fn test_arrow_rotation_table() {
        let cases: [(&[&str], f64); 8] = [
            (&[ARROW_UP], -FRAC_PI_2),
            (&[ARROW_DOWN], FRAC_PI_2),
            (&[ARROW_LEFT], PI),
            (&[ARROW_RIGHT], 0.0),
            (&[ARROW_RIGHT, ARROW_UP], -FRAC_PI_4),
            (&[ARROW_RIGHT, ARROW_DOWN], FRAC_PI_4),
            (&[ARROW_LEFT, ARROW_UP], 5.0 * FRAC_PI_4),
            (&[ARROW_LEFT, ARROW_DOWN], 3.0 * FRAC_PI_4),
        ];
        for (keys, expected) in cases {
            let got = arrow_rotation(&KeyState::pressed(keys.iter().copied())).unwrap();
            assert!((got - expected).abs() < 1e-12, "{keys:?}: {got} != {expected}");
        }
        assert_eq!(arrow_rotation(&KeyState::pressed([KEY_UP])), None);
    }

    #[test]
    fn test_arrows_override_movement() {
        let mut c = creep();
        c.aim(&KeyState::pressed([ARROW_DOWN]), DVec2::X);
        assert_eq!(c.target_rotation, FRAC_PI_2);
    }

    #[test]
    fn test_target_holds_without_input() {
        let mut c = creep();
        c.aim(&KeyState::new(), DVec2::new(0.0, -1.0));
        assert_eq!(c.target_rotation, -FRAC_PI_2);
        c.aim(&KeyState::new(), DVec2::ZERO);
        assert_eq!(c.target_rotation, -FRAC_PI_2);
    }

    #[test]
    fn test_rotation_takes_shortest_path_and_wraps() {
        let mut c = creep();
        c.target_rotation = -FRAC_PI_2;
        c.rotate();
        // 0 - 0.15 * π/2 wraps to just under 2π.
        let expected = TAU - 0.15 * FRAC_PI_2;
        assert!((c.current_rotation - expected).abs() < 1e-12);
        for _ in 0..200 {
            c.rotate();
            assert!((0.0..TAU).contains(&c.current_rotation));
        }
        assert!((c.current_rotation - 3.0 * FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_autofire_catches_up_on_long_frames() {
        let mut c = creep();
        let mut b = body();
        let fired = step(&mut c, &mut b, &KeyState::new(), 0.35);
        assert_eq!(fired.len(), 3);
        assert!((c.shoot_timer - 0.05).abs() < 1e-9);
        let shooter = fired[0].shooter.unwrap();
        assert_eq!(shooter.id, EntityId(1));
        assert_eq!(shooter.kind, EntityType::Creep);
    }

    #[test]
    fn test_muzzle_offset_from_center() {
        let mut c = creep();
        let mut b = body();
        let fired = step(&mut c, &mut b, &KeyState::new(), 0.1);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].origin, DVec2::new(427.5, 407.5));
        assert_eq!(fired[0].direction, DVec2::X);
    }

    #[test]
    fn test_bad_interval_is_invalid_argument() {
        let mut c = creep();
        c.shoot_interval = 0.0;
        let mut b = body();
        let bullet = BulletDefaults::default();
        let keys = KeyState::new();
        let ctx = UpdateContext {
            dt: 0.016,
            keys: &keys,
            bounds: Bounds::default(),
            smoothing: 0.1,
            bullet: &bullet,
        };
        let err = c.update(EntityId(1), &mut b, &ctx, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { .. }));
    }

    #[test]
    fn test_breathing_only_when_idle() {
        let mut c = creep();
        let mut b = body();
        step(&mut c, &mut b, &KeyState::new(), 0.05);
        assert!((c.breath_phase - 0.3).abs() < 1e-12);

        step(&mut c, &mut b, &KeyState::pressed([KEY_RIGHT]), 0.05);
        let moving_phase = c.breath_phase;
        step(&mut c, &mut b, &KeyState::pressed([KEY_RIGHT]), 0.05);
        assert_eq!(c.breath_phase, moving_phase, "no breathing while moving");
    }

    #[test]
    fn test_damage_kills_at_zero() {
        let mut c = creep();
        assert!(!c.take_damage(90));
        assert!(c.take_damage(10));
        assert_eq!(c.health, 0);
    }
}
