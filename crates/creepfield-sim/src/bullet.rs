//! Projectiles: straight-line flight with a lifetime.

use glam::DVec2;

use creepfield_core::config::BulletDefaults;
use creepfield_core::enums::EntityType;
use creepfield_core::error::SimError;

use crate::entity::{Body, ShooterRef};

/// Everything needed to register a bullet.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletSpec {
    pub origin: DVec2,
    /// Any non-zero finite vector; normalized on construction.
    pub direction: DVec2,
    /// Units per second.
    pub speed: f64,
    pub radius: f64,
    pub damage: i32,
    /// Seconds.
    pub max_life_time: f64,
    pub shooter: Option<ShooterRef>,
}

impl BulletSpec {
    pub fn new(origin: DVec2, direction: DVec2, defaults: &BulletDefaults) -> Self {
        Self {
            origin,
            direction,
            speed: defaults.speed,
            radius: defaults.radius,
            damage: defaults.damage,
            max_life_time: defaults.max_life_time,
            shooter: None,
        }
    }

    pub fn with_shooter(mut self, shooter: ShooterRef) -> Self {
        self.shooter = Some(shooter);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_max_life_time(mut self, secs: f64) -> Self {
        self.max_life_time = secs;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Unit direction times speed, units per second.
    pub velocity: DVec2,
    pub damage: i32,
    pub life_time: f64,
    pub max_life_time: f64,
    pub shooter: Option<ShooterRef>,
}

impl Bullet {
    /// Validate a spec and build the bullet with its body.
    ///
    /// The box sits at `(origin.x, origin.y - radius)` with edge `2 * radius`.
    pub fn from_spec(spec: &BulletSpec) -> Result<(Body, Bullet), SimError> {
        const CONTEXT: &str = "Bullet::from_spec";

        let dir = spec.direction;
        let magnitude = dir.length();
        if !dir.is_finite() || magnitude < f64::EPSILON {
            return Err(SimError::invalid(
                CONTEXT,
                format!("direction must be non-zero and finite, got {dir}"),
            ));
        }
        if !spec.max_life_time.is_finite() || spec.max_life_time < 0.0 {
            return Err(SimError::invalid(
                CONTEXT,
                format!("bad max lifetime {}", spec.max_life_time),
            ));
        }

        let diameter = spec.radius * 2.0;
        let body = Body::checked(
            CONTEXT,
            spec.origin.x,
            spec.origin.y - spec.radius,
            diameter,
            diameter,
            spec.speed,
        )?;
        let bullet = Bullet {
            velocity: dir / magnitude * spec.speed,
            damage: spec.damage,
            life_time: 0.0,
            max_life_time: spec.max_life_time,
            shooter: spec.shooter,
        };
        Ok((body, bullet))
    }

    /// Fly for `dt` seconds. Returns true once the lifetime is used up.
    pub(crate) fn update(&mut self, body: &mut Body, dt: f64) -> bool {
        body.position += self.velocity * dt;
        body.motion.target = body.position;
        body.motion.current = body.position;
        self.life_time += dt;
        self.life_time >= self.max_life_time
    }

    /// Type of the shooter at fire time, if there was one.
    pub fn shooter_type(&self) -> Option<EntityType> {
        self.shooter.map(|s| s.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(direction: DVec2) -> BulletSpec {
        BulletSpec::new(DVec2::new(10.0, 20.0), direction, &BulletDefaults::default())
    }

    #[test]
    fn test_box_is_offset_by_radius() {
        let (body, _) = Bullet::from_spec(&spec(DVec2::X)).unwrap();
        assert_eq!(body.position, DVec2::new(10.0, 17.5));
        assert_eq!(body.size, DVec2::splat(5.0));
    }

    #[test]
    fn test_direction_normalized_then_scaled() {
        let (_, bullet) = Bullet::from_spec(&spec(DVec2::new(0.0, -4.0)).with_speed(5.0)).unwrap();
        assert_eq!(bullet.velocity, DVec2::new(0.0, -5.0));
    }

    #[test]
    fn test_zero_or_nan_direction_rejected() {
        assert!(Bullet::from_spec(&spec(DVec2::ZERO)).is_err());
        assert!(Bullet::from_spec(&spec(DVec2::new(f64::NAN, 1.0))).is_err());
    }

    #[test]
    fn test_bad_radius_rejected() {
        let mut s = spec(DVec2::X);
        s.radius = 0.0;
        assert!(Bullet::from_spec(&s).is_err());
    }

    #[test]
    fn test_update_moves_and_expires() {
        let (mut body, mut bullet) =
            Bullet::from_spec(&spec(DVec2::X).with_speed(100.0).with_max_life_time(0.5)).unwrap();
        assert!(!bullet.update(&mut body, 0.25));
        assert_eq!(body.position.x, 35.0);
        assert!(bullet.update(&mut body, 0.25));
        assert_eq!(body.position.x, 60.0);
    }

    #[test]
    fn test_shooter_type_stamped() {
        let shooter = ShooterRef {
            id: creepfield_core::types::EntityId(9),
            kind: EntityType::Creep,
        };
        let (_, bullet) = Bullet::from_spec(&spec(DVec2::Y).with_shooter(shooter)).unwrap();
        assert_eq!(bullet.shooter_type(), Some(EntityType::Creep));
        let (_, stray) = Bullet::from_spec(&spec(DVec2::Y)).unwrap();
        assert_eq!(stray.shooter_type(), None);
    }
}
