//! Entity model: a shared body plus a closed set of variants.
//!
//! Every entity has an AABB body and a registry-assigned id. The variant
//! (`EntityKind`) carries per-type state and decides update and collision
//! behavior by `match`.

use glam::DVec2;

use creepfield_core::config::BulletDefaults;
use creepfield_core::constants::IDLE_EPSILON;
use creepfield_core::enums::{EntityType, EnvironmentKind, RemovalCause};
use creepfield_core::error::SimError;
use creepfield_core::input::KeyState;
use creepfield_core::types::{Aabb, Bounds, EntityId};

use crate::bullet::{Bullet, BulletSpec};
use crate::creep::Creep;

/// Desired vs. visible location. `current` chases `target` geometrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub target: DVec2,
    pub current: DVec2,
}

impl Motion {
    pub fn at(position: DVec2) -> Self {
        Self {
            target: position,
            current: position,
        }
    }

    /// Both axes within `IDLE_EPSILON` of the target.
    pub fn is_idle(&self) -> bool {
        let gap = (self.target - self.current).abs();
        gap.x < IDLE_EPSILON && gap.y < IDLE_EPSILON
    }
}

/// Geometry and movement shared by all variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner of the AABB.
    pub position: DVec2,
    pub size: DVec2,
    pub motion: Motion,
    /// Movement magnitude per frame at full intent. Zero for static entities.
    pub speed: f64,
}

impl Body {
    /// Build a body, sanitizing coordinates and rejecting bad sizes.
    ///
    /// Non-finite coordinates are replaced by zero and logged. A size that
    /// is not finite and positive on both axes is an error.
    pub fn checked(
        context: &'static str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        speed: f64,
    ) -> Result<Self, SimError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            let err = SimError::invalid(context, format!("bad size {width}x{height}"));
            log::warn!("{err}");
            return Err(err);
        }
        if !speed.is_finite() || speed < 0.0 {
            let err = SimError::invalid(context, format!("bad speed {speed}"));
            log::warn!("{err}");
            return Err(err);
        }
        let position = DVec2::new(sanitize(context, "x", x), sanitize(context, "y", y));
        Ok(Self {
            position,
            size: DVec2::new(width, height),
            motion: Motion::at(position),
            speed,
        })
    }

    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Collision radius (half the width).
    pub fn radius(&self) -> f64 {
        self.size.x * 0.5
    }
}

fn sanitize(context: &'static str, axis: &str, v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        log::warn!("{context}: non-finite {axis} coordinate {v}, using 0");
        0.0
    }
}

/// Non-owning reference from a bullet to whoever fired it.
///
/// The type is stamped at fire time so collision rules never need to look
/// the shooter up (it may already be gone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterRef {
    pub id: EntityId,
    pub kind: EntityType,
}

/// Static environment piece placed from a terrain cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    /// Column.
    pub grid_x: i32,
    /// Row.
    pub grid_y: i32,
    pub env_kind: EnvironmentKind,
    pub destroyable: bool,
    pub traversable: bool,
}

impl Wall {
    pub fn new(grid_x: i32, grid_y: i32) -> Self {
        Self {
            grid_x,
            grid_y,
            env_kind: EnvironmentKind::Wall,
            destroyable: true,
            traversable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Creep(Creep),
    Bullet(Bullet),
    Wall(Wall),
}

/// Read-only inputs to one frame's update phase.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    pub dt: f64,
    pub keys: &'a KeyState,
    pub bounds: Bounds,
    pub smoothing: f64,
    pub bullet: &'a BulletDefaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub body: Body,
    pub kind: EntityKind,
    removal: Option<RemovalCause>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, body: Body, kind: EntityKind) -> Self {
        Self {
            id,
            body,
            kind,
            removal: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKind::Creep(_) => EntityType::Creep,
            EntityKind::Bullet(_) => EntityType::Bullet,
            EntityKind::Wall(_) => EntityType::Environment,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.body.center()
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    pub fn radius(&self) -> f64 {
        self.body.radius()
    }

    pub fn removal(&self) -> Option<RemovalCause> {
        self.removal
    }

    pub fn marked_for_removal(&self) -> bool {
        self.removal.is_some()
    }

    /// Flag for the end-of-frame sweep. The first cause sticks; returns
    /// whether this call set it.
    pub fn mark_for_removal(&mut self, cause: RemovalCause) -> bool {
        if self.removal.is_some() {
            return false;
        }
        self.removal = Some(cause);
        true
    }

    pub fn as_creep(&self) -> Option<&Creep> {
        match &self.kind {
            EntityKind::Creep(creep) => Some(creep),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match &self.kind {
            EntityKind::Bullet(bullet) => Some(bullet),
            _ => None,
        }
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match &self.kind {
            EntityKind::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    /// Run this entity's per-frame update. Bullets it fires go to `fired`.
    pub fn update(
        &mut self,
        ctx: &UpdateContext<'_>,
        fired: &mut Vec<BulletSpec>,
    ) -> Result<(), SimError> {
        let id = self.id;
        let expired = match &mut self.kind {
            EntityKind::Creep(creep) => {
                creep.update(id, &mut self.body, ctx, fired)?;
                false
            }
            EntityKind::Bullet(bullet) => bullet.update(&mut self.body, ctx.dt),
            EntityKind::Wall(_) => false,
        };
        if expired {
            self.mark_for_removal(RemovalCause::Expired);
        }
        Ok(())
    }
}
