//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOUNDS_HEIGHT, DEFAULT_BOUNDS_WIDTH};

/// Registry-assigned entity identifier. Monotonic within a world, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Axis-aligned bounding box in canvas space (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub position: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self { position, size }
    }

    /// Center of the box: `position + size / 2`.
    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    /// Collision radius used by the circular narrow phase (half the width).
    pub fn radius(&self) -> f64 {
        self.size.x * 0.5
    }

    /// Bottom-right corner.
    pub fn max(&self) -> DVec2 {
        self.position + self.size
    }
}

/// Playable area. Moving entities are clamped into `[0, bounds - size]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOUNDS_WIDTH,
            height: DEFAULT_BOUNDS_HEIGHT,
        }
    }
}

/// Frame clock tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Number of frames advanced so far.
    pub frame: u64,
    /// Delta time of the most recent frame in seconds.
    pub delta_time: f64,
    /// Sum of all frame deltas in seconds.
    pub elapsed_secs: f64,
    /// Timestamp of the last `delta_from_timestamp` call (milliseconds).
    pub last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.delta_time = dt;
        self.elapsed_secs += dt;
    }

    /// Derive a frame delta in seconds from a display-refresh timestamp.
    ///
    /// The first call only records the timestamp and yields zero. Timestamps
    /// that go backwards also yield zero.
    pub fn delta_from_timestamp(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_timestamp_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        dt
    }
}
