//! Fixed-step game loop.
//!
//! Advances the world one frame at a time with scripted input and hands
//! every frame to a renderer. Optionally paced to wall-clock time.

use std::time::{Duration, Instant};

use creepfield_core::events::SimEvent;
use creepfield_core::state::{FrameRenderer, FrameSnapshot};
use creepfield_sim::World;

use crate::script::InputScript;

/// 60 Hz.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub frames: u64,
    /// Seconds per frame.
    pub dt: f64,
    /// Sleep between frames to match wall-clock time.
    pub realtime: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: DEFAULT_DT,
            realtime: false,
        }
    }
}

/// Event totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub spawned: usize,
    pub damaged: usize,
    pub removed: usize,
    pub update_failures: usize,
}

impl RunSummary {
    fn record(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::Spawned { .. } => self.spawned += 1,
                SimEvent::Damaged { .. } => self.damaged += 1,
                SimEvent::Removed { .. } => self.removed += 1,
                SimEvent::UpdateFailed { .. } => self.update_failures += 1,
            }
        }
    }
}

/// Run `options.frames` frames. Returns the event summary and the last frame.
pub fn run(
    world: &mut World,
    script: &InputScript,
    options: &LoopOptions,
    renderer: &mut impl FrameRenderer,
) -> (RunSummary, FrameSnapshot) {
    let mut summary = RunSummary::default();
    // Setup spawns count too.
    summary.record(&world.drain_events());

    let frame_duration = Duration::from_secs_f64(options.dt.max(0.0));
    let mut next_frame_time = Instant::now();

    for i in 0..options.frames {
        let keys = script.keys_at(i);
        world.advance_frame(options.dt, &keys);
        summary.record(&world.drain_events());
        summary.frames += 1;
        world.render(renderer);

        if options.realtime {
            next_frame_time += frame_duration;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > frame_duration * 2 {
                // Too far behind; do not try to catch up.
                next_frame_time = now;
            }
        }
    }
    (summary, world.snapshot())
}
