//! Renderers for headless runs.

use std::io::Write;

use creepfield_core::state::{FrameRenderer, FrameSnapshot};

/// Logs the debug overlay (frame, counts, collisions) every `every` frames.
pub struct LogRenderer {
    every: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        if frame.clock.frame % self.every != 0 {
            return;
        }
        let s = &frame.stats;
        log::info!(
            "frame {:>5} t={:>7.3}s entities={} creeps={} bullets={} walls={} collisions={}",
            frame.clock.frame,
            frame.clock.elapsed_secs,
            s.entity_count,
            s.creeps,
            s.bullets,
            s.walls,
            s.collisions,
        );
    }
}

/// Writes one JSON snapshot per line.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &FrameSnapshot) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            log::warn!("snapshot output stopped: {e}");
            self.failed = true;
        }
    }
}

/// Fans one frame out to two renderers.
pub struct Both<A, B>(pub A, pub B);

impl<A: FrameRenderer, B: FrameRenderer> FrameRenderer for Both<A, B> {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.0.render(frame);
        self.1.render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_one_per_frame() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        let mut frame = FrameSnapshot::default();
        renderer.render(&frame);
        frame.clock.frame = 1;
        renderer.render(&frame);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: FrameSnapshot = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back.clock.frame, 1);
    }
}
