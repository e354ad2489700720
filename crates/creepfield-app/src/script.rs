//! Scripted input: a list of key sets, each held for a number of frames.

use std::path::Path;

use serde::{Deserialize, Serialize};

use creepfield_core::input::{KeyState, ARROW_LEFT, ARROW_UP, KEY_DOWN, KEY_RIGHT};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub frames: u64,
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Segments play in order; past the end no keys are held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    segments: Vec<Segment>,
}

impl InputScript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Walk right, strafe down while aiming up, turn left, then rest.
    pub fn demo() -> Self {
        let seg = |frames, keys: &[&str]| Segment {
            frames,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        };
        Self::new(vec![
            seg(60, &[KEY_RIGHT]),
            seg(60, &[KEY_DOWN, ARROW_UP]),
            seg(60, &[ARROW_LEFT]),
            seg(60, &[]),
        ])
    }

    /// Total scripted frames, saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        self.segments
            .iter()
            .fold(0, |total: u64, s| total.saturating_add(s.frames))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys held on zero-based frame `frame`.
    pub fn keys_at(&self, frame: u64) -> KeyState {
        let mut start: u64 = 0;
        for segment in &self.segments {
            let end = start.saturating_add(segment.frames);
            if frame < end {
                return KeyState::pressed(segment.keys.iter().cloned());
            }
            start = end;
        }
        KeyState::new()
    }
}
