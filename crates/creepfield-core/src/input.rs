//! Input snapshot handed to the simulation each frame.
//!
//! The external input collaborator mutates a `KeyState` between frames; the
//! simulation only ever reads it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// --- Movement keys ---
pub const KEY_UP: &str = "w";
pub const KEY_DOWN: &str = "s";
pub const KEY_LEFT: &str = "a";
pub const KEY_RIGHT: &str = "d";

// --- Aim keys ---
pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";

pub const ARROW_KEYS: [&str; 4] = [ARROW_UP, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT];

/// Logical key name → pressed state. Missing keys read as released.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyState {
    keys: BTreeMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly the given keys held down.
    pub fn pressed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(|k| (k.into(), true)).collect(),
        }
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_string(), true);
    }

    pub fn release(&mut self, key: &str) {
        self.keys.insert(key.to_string(), false);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn any_down(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Keys currently held, in sorted order.
    pub fn held(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, down)| **down)
            .map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, bool)> for KeyState {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
