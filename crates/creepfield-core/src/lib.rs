//! Core types and definitions for the CREEPFIELD arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, enums, constants, input snapshots, configuration, errors,
//! events and render snapshots. It has no dependency on any runtime,
//! windowing or rendering framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod input;
pub mod state;
pub mod types;

pub use config::{CombatPolicy, SimConfig};
pub use error::SimError;
pub use input::KeyState;
pub use state::{FrameRenderer, FrameSnapshot};
pub use types::{Aabb, Bounds, EntityId, FrameClock};

#[cfg(test)]
mod tests;
