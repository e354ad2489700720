//! Per-frame systems over the registry's entity list.
//!
//! Systems are plain functions over `&mut [Entity]` (or `&[Entity]` for
//! read-only passes). They hold no state; everything lives in the entities
//! and the `World`.

pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod snapshot;
pub mod update;
