//! Static environment for CREEPFIELD.
//!
//! Binary terrain grids with neighbor queries, rooms that expand a grid
//! into wall placements, and a multi-room map.

pub use creepfield_core as core;

pub mod grid;
pub mod map;
pub mod room;

pub use grid::{Direction, ExposedCorners, NeighborMask, TerrainGrid};
pub use map::GameMap;
pub use room::{Room, WallPlacement};
