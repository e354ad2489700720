//! Rooms: a terrain grid placed in canvas space.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use creepfield_core::constants::WALL_CELL_SIZE;

use crate::grid::TerrainGrid;

/// Where one wall entity goes, expanded from a solid terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlacement {
    /// Column.
    pub grid_x: i32,
    /// Row.
    pub grid_y: i32,
    pub position: DVec2,
    pub size: DVec2,
}

/// A terrain grid plus the cell size and canvas origin it is laid out with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub terrain: TerrainGrid,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    #[serde(default)]
    pub origin: DVec2,
}

fn default_cell_size() -> f64 {
    WALL_CELL_SIZE
}

impl Room {
    pub fn new(terrain: TerrainGrid) -> Self {
        Self {
            terrain,
            cell_size: WALL_CELL_SIZE,
            origin: DVec2::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// One placement per solid cell, row-major.
    pub fn wall_placements(&self) -> Vec<WallPlacement> {
        let size = DVec2::splat(self.cell_size);
        let placements: Vec<WallPlacement> = self
            .terrain
            .solid_cells()
            .map(|(x, y)| WallPlacement {
                grid_x: x,
                grid_y: y,
                position: self.origin + DVec2::new(x as f64, y as f64) * self.cell_size,
                size,
            })
            .collect();
        log::debug!(
            "room {}x{} expands to {} walls",
            self.terrain.width(),
            self.terrain.height(),
            placements.len()
        );
        placements
    }

    /// Room extent in pixels.
    pub fn pixel_size(&self) -> DVec2 {
        DVec2::new(
            self.terrain.width() as f64 * self.cell_size,
            self.terrain.height() as f64 * self.cell_size,
        )
    }
}
