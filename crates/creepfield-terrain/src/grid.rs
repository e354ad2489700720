//! TerrainGrid: fixed binary matrix with neighbor queries.

use serde::{Deserialize, Serialize};

use creepfield_core::error::SimError;

/// One of the eight grid directions, in `(dx, dy)` screen orientation (y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of occupied neighbor directions around a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborMask(u8);

impl NeighborMask {
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Which corners of a cell have no orthogonal neighbor on either side.
/// The renderer rounds exactly these corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExposedCorners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

/// Binary terrain matrix, row-major. `true` = solid cell.
///
/// Serialized as a list of rows of 0/1 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl TerrainGrid {
    /// Build a grid from rows of 0/1 (any nonzero is solid). Rows must be equal length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, SimError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SimError::invalid(
                    "TerrainGrid::from_rows",
                    format!("row {y} has {} cells, expected {width}", row.len()),
                ));
            }
            cells.extend(row.iter().map(|&c| c != 0));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// An all-empty grid.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// The 10×10 arena layout used by the default room.
    pub fn sample() -> Self {
        #[rustfmt::skip]
        let rows: [[u8; 10]; 10] = [
            [0, 0, 0, 0, 0, 1, 1, 1, 0, 0],
            [0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
            [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
            [1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
            [1, 1, 0, 0, 0, 0, 0, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
            [0, 0, 0, 0, 1, 1, 1, 1, 1, 0],
            [0, 0, 0, 0, 0, 1, 1, 1, 1, 0],
            [0, 0, 0, 0, 0, 0, 1, 1, 0, 0],
        ];
        let mut grid = Self::empty(10, 10);
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                grid.cells[y * 10 + x] = c != 0;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` is a solid cell. Out-of-range coordinates are empty.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// Whether the cell offset by `(dx, dy)` from `(x, y)` is solid.
    pub fn has_neighbor(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        self.is_solid(x + dx, y + dy)
    }

    pub fn neighbor_mask(&self, x: i32, y: i32) -> NeighborMask {
        let bits = Direction::ALL
            .iter()
            .filter(|dir| {
                let (dx, dy) = dir.offset();
                self.has_neighbor(x, y, dx, dy)
            })
            .fold(0u8, |acc, dir| acc | dir.bit());
        NeighborMask(bits)
    }

    pub fn exposed_corners(&self, x: i32, y: i32) -> ExposedCorners {
        let mask = self.neighbor_mask(x, y);
        let n = mask.contains(Direction::North);
        let e = mask.contains(Direction::East);
        let s = mask.contains(Direction::South);
        let w = mask.contains(Direction::West);
        ExposedCorners {
            top_left: !n && !w,
            top_right: !n && !e,
            bottom_right: !s && !e,
            bottom_left: !s && !w,
        }
    }

    /// Solid cells as `(x, y)`, row-major.
    pub fn solid_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &solid)| solid)
            .map(move |(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl TryFrom<Vec<Vec<u8>>> for TerrainGrid {
    type Error = SimError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<TerrainGrid> for Vec<Vec<u8>> {
    fn from(grid: TerrainGrid) -> Self {
        if grid.width == 0 {
            return vec![Vec::new(); grid.height];
        }
        grid.cells
            .chunks(grid.width)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }
}
