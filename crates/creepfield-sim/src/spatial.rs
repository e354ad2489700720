//! Broad and narrow collision phases.
//!
//! The grid strategy buckets entities by the cell holding their center and
//! tests each cell against the ring of cells that could hold an overlapping
//! partner. Pairs come out normalized `(i < j)`, sorted and deduplicated, so
//! after the narrow phase both strategies produce the same list.

use std::collections::HashMap;

use creepfield_core::enums::BroadPhase;

use crate::entity::Entity;

/// Uniform grid over entity centers. Built fresh each frame.
pub struct CollisionGrid {
    cell_size: f64,
    ring: i64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl CollisionGrid {
    pub fn build(entities: &[Entity], cell_size: f64) -> Self {
        let max_diameter = entities
            .iter()
            .map(|e| e.body.size.x)
            .fold(0.0_f64, f64::max);
        let ring = ((max_diameter / cell_size).ceil() as i64).max(1);

        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, entity) in entities.iter().enumerate() {
            cells
                .entry(cell_coords(entity, cell_size))
                .or_default()
                .push(i);
        }
        Self {
            cell_size,
            ring,
            cells,
        }
    }

    /// Rings of neighbor cells searched around each occupied cell.
    pub fn ring(&self) -> i64 {
        self.ring
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Candidate pairs from each entity's neighborhood, normalized and sorted.
    ///
    /// When the ring window holds more cells than are occupied, the occupied
    /// cells are filtered by distance instead of probing the whole window.
    pub fn candidate_pairs(&self, entities: &[Entity]) -> Vec<(usize, usize)> {
        let ring = self.ring.unsigned_abs();
        let window = ring.saturating_mul(2).saturating_add(1);
        let scan_occupied = window.saturating_mul(window) > self.cells.len() as u64;

        let mut pairs = Vec::new();
        for (i, entity) in entities.iter().enumerate() {
            let (cx, cy) = cell_coords(entity, self.cell_size);
            let mut take = |bucket: &[usize]| {
                pairs.extend(bucket.iter().filter(|&&j| j > i).map(|&j| (i, j)));
            };
            if scan_occupied {
                for (&(x, y), bucket) in &self.cells {
                    if cx.abs_diff(x) <= ring && cy.abs_diff(y) <= ring {
                        take(bucket);
                    }
                }
            } else {
                for dy in -self.ring..=self.ring {
                    for dx in -self.ring..=self.ring {
                        let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                        if let Some(bucket) = self.cells.get(&key) {
                            take(bucket);
                        }
                    }
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

fn cell_coords(entity: &Entity, cell_size: f64) -> (i64, i64) {
    let c = entity.center();
    (
        (c.x / cell_size).floor() as i64,
        (c.y / cell_size).floor() as i64,
    )
}

/// Every unordered pair once, ascending.
pub fn all_pairs(count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
        .collect()
}

/// Circle test on centers with radius = half width.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// Broad phase by `strategy`, then narrow phase. Ascending `(i, j)` order.
pub fn overlapping_pairs(
    entities: &[Entity],
    strategy: BroadPhase,
    cell_size: f64,
) -> Vec<(usize, usize)> {
    let candidates = match strategy {
        BroadPhase::Grid => CollisionGrid::build(entities, cell_size).candidate_pairs(entities),
        BroadPhase::BruteForce => all_pairs(entities.len()),
    };
    candidates
        .into_iter()
        .filter(|&(i, j)| overlaps(&entities[i], &entities[j]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Body, EntityKind, Wall};
    use creepfield_core::types::EntityId;

    fn wall_at(id: u64, x: f64, y: f64, size: f64) -> Entity {
        let body = Body::checked("test", x, y, size, size, 0.0).unwrap();
        Entity::new(EntityId(id), body, EntityKind::Wall(Wall::new(0, 0)))
    }

    #[test]
    fn test_all_pairs_ascending() {
        assert_eq!(all_pairs(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert!(all_pairs(1).is_empty());
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        let a = wall_at(1, 0.0, 0.0, 10.0);
        let b = wall_at(2, 10.0, 0.0, 10.0);
        assert!(!overlaps(&a, &b), "distance == r1 + r2 is not a hit");
        let c = wall_at(3, 9.0, 0.0, 10.0);
        assert!(overlaps(&a, &c));
    }

    #[test]
    fn test_grid_finds_pair_across_cell_border() {
        let entities = vec![wall_at(1, 30.0, 30.0, 15.0), wall_at(2, 40.0, 40.0, 15.0)];
        assert_eq!(
            overlapping_pairs(&entities, BroadPhase::Grid, 40.0),
            vec![(0, 1)]
        );
    }

    #[test]
    fn test_large_entities_widen_ring() {
        let entities = vec![wall_at(1, 0.0, 0.0, 100.0), wall_at(2, 90.0, 0.0, 100.0)];
        let grid = CollisionGrid::build(&entities, 40.0);
        assert_eq!(grid.ring(), 3);
        assert_eq!(grid.candidate_pairs(&entities), vec![(0, 1)]);
    }

    #[test]
    fn test_oversized_wall_matches_brute_force() {
        let mut entities = vec![wall_at(1, 0.0, 0.0, 1.0e9)];
        for k in 0..20 {
            let x = (k % 5) as f64 * 37.0 - 80.0;
            let y = (k / 5) as f64 * 53.0 - 100.0;
            entities.push(wall_at(k + 2, x, y, 15.0));
        }
        let grid = CollisionGrid::build(&entities, 40.0);
        assert!(grid.ring() > 1_000_000);
        assert_eq!(
            overlapping_pairs(&entities, BroadPhase::Grid, 40.0),
            overlapping_pairs(&entities, BroadPhase::BruteForce, 40.0)
        );
    }

    #[test]
    fn test_far_entities_not_candidates() {
        let entities = vec![wall_at(1, 0.0, 0.0, 10.0), wall_at(2, 500.0, 500.0, 10.0)];
        let grid = CollisionGrid::build(&entities, 40.0);
        assert_eq!(grid.occupied_cells(), 2);
        assert!(grid.candidate_pairs(&entities).is_empty());
    }

    #[test]
    fn test_negative_coordinates_bucket_below_zero() {
        let entities = vec![wall_at(1, -12.0, -12.0, 10.0), wall_at(2, -5.0, -5.0, 10.0)];
        assert_eq!(
            overlapping_pairs(&entities, BroadPhase::Grid, 40.0),
            overlapping_pairs(&entities, BroadPhase::BruteForce, 40.0)
        );
    }
}
