//! Spawn helpers for setting up an arena.

use glam::DVec2;
use rand::Rng;

use creepfield_core::error::SimError;
use creepfield_core::types::EntityId;
use creepfield_terrain::{GameMap, Room};

use crate::creep::CreepParams;
use crate::engine::World;

/// Default player creep box.
pub const PLAYER_SPAWN: (f64, f64, f64, f64) = (400.0, 400.0, 15.0, 15.0);

/// Spawn the player creep with config defaults.
pub fn spawn_player(world: &mut World) -> Result<EntityId, SimError> {
    let (x, y, w, h) = PLAYER_SPAWN;
    world.spawn_creep(x, y, w, h, CreepParams::default())
}

/// One wall per solid cell of `room`, row-major.
pub fn spawn_room(world: &mut World, room: &Room) -> Result<Vec<EntityId>, SimError> {
    room.wall_placements()
        .into_iter()
        .map(|p| {
            world.spawn_wall(
                p.grid_x,
                p.grid_y,
                p.position.x,
                p.position.y,
                p.size.x,
                p.size.y,
            )
        })
        .collect()
}

/// Spawn the walls of the map's current room, if it has one.
pub fn spawn_current_room(world: &mut World, map: &GameMap) -> Result<Vec<EntityId>, SimError> {
    match map.current_room() {
        Some(room) => spawn_room(world, room),
        None => Ok(Vec::new()),
    }
}

/// Scatter `count` creeps of `size` uniformly inside the bounds, drawn from
/// the world's seeded RNG.
pub fn scatter_creeps(
    world: &mut World,
    count: usize,
    size: f64,
) -> Result<Vec<EntityId>, SimError> {
    let max = (world.config().bounds.as_vec() - DVec2::splat(size)).max(DVec2::ZERO);
    let rng = world.rng_mut();
    let positions: Vec<DVec2> = (0..count)
        .map(|_| DVec2::new(rng.gen_range(0.0..=max.x), rng.gen_range(0.0..=max.y)))
        .collect();

    positions
        .into_iter()
        .map(|p| world.spawn_creep(p.x, p.y, size, size, CreepParams::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use creepfield_core::config::SimConfig;
    use creepfield_core::enums::EntityType;
    use creepfield_terrain::TerrainGrid;

    #[test]
    fn test_room_walls_carry_grid_coordinates() {
        let mut world = World::default();
        let terrain = TerrainGrid::from_rows(&[[0u8, 1], [1, 0]]).unwrap();
        let ids = spawn_room(&mut world, &Room::new(terrain)).unwrap();
        assert_eq!(ids.len(), 2);

        let wall = world.find_by_id(ids[1]).unwrap();
        let w = wall.as_wall().unwrap();
        assert_eq!((w.grid_x, w.grid_y), (0, 1));
        assert_eq!(wall.body.position, DVec2::new(0.0, 40.0));
    }

    #[test]
    fn test_scatter_is_seeded() {
        let positions = |seed| {
            let mut world = World::new(SimConfig {
                seed,
                ..SimConfig::default()
            })
            .unwrap();
            scatter_creeps(&mut world, 5, 15.0).unwrap();
            world
                .find_by_type(EntityType::Creep)
                .map(|e| e.body.position)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(7), positions(7));
        assert_ne!(positions(7), positions(8));
        assert!(positions(7)
            .iter()
            .all(|p| p.x >= 0.0 && p.x <= 785.0 && p.y >= 0.0 && p.y <= 585.0));
    }

    #[test]
    fn test_current_room_of_empty_map_spawns_nothing() {
        let mut world = World::default();
        let ids = spawn_current_room(&mut world, &GameMap::default()).unwrap();
        assert!(ids.is_empty());
        assert_eq!(world.entity_count(), 0);
    }
}
