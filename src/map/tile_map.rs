use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use unciv_core::{Error, Result, Vector2};

use crate::map::tile::Tile;
use crate::models::ruleset::Ruleset;

/// The hex grid. Tiles are keyed by position; iteration is in position order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileMap {
    pub tiles: BTreeMap<Vector2, Tile>,
}

impl TileMap {
    /// A hexagon-shaped map of `radius` rings around the origin, all `base_terrain`
    pub fn hexagonal(radius: i32, base_terrain: &str, ruleset: &Ruleset) -> Self {
        let mut tiles = BTreeMap::new();
        for x in -radius..=radius {
            for y in -radius..=radius {
                let position = Vector2::new(x, y);
                if position.aerial_distance_to(Vector2::ZERO) > radius {
                    continue;
                }
                let mut tile = Tile::new(position, base_terrain);
                tile.set_terrain_transients(ruleset);
                tiles.insert(position, tile);
            }
        }
        Self { tiles }
    }

    pub fn contains(&self, position: Vector2) -> bool {
        self.tiles.contains_key(&position)
    }

    pub fn get(&self, position: Vector2) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn get_mut(&mut self, position: Vector2) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    pub fn tile(&self, position: Vector2) -> Result<&Tile> {
        self.get(position).ok_or(Error::NoTileAt(position))
    }

    pub fn tile_mut(&mut self, position: Vector2) -> Result<&mut Tile> {
        self.get_mut(position).ok_or(Error::NoTileAt(position))
    }

    /// Neighbors that exist on this map
    pub fn neighbors(&self, position: Vector2) -> Vec<Vector2> {
        position.neighbors().filter(|neighbor| self.contains(*neighbor)).collect()
    }

    /// All map positions within `distance` of `center`, nearest ring first
    pub fn tiles_in_distance(&self, center: Vector2, distance: i32) -> Vec<Vector2> {
        let mut positions: Vec<Vector2> = (-distance..=distance)
            .flat_map(|dx| (-distance..=distance).map(move |dy| center + Vector2::new(dx, dy)))
            .filter(|position| center.aerial_distance_to(*position) <= distance && self.contains(*position))
            .collect();
        positions.sort_by_key(|position| (center.aerial_distance_to(*position), *position));
        positions
    }

    pub fn tiles_at_distance(&self, center: Vector2, distance: i32) -> Vec<Vector2> {
        self.tiles_in_distance(center, distance)
            .into_iter()
            .filter(|position| center.aerial_distance_to(*position) == distance)
            .collect()
    }

    /// Tiles visible from `position`: adjacent tiles always, farther tiles only through
    /// a closer visible tile that does not block sight
    pub fn get_viewable_tiles(&self, position: Vector2, sight_distance: i32) -> HashSet<Vector2> {
        let mut viewable: HashSet<Vector2> = self.tiles_in_distance(position, 1.min(sight_distance)).into_iter().collect();
        for distance in 2..=sight_distance {
            for candidate in self.tiles_at_distance(position, distance) {
                let seen_through = self.neighbors(candidate).into_iter().any(|neighbor| {
                    position.aerial_distance_to(neighbor) == distance - 1
                        && viewable.contains(&neighbor)
                        && self.get(neighbor).is_some_and(|tile| !tile.obstructs_sight)
                });
                if seen_through {
                    viewable.insert(candidate);
                }
            }
        }
        viewable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ruleset::vanilla::vanilla_ruleset;

    #[test]
    fn hexagonal_map_has_expected_tile_count() {
        let ruleset = vanilla_ruleset();
        let map = TileMap::hexagonal(2, "Grassland", &ruleset);
        assert_eq!(map.tiles.len(), 19);
        assert_eq!(map.tiles_in_distance(Vector2::ZERO, 1).len(), 7);
        assert_eq!(map.tiles_in_distance(Vector2::ZERO, 1)[0], Vector2::ZERO);
    }

    #[test]
    fn hills_block_sight_beyond_them() {
        let ruleset = vanilla_ruleset();
        let mut map = TileMap::hexagonal(3, "Grassland", &ruleset);
        let origin = Vector2::ZERO;
        let open = map.get_viewable_tiles(origin, 2);
        assert!(open.contains(&Vector2::new(2, 0)));

        for neighbor in origin.neighbors() {
            let tile = map.get_mut(neighbor).unwrap();
            tile.base_terrain = "Hill".to_string();
            tile.set_terrain_transients(&ruleset);
        }
        let blocked = map.get_viewable_tiles(origin, 2);
        assert!(blocked.contains(&Vector2::new(1, 0)));
        assert!(!blocked.contains(&Vector2::new(2, 0)));
    }
}
