use std::collections::{BTreeMap, VecDeque};

use tracing::trace;
use unciv_core::{UnitId, Vector2};

use crate::battle::battle_unit_capture;
use crate::battle::MapUnitCombatant;
use crate::game_info::GameInfo;
use crate::map::mapunit::MapUnit;

/// Represents a parent tile and the total movement cost to reach it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentTileAndTotalMovement {
    pub parent_tile: Vector2,
    pub total_movement: f32,
}

/// Tiles reachable within the current turn, with how they are reached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathsToTilesWithinTurn {
    pub paths: BTreeMap<Vector2, ParentTileAndTotalMovement>,
}

impl PathsToTilesWithinTurn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the unit's own tile, for units that will not move before attacking
    pub fn standing_on(position: Vector2) -> Self {
        let mut paths = Self::new();
        paths.insert(position, position, 0.0);
        paths
    }

    pub fn insert(&mut self, tile: Vector2, parent_tile: Vector2, total_movement: f32) {
        self.paths.insert(tile, ParentTileAndTotalMovement { parent_tile, total_movement });
    }

    pub fn contains(&self, tile: Vector2) -> bool {
        self.paths.contains_key(&tile)
    }

    pub fn get(&self, tile: Vector2) -> Option<&ParentTileAndTotalMovement> {
        self.paths.get(&tile)
    }

    pub fn tiles(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.paths.keys().copied()
    }

    /// Steps from the origin to `tile`, excluding the origin itself
    pub fn get_path_to_tile(&self, tile: Vector2) -> Option<Vec<Vector2>> {
        let mut current = tile;
        let mut reverse_path = Vec::new();
        loop {
            let step = self.paths.get(&current)?;
            if step.parent_tile == current {
                break;
            }
            reverse_path.push(current);
            current = step.parent_tile;
        }
        reverse_path.reverse();
        Some(reverse_path)
    }
}

impl GameInfo {
    pub fn is_embarked(&self, unit: &MapUnit) -> bool {
        unit.base_unit(&self.ruleset).is_land_unit() && self.tile(unit.current_tile).is_water
    }

    /// Terrain, domain and foreign-unit rules for entering a tile, ignoring stacking
    pub fn can_pass_through(&self, unit: &MapUnit, position: Vector2) -> bool {
        let Some(tile) = self.tile_map.get(position) else {
            return false;
        };
        if tile.is_impassable {
            return false;
        }
        let base_unit = unit.base_unit(&self.ruleset);
        if let Some(city) = tile.city {
            if self.city(city).civ != unit.owner {
                return false;
            }
        } else if base_unit.is_air_unit() {
            return false;
        } else if base_unit.is_land_unit() && tile.is_water {
            return false;
        } else if base_unit.is_water_unit() && tile.is_land() {
            return false;
        }

        if let Some(military) = tile.military_unit {
            if military != unit.id && self.unit(military).owner != unit.owner && !base_unit.is_air_unit() {
                return false;
            }
        }
        if let Some(civilian) = tile.civilian_unit {
            let civilian_owner = self.unit(civilian).owner;
            if civilian_owner != unit.owner
                && (base_unit.is_civilian() || !self.is_at_war(unit.owner, civilian_owner))
            {
                return false;
            }
        }
        true
    }

    pub(crate) fn has_room_for(&self, unit: &MapUnit, position: Vector2) -> bool {
        let Some(tile) = self.tile_map.get(position) else {
            return false;
        };
        let base_unit = unit.base_unit(&self.ruleset);
        if base_unit.is_air_unit() {
            true
        } else if base_unit.is_civilian() {
            tile.civilian_unit.is_none() || tile.civilian_unit == Some(unit.id)
        } else {
            tile.military_unit.is_none() || tile.military_unit == Some(unit.id)
        }
    }

    /// Whether the unit may end its move on the tile
    pub fn can_move_to(&self, unit: &MapUnit, position: Vector2) -> bool {
        self.can_pass_through(unit, position) && self.has_room_for(unit, position)
    }

    /// Tiles reachable this turn, one movement point per step
    pub fn get_distance_to_tiles(&self, unit_id: UnitId) -> PathsToTilesWithinTurn {
        let unit = self.unit(unit_id);
        let mut paths = PathsToTilesWithinTurn::standing_on(unit.current_tile);
        if unit.base_unit(&self.ruleset).moves_like_air_units() {
            return paths;
        }
        let mut queue = VecDeque::from([unit.current_tile]);
        while let Some(position) = queue.pop_front() {
            let spent = paths.get(position).map_or(0.0, |step| step.total_movement);
            if spent + 1.0 > unit.current_movement {
                continue;
            }
            for neighbor in self.tile_map.neighbors(position) {
                if paths.contains(neighbor) || !self.can_pass_through(unit, neighbor) {
                    continue;
                }
                paths.insert(neighbor, position, spent + 1.0);
                // No passing through occupied tiles
                if self.tile(neighbor).military_unit.is_none() {
                    queue.push_back(neighbor);
                }
            }
        }
        paths
    }

    pub(crate) fn remove_unit_from_tile(&mut self, unit_id: UnitId) {
        let position = self.unit(unit_id).current_tile;
        let tile = self.tile_mut(position);
        if tile.military_unit == Some(unit_id) {
            tile.military_unit = None;
        }
        if tile.civilian_unit == Some(unit_id) {
            tile.civilian_unit = None;
        }
        tile.air_units.retain(|id| *id != unit_id);
    }

    pub(crate) fn put_unit_in_tile(&mut self, unit_id: UnitId, position: Vector2) {
        let base_unit = self.base_unit(unit_id);
        let (is_air, is_civilian) = (base_unit.is_air_unit(), base_unit.is_civilian());
        self.unit_mut(unit_id).current_tile = position;
        let tile = self.tile_mut(position);
        if is_air {
            tile.air_units.push(unit_id);
        } else if is_civilian {
            tile.civilian_unit = Some(unit_id);
        } else {
            tile.military_unit = Some(unit_id);
        }
    }

    /// Moves the unit, paying one movement point per tile of distance.
    /// A military unit moving onto an enemy civilian captures it first.
    pub fn move_to_tile(&mut self, unit_id: UnitId, destination: Vector2) {
        let unit = self.unit(unit_id);
        let origin = unit.current_tile;
        if origin == destination {
            return;
        }
        let is_military = unit.base_unit(&self.ruleset).is_military();
        trace!("{} moves {} -> {}", unit.name, origin, destination);

        if is_military {
            if let Some(civilian) = self.tile(destination).civilian_unit {
                if self.is_at_war(self.unit(unit_id).owner, self.unit(civilian).owner) {
                    battle_unit_capture::capture_civilian_unit(
                        self,
                        MapUnitCombatant::new(unit_id),
                        MapUnitCombatant::new(civilian),
                        true,
                    );
                }
            }
        }

        self.remove_unit_from_tile(unit_id);
        self.put_unit_in_tile(unit_id, destination);
        let unit = self.unit_mut(unit_id);
        unit.use_movement_points(origin.aerial_distance_to(destination) as f32);
        if unit.action.is_some() && !unit.is_moving() {
            unit.action = None;
        }
        unit.turns_fortified = 0;
    }
}
