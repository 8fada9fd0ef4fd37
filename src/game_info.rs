use std::collections::{HashMap, HashSet};

use tracing::{debug, info};
use unciv_core::difficulty::Difficulty;
use unciv_core::mod_constants::ModConstants;
use unciv_core::unique::{StateForConditionals, UniqueType};
use unciv_core::{CityId, CivId, Error, Result, UnitId, Vector2};
use uuid::Uuid;

use crate::city::City;
use crate::civilization::diplomacy::{DiplomacyFlags, DiplomacyManager, DiplomaticModifiers, DiplomaticStatus};
use crate::civilization::{AlertType, Civilization, NotificationCategory, NotificationIcon, PopupAlert};
use crate::map::mapunit::MapUnit;
use crate::map::tile::Tile;
use crate::map::tile_map::TileMap;
use crate::models::ruleset::unit::BaseUnit;
use crate::models::ruleset::Ruleset;

const UNIT_SIGHT_RANGE: i32 = 2;

/// The whole game state combat reads and mutates.
///
/// Civs, units and cities reference each other by id; the maps here own them.
#[derive(Debug, Clone)]
pub struct GameInfo {
    pub turns: i32,
    pub civilizations: Vec<Civilization>,
    pub units: HashMap<UnitId, MapUnit>,
    pub cities: HashMap<CityId, City>,
    pub tile_map: TileMap,
    pub ruleset: Ruleset,
    pub difficulty: Difficulty,
    pub constants: ModConstants,
}

impl GameInfo {
    pub fn new(ruleset: Ruleset, tile_map: TileMap) -> Self {
        Self {
            turns: 0,
            civilizations: Vec::new(),
            units: HashMap::new(),
            cities: HashMap::new(),
            tile_map,
            ruleset,
            difficulty: Difficulty::default(),
            constants: ModConstants::default(),
        }
    }

    pub fn civ(&self, id: CivId) -> &Civilization {
        &self.civilizations[id.0]
    }

    pub fn civ_mut(&mut self, id: CivId) -> &mut Civilization {
        &mut self.civilizations[id.0]
    }

    pub fn civ_ids(&self) -> Vec<CivId> {
        self.civilizations.iter().map(|civ| civ.id).collect()
    }

    pub fn unit(&self, id: UnitId) -> &MapUnit {
        &self.units[&id]
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut MapUnit {
        self.units.get_mut(&id).unwrap_or_else(|| panic!("No unit with id {}", id))
    }

    pub fn base_unit(&self, id: UnitId) -> &BaseUnit {
        self.unit(id).base_unit(&self.ruleset)
    }

    pub fn city(&self, id: CityId) -> &City {
        &self.cities[&id]
    }

    pub fn city_mut(&mut self, id: CityId) -> &mut City {
        self.cities.get_mut(&id).unwrap_or_else(|| panic!("No city with id {}", id))
    }

    pub fn tile(&self, position: Vector2) -> &Tile {
        &self.tile_map.tiles[&position]
    }

    pub fn tile_mut(&mut self, position: Vector2) -> &mut Tile {
        self.tile_map
            .get_mut(position)
            .unwrap_or_else(|| panic!("No tile at {}", position))
    }

    pub fn set_base_terrain(&mut self, position: Vector2, terrain: &str) -> Result<()> {
        self.ruleset.terrain(terrain)?;
        let tile = self.tile_map.tile_mut(position)?;
        tile.base_terrain = terrain.to_string();
        tile.set_terrain_transients(&self.ruleset);
        Ok(())
    }

    pub fn add_terrain_feature(&mut self, position: Vector2, feature: &str) -> Result<()> {
        self.ruleset.terrain(feature)?;
        let tile = self.tile_map.tile_mut(position)?;
        tile.add_terrain_feature(feature, &self.ruleset);
        Ok(())
    }

    pub fn add_civ(&mut self, civ_name: &str) -> CivId {
        let id = CivId(self.civilizations.len());
        self.civilizations.push(Civilization::new(id, civ_name));
        id
    }

    pub fn add_barbarians(&mut self) -> CivId {
        let id = self.add_civ("Barbarians");
        self.civ_mut(id).is_barbarian = true;
        id
    }

    /// Barbarians never meet anyone; they are simply at war with everybody
    pub fn meet_civs(&mut self, first: CivId, second: CivId) {
        if first == second || self.civ(first).is_barbarian || self.civ(second).is_barbarian {
            return;
        }
        self.civ_mut(first)
            .diplomacy
            .entry(second)
            .or_insert_with(|| DiplomacyManager::new(second));
        self.civ_mut(second)
            .diplomacy
            .entry(first)
            .or_insert_with(|| DiplomacyManager::new(first));
    }

    pub fn is_at_war(&self, first: CivId, second: CivId) -> bool {
        if first == second {
            return false;
        }
        if self.civ(first).is_barbarian || self.civ(second).is_barbarian {
            return true;
        }
        self.civ(first).is_at_war_with(second)
    }

    /// Both sides enter war; the target remembers who declared it
    pub fn declare_war(&mut self, declaring: CivId, target: CivId) {
        if !self.civ(declaring).knows(target) || self.civ(declaring).is_at_war_with(target) {
            return;
        }
        let declaring_name = self.civ(declaring).civ_name.clone();
        let target_name = self.civ(target).civ_name.clone();
        info!("{} declares war on {}", declaring_name, target_name);

        if let Some(manager) = self.civ_mut(declaring).get_diplomacy_manager_mut(target) {
            manager.diplomatic_status = DiplomaticStatus::War;
            manager.set_flag(DiplomacyFlags::DeclaredWar, 10);
        }
        if let Some(manager) = self.civ_mut(target).get_diplomacy_manager_mut(declaring) {
            manager.diplomatic_status = DiplomaticStatus::War;
            manager.add_modifier(DiplomaticModifiers::DeclaredWarOnUs, -20.0);
        }
        self.civ_mut(target).add_notification(
            format!("[{}] has declared war on us!", declaring_name),
            Vec::new(),
            NotificationCategory::Diplomacy,
            &[NotificationIcon::WAR, &declaring_name],
        );
        self.civ_mut(declaring).add_notification(
            format!("We have declared war on [{}]!", target_name),
            Vec::new(),
            NotificationCategory::Diplomacy,
            &[NotificationIcon::WAR, &target_name],
        );
    }

    /// Places a new unit exactly on `position`
    pub fn add_unit(&mut self, unit_name: &str, civ: CivId, position: Vector2) -> Result<UnitId> {
        let base_unit = self.ruleset.unit(unit_name)?;
        self.tile_map.tile(position)?;
        let unit = MapUnit::new(Uuid::now_v7(), base_unit, civ, position);
        if !self.has_room_for(&unit, position) {
            return Err(Error::TileOccupied(position, unit_name.to_string()));
        }
        Ok(self.register_unit(unit))
    }

    /// Places a new unit on `position` or the closest tile it can stand on, within two tiles
    pub fn place_unit_near_tile(&mut self, position: Vector2, unit_name: &str, civ: CivId) -> Option<UnitId> {
        let base_unit = self.ruleset.get_unit(unit_name)?;
        let mut unit = MapUnit::new(Uuid::now_v7(), base_unit, civ, position);
        let destination = self
            .tile_map
            .tiles_in_distance(position, 2)
            .into_iter()
            .find(|candidate| self.can_move_to(&unit, *candidate))?;
        unit.current_tile = destination;
        Some(self.register_unit(unit))
    }

    fn register_unit(&mut self, unit: MapUnit) -> UnitId {
        let id = unit.id;
        let (civ, position) = (unit.owner, unit.current_tile);
        debug!("placing {} of {} at {}", unit.name, self.civ(civ).civ_name, position);
        self.units.insert(id, unit);
        self.civ_mut(civ).units.push(id);
        self.put_unit_in_tile(id, position);
        id
    }

    /// Removes the unit from the map. The record stays in `units`, flagged as destroyed.
    pub fn destroy_unit(&mut self, unit_id: UnitId) {
        if self.unit(unit_id).is_destroyed {
            return;
        }
        debug!("destroying {}", self.unit(unit_id).name);
        self.remove_unit_from_tile(unit_id);
        let owner = self.unit(unit_id).owner;
        self.civ_mut(owner).units.retain(|id| *id != unit_id);
        self.unit_mut(unit_id).is_destroyed = true;
    }

    /// Hands the unit to another civ, keeping it in place with no movement left
    pub fn transfer_unit(&mut self, unit_id: UnitId, new_owner: CivId) {
        let old_owner = self.unit(unit_id).owner;
        self.civ_mut(old_owner).units.retain(|id| *id != unit_id);
        self.civ_mut(new_owner).units.push(unit_id);
        let unit = self.unit_mut(unit_id);
        unit.owner = new_owner;
        unit.current_movement = 0.0;
        unit.action = None;
    }

    pub fn add_city(&mut self, name: &str, civ: CivId, position: Vector2) -> Result<CityId> {
        if self.tile_map.tile(position)?.is_city_center() {
            return Err(Error::TileOccupied(position, name.to_string()));
        }
        let id = Uuid::now_v7();
        let mut city = City::new(id, name, civ, position, self.constants.city_base_health);
        if !self.civ(civ).has_ever_owned_original_capital {
            city.is_capital = true;
            city.is_original_capital = true;
        }
        self.cities.insert(id, city);
        let max_health = self.city_max_health(id);
        self.city_mut(id).health = max_health;

        let civ_info = self.civ_mut(civ);
        civ_info.cities.push(id);
        civ_info.has_ever_owned_original_capital = true;

        self.tile_mut(position).city = Some(id);
        for owned in self.tile_map.tiles_in_distance(position, 1) {
            let tile = self.tile_mut(owned);
            if tile.owner.is_none() || owned == position {
                tile.owner = Some(civ);
            }
        }
        Ok(id)
    }

    pub fn city_max_health(&self, city_id: CityId) -> i32 {
        let state = StateForConditionals::for_civ(self.city(city_id).civ);
        let bonus: i32 = self
            .city_matching_uniques(city_id, UniqueType::CityHealth, &state)
            .iter()
            .map(|unique| unique.int_param(0))
            .sum();
        self.constants.city_base_health + bonus
    }

    /// Razes the city: its air units die with it and its tiles lose their owner
    pub fn destroy_city(&mut self, city_id: CityId) {
        let (civ, location) = {
            let city = self.city(city_id);
            (city.civ, city.location)
        };
        info!("{} is destroyed", self.city(city_id).name);
        for air_unit in self.tile(location).air_units.clone() {
            self.destroy_unit(air_unit);
        }
        self.tile_mut(location).city = None;
        for owned in self.tile_map.tiles_in_distance(location, 1) {
            let tile = self.tile_mut(owned);
            if tile.owner == Some(civ) {
                tile.owner = None;
            }
        }
        self.civ_mut(civ).cities.retain(|id| *id != city_id);
        self.city_mut(city_id).is_destroyed = true;
    }

    pub fn transfer_city(&mut self, city_id: CityId, new_owner: CivId) {
        let (old_owner, location) = {
            let city = self.city(city_id);
            (city.civ, city.location)
        };
        self.civ_mut(old_owner).cities.retain(|id| *id != city_id);
        self.civ_mut(new_owner).cities.push(city_id);
        for owned in self.tile_map.tiles_in_distance(location, 1) {
            let tile = self.tile_mut(owned);
            if tile.owner == Some(old_owner) {
                tile.owner = Some(new_owner);
            }
        }
        let city = self.city_mut(city_id);
        city.civ = new_owner;
        city.is_capital = false;
        if let Some(manager) = self.civ_mut(old_owner).get_diplomacy_manager_mut(new_owner) {
            manager.add_modifier(DiplomaticModifiers::CapturedOurCities, -10.0);
        }
    }

    /// Recomputes what the civ sees: two tiles around its units and cities, blocked by terrain.
    /// Invisible units are only spotted next to one of its units.
    pub fn update_visibility(&mut self, civ: CivId) {
        let mut viewable: HashSet<Vector2> = HashSet::new();
        let mut viewable_invisible: HashSet<Vector2> = HashSet::new();
        for unit in &self.civ(civ).units {
            let position = self.unit(*unit).current_tile;
            viewable.extend(self.tile_map.get_viewable_tiles(position, UNIT_SIGHT_RANGE));
            viewable_invisible.extend(self.tile_map.tiles_in_distance(position, 1));
        }
        for city in &self.civ(civ).cities {
            let location = self.city(*city).location;
            viewable.extend(self.tile_map.get_viewable_tiles(location, UNIT_SIGHT_RANGE));
        }

        let civ_info = self.civ_mut(civ);
        civ_info.explored_tiles.extend(viewable.iter().copied());
        civ_info.viewable_tiles = viewable;
        civ_info.viewable_invisible_units_tiles = viewable_invisible;
    }

    /// Destroys the civ if it has nothing left; the attacker gets told about it
    pub fn destroy_if_defeated(&mut self, defeated: CivId, attacker: CivId) -> bool {
        if self.civ(defeated).is_destroyed || !self.civ(defeated).is_defeated() {
            return false;
        }
        let defeated_name = self.civ(defeated).civ_name.clone();
        info!("{} has been destroyed", defeated_name);
        for unit in self.civ(defeated).units.clone() {
            self.destroy_unit(unit);
        }
        self.civ_mut(defeated).is_destroyed = true;
        for civ in self.civ_ids() {
            if civ != defeated && self.civ(civ).knows(defeated) {
                self.civ_mut(civ).add_notification(
                    format!("The civilization of [{}] has been destroyed!", defeated_name),
                    Vec::new(),
                    NotificationCategory::General,
                    &[NotificationIcon::DEATH, &defeated_name],
                );
            }
        }
        self.civ_mut(attacker)
            .popup_alerts
            .push(PopupAlert::new(AlertType::Defeated, defeated_name));
        true
    }
}
