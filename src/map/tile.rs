use serde::{Deserialize, Serialize};
use unciv_core::{constants, CityId, CivId, UnitId, Vector2};

use crate::models::ruleset::tile::TerrainType;
use crate::models::ruleset::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoadStatus {
    #[default]
    None,
    Road,
    Railroad,
}

/// One hex of the map, with what stands on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub position: Vector2,
    pub base_terrain: String,
    pub terrain_features: Vec<String>,
    pub improvement: Option<String>,
    pub improvement_is_pillaged: bool,
    pub road_status: RoadStatus,
    pub road_is_pillaged: bool,

    /// Civ whose borders contain this tile
    pub owner: Option<CivId>,
    /// City whose center this tile is
    pub city: Option<CityId>,

    pub military_unit: Option<UnitId>,
    pub civilian_unit: Option<UnitId>,
    pub air_units: Vec<UnitId>,

    // Derived from terrains whenever they change
    pub is_water: bool,
    pub is_impassable: bool,
    pub obstructs_sight: bool,
    pub defence_bonus: f32,
}

impl Tile {
    pub fn new(position: Vector2, base_terrain: &str) -> Self {
        Self {
            position,
            base_terrain: base_terrain.to_string(),
            terrain_features: Vec::new(),
            improvement: None,
            improvement_is_pillaged: false,
            road_status: RoadStatus::None,
            road_is_pillaged: false,
            owner: None,
            city: None,
            military_unit: None,
            civilian_unit: None,
            air_units: Vec::new(),
            is_water: false,
            is_impassable: false,
            obstructs_sight: false,
            defence_bonus: 0.0,
        }
    }

    /// Recomputes the terrain-derived flags; unknown terrain names count as plain land
    pub fn set_terrain_transients(&mut self, ruleset: &Ruleset) {
        let terrains: Vec<_> = std::iter::once(&self.base_terrain)
            .chain(self.terrain_features.iter())
            .filter_map(|name| ruleset.terrains.get(name))
            .collect();
        self.is_water = terrains.iter().any(|terrain| terrain.terrain_type == TerrainType::Water);
        self.is_impassable = terrains.iter().any(|terrain| terrain.impassable);
        self.obstructs_sight = terrains.iter().any(|terrain| terrain.obstructs_sight);
        self.defence_bonus = terrains.iter().map(|terrain| terrain.defence_bonus).sum();
    }

    pub fn is_land(&self) -> bool {
        !self.is_water
    }

    pub fn is_city_center(&self) -> bool {
        self.city.is_some()
    }

    pub fn get_owner(&self) -> Option<CivId> {
        self.owner
    }

    /// Every unit on the tile: military, civilian, then air units
    pub fn get_units(&self) -> Vec<UnitId> {
        self.military_unit
            .into_iter()
            .chain(self.civilian_unit)
            .chain(self.air_units.iter().copied())
            .collect()
    }

    pub fn all_terrain_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.base_terrain.as_str()).chain(self.terrain_features.iter().map(String::as_str))
    }

    pub fn has_terrain_feature(&self, name: &str) -> bool {
        self.terrain_features.iter().any(|feature| feature == name)
    }

    pub fn add_terrain_feature(&mut self, name: &str, ruleset: &Ruleset) {
        if !self.has_terrain_feature(name) {
            self.terrain_features.push(name.to_string());
            self.set_terrain_transients(ruleset);
        }
    }

    pub fn remove_terrain_feature(&mut self, name: &str, ruleset: &Ruleset) {
        self.terrain_features.retain(|feature| feature != name);
        self.set_terrain_transients(ruleset);
    }

    pub fn remove_improvement(&mut self) {
        self.improvement = None;
        self.improvement_is_pillaged = false;
    }

    pub fn set_pillaged(&mut self) {
        if self.improvement.is_some() {
            self.improvement_is_pillaged = true;
        }
    }

    pub fn has_road(&self) -> bool {
        self.road_status != RoadStatus::None
    }

    /// Tiles with no sight-blocking terrain
    pub fn is_open_terrain(&self) -> bool {
        !self.obstructs_sight
    }

    /// Implements tileFilter
    pub fn matches_filter(&self, filter: &str, observing_civ: Option<CivId>) -> bool {
        match filter {
            constants::ALL => true,
            constants::LAND => self.is_land(),
            constants::WATER => self.is_water,
            "Open terrain" => self.is_open_terrain(),
            "Rough terrain" => !self.is_open_terrain(),
            "Friendly Land" => observing_civ.is_some() && self.owner == observing_civ,
            "Foreign Land" => observing_civ.is_some() && self.owner.is_some() && self.owner != observing_civ,
            "Improvement" => self.improvement.is_some(),
            _ => self.all_terrain_names().any(|name| name == filter) || self.improvement.as_deref() == Some(filter),
        }
    }
}
