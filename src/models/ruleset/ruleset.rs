use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unciv_core::{Error, Result};

use crate::models::ruleset::tile::{Terrain, TileImprovement};
use crate::models::ruleset::unit::{BaseUnit, Promotion};

/// The game objects combat looks up by name.
///
/// Units are kept in definition order, since some lookups ("the first unit type that...")
/// depend on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ruleset {
    pub units: Vec<BaseUnit>,
    pub unit_promotions: HashMap<String, Promotion>,
    pub terrains: HashMap<String, Terrain>,
    pub tile_improvements: HashMap<String, TileImprovement>,
    /// Size of the tech tree; 0 means the ruleset has no techs
    pub technology_count: usize,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, base_unit: BaseUnit) {
        self.units.retain(|unit| unit.name != base_unit.name);
        self.units.push(base_unit);
    }

    pub fn add_terrain(&mut self, terrain: Terrain) {
        self.terrains.insert(terrain.name.clone(), terrain);
    }

    pub fn add_improvement(&mut self, improvement: TileImprovement) {
        self.tile_improvements.insert(improvement.name.clone(), improvement);
    }

    pub fn add_promotion(&mut self, promotion: Promotion) {
        self.unit_promotions.insert(promotion.name.clone(), promotion);
    }

    pub fn get_unit(&self, name: &str) -> Option<&BaseUnit> {
        self.units.iter().find(|unit| unit.name == name)
    }

    pub fn unit(&self, name: &str) -> Result<&BaseUnit> {
        self.get_unit(name).ok_or_else(|| Error::UnknownUnit(name.to_string()))
    }

    pub fn terrain(&self, name: &str) -> Result<&Terrain> {
        self.terrains.get(name).ok_or_else(|| Error::UnknownTerrain(name.to_string()))
    }
}
