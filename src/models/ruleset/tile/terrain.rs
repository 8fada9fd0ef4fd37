use serde::{Deserialize, Serialize};
use unciv_core::unique::{Unique, UniqueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainType {
    Land,
    Water,
    TerrainFeature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    pub terrain_type: TerrainType,
    /// Defensive modifier in percent, e.g. 0.25 for hills
    #[serde(default)]
    pub defence_bonus: f32,
    #[serde(default)]
    pub impassable: bool,
    #[serde(default)]
    pub obstructs_sight: bool,
    #[serde(default)]
    pub uniques: Vec<Unique>,
}

impl Terrain {
    pub fn new(name: &str, terrain_type: TerrainType, defence_bonus: f32) -> Self {
        Self {
            name: name.to_string(),
            terrain_type,
            defence_bonus,
            impassable: false,
            obstructs_sight: false,
            uniques: Vec::new(),
        }
    }

    pub fn impassable(mut self) -> Self {
        self.impassable = true;
        self
    }

    pub fn obstructing_sight(mut self) -> Self {
        self.obstructs_sight = true;
        self
    }

    pub fn with_unique(mut self, unique: Unique) -> Self {
        self.uniques.push(unique.with_source(&self.name));
        self
    }

    pub fn get_matching_uniques(&self, unique_type: UniqueType) -> impl Iterator<Item = &Unique> {
        self.uniques.iter().filter(move |unique| unique.unique_type == unique_type)
    }

    pub fn has_unique(&self, unique_type: UniqueType) -> bool {
        self.get_matching_uniques(unique_type).next().is_some()
    }
}
