use serde::{Deserialize, Serialize};
use unciv_core::unique::Unique;
use unciv_core::{CityId, CivId, Vector2};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub civ: CivId,
    pub founding_civ: CivId,
    pub location: Vector2,
    pub health: i32,
    pub population: i32,
    /// Uniques of the city's buildings
    pub uniques: Vec<Unique>,
    pub is_capital: bool,
    pub is_original_capital: bool,
    pub has_just_been_conquered: bool,
    /// Cities may bombard once per turn
    pub attacked_this_turn: bool,
    pub is_destroyed: bool,
}

impl City {
    pub fn new(id: CityId, name: &str, civ: CivId, location: Vector2, health: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            civ,
            founding_civ: civ,
            location,
            health,
            population: 1,
            uniques: Vec::new(),
            is_capital: false,
            is_original_capital: false,
            has_just_been_conquered: false,
            attacked_this_turn: false,
            is_destroyed: false,
        }
    }

    /// Original capitals can never be razed; a current capital only right after its capture
    pub fn can_be_destroyed(&self, just_captured: bool) -> bool {
        if self.is_original_capital {
            return false;
        }
        !self.is_capital || just_captured
    }

    pub fn add_population(&mut self, amount: i32) {
        self.population = (self.population + amount).max(1);
    }

    /// Implements the city-specific part of cityFilter
    pub fn matches_filter(&self, filter: &str) -> bool {
        match filter {
            "All" | "in all cities" | "City" => true,
            "Capital" | "in capital" => self.is_capital,
            "Non-capital" => !self.is_capital,
            _ => filter == self.name,
        }
    }
}
