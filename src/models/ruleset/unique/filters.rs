use unciv_core::{constants, CityId, CivId, UnitId, Vector2};

use crate::game_info::GameInfo;
use crate::models::ruleset::unique::MultiFilter;

impl GameInfo {
    /// Implements civFilter
    pub fn civ_matches_filter(&self, civ: CivId, filter: &str) -> bool {
        let civ_info = self.civ(civ);
        match filter {
            constants::ALL => true,
            "Barbarian" | "Barbarians" => civ_info.is_barbarian,
            "City-State" | "City-States" => civ_info.is_city_state,
            "Major" => civ_info.is_major_civ(),
            "Human player" => civ_info.is_human(),
            "AI player" => !civ_info.is_human(),
            _ => filter == civ_info.civ_name,
        }
    }

    /// Implements mapUnitFilter
    pub fn unit_matches_filter(&self, unit_id: UnitId, filter: &str) -> bool {
        MultiFilter::multi_filter(filter, &|single| self.unit_matches_single_filter(unit_id, single))
    }

    fn unit_matches_single_filter(&self, unit_id: UnitId, filter: &str) -> bool {
        let unit = self.unit(unit_id);
        match filter {
            "Wounded" => unit.health < 100,
            "Embarked" => self.is_embarked(unit),
            _ => {
                unit.base_unit(&self.ruleset).matches_filter(filter)
                    || unit.has_promotion(filter)
                    || self.civ_matches_filter(unit.owner, filter)
            }
        }
    }

    /// Implements cityFilter
    pub fn city_matches_filter(&self, city_id: CityId, filter: &str) -> bool {
        MultiFilter::multi_filter(filter, &|single| {
            let city = self.city(city_id);
            city.matches_filter(single) || self.civ_matches_filter(city.civ, single)
        })
    }

    /// Implements tileFilter, `observing_civ` decides "Friendly Land" and "Foreign Land"
    pub fn tile_matches_filter(&self, position: Vector2, filter: &str, observing_civ: Option<CivId>) -> bool {
        let tile = self.tile(position);
        MultiFilter::multi_filter(filter, &|single| tile.matches_filter(single, observing_civ))
    }
}
