#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use unciv::battle::{CityCombatant, Combatant, MapUnitCombatant};
use unciv::civilization::PlayerType;
use unciv::map::tile_map::TileMap;
use unciv::models::ruleset::unit::BaseUnit;
use unciv::models::ruleset::vanilla::vanilla_ruleset;
use unciv::GameInfo;
use unciv_core::{CityId, CivId, UnitId, Vector2};

/// A small grassland world to fight battles in
pub struct TestGame {
    pub game: GameInfo,
}

impl TestGame {
    pub fn new() -> Self {
        let ruleset = vanilla_ruleset();
        let tile_map = TileMap::hexagonal(6, "Grassland", &ruleset);
        Self {
            game: GameInfo::new(ruleset, tile_map),
        }
    }

    pub fn add_civ(&mut self, name: &str) -> CivId {
        self.game.add_civ(name)
    }

    pub fn add_human_civ(&mut self, name: &str) -> CivId {
        let civ = self.game.add_civ(name);
        self.game.civ_mut(civ).player_type = PlayerType::Human;
        civ
    }

    pub fn add_barbarians(&mut self) -> CivId {
        self.game.add_barbarians()
    }

    /// Meets the two civs and puts them at war
    pub fn make_at_war(&mut self, first: CivId, second: CivId) {
        self.game.meet_civs(first, second);
        self.game.declare_war(first, second);
    }

    pub fn add_unit(&mut self, name: &str, civ: CivId, position: Vector2) -> UnitId {
        self.game.add_unit(name, civ, position).unwrap()
    }

    pub fn add_city(&mut self, name: &str, civ: CivId, position: Vector2) -> CityId {
        self.game.add_city(name, civ, position).unwrap()
    }

    pub fn add_base_unit(&mut self, base_unit: BaseUnit) {
        self.game.ruleset.add_unit(base_unit);
    }

    pub fn set_base_terrain(&mut self, position: Vector2, terrain: &str) {
        self.game.set_base_terrain(position, terrain).unwrap();
    }

    pub fn add_terrain_feature(&mut self, position: Vector2, feature: &str) {
        self.game.add_terrain_feature(position, feature).unwrap();
    }

    pub fn notification_texts(&self, civ: CivId) -> Vec<String> {
        self.game
            .civ(civ)
            .notifications
            .iter()
            .map(|notification| notification.text.clone())
            .collect()
    }
}

pub fn unit_combatant(unit_id: UnitId) -> Combatant {
    Combatant::Unit(MapUnitCombatant::new(unit_id))
}

pub fn city_combatant(city_id: CityId) -> Combatant {
    Combatant::City(CityCombatant::new(city_id))
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
