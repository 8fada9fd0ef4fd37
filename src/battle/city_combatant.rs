use unciv_core::{CityId, CivId, CombatantId, Vector2};

use crate::battle::i_combatant::{CombatantKind, ICombatant};
use crate::game_info::GameInfo;

/// Represents a city as a combatant in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CityCombatant {
    pub city_id: CityId,
}

impl CityCombatant {
    pub fn new(city_id: CityId) -> Self {
        Self { city_id }
    }

    /// Civ fanatics forum, from a modder who went through the original code:
    /// (base + (%techs * multiplier) ^ exponent * fullMultiplier) * (1 + perPop * population)
    pub fn get_city_strength(&self, game: &GameInfo) -> i32 {
        let constants = &game.constants;
        let city = game.city(self.city_id);

        // as tech progresses so does city strength
        let tech_count = game.ruleset.technology_count;
        let techs_percent_known = if tech_count > 0 {
            game.civ(city.civ).techs_researched as f32 / tech_count as f32
        } else {
            0.5 // for mods with no tech
        };

        let strength = constants.city_strength_base
            + (techs_percent_known * constants.city_strength_from_techs_multiplier)
                .powf(constants.city_strength_from_techs_exponent)
                * constants.city_strength_from_techs_full_multiplier;

        (strength * (1.0 + constants.city_strength_per_pop * city.population as f32)) as i32
    }
}

impl ICombatant for CityCombatant {
    fn id(&self) -> CombatantId {
        CombatantId::City(self.city_id)
    }

    fn get_name(&self, game: &GameInfo) -> String {
        game.city(self.city_id).name.clone()
    }

    fn get_health(&self, game: &GameInfo) -> i32 {
        game.city(self.city_id).health
    }

    fn get_max_health(&self, game: &GameInfo) -> i32 {
        game.city_max_health(self.city_id)
    }

    fn get_kind(&self, _game: &GameInfo) -> CombatantKind {
        CombatantKind::City
    }

    fn get_attacking_strength(&self, game: &GameInfo) -> i32 {
        self.get_city_strength(game)
    }

    fn get_defending_strength(&self, game: &GameInfo, _attacked_by_ranged: bool) -> i32 {
        self.get_city_strength(game)
    }

    /// Cities never drop below 1 health; being at 1 is what makes them capturable
    fn take_damage(&self, game: &mut GameInfo, damage: i32) {
        let max_health = game.city_max_health(self.city_id);
        let city = game.city_mut(self.city_id);
        city.health = (city.health - damage).clamp(1, max_health.max(1));
    }

    fn is_defeated(&self, game: &GameInfo) -> bool {
        game.city(self.city_id).health == 1
    }

    fn get_civ_info(&self, game: &GameInfo) -> CivId {
        game.city(self.city_id).civ
    }

    fn get_tile(&self, game: &GameInfo) -> Vector2 {
        game.city(self.city_id).location
    }

    fn is_invisible(&self, _game: &GameInfo, _to: CivId) -> bool {
        false
    }

    fn can_attack(&self, game: &GameInfo) -> bool {
        !game.city(self.city_id).attacked_this_turn
    }

    fn is_ranged(&self, _game: &GameInfo) -> bool {
        true
    }

    fn is_air_unit(&self, _game: &GameInfo) -> bool {
        false
    }

    fn is_water_unit(&self, _game: &GameInfo) -> bool {
        false
    }

    fn is_land_unit(&self, _game: &GameInfo) -> bool {
        false
    }

    fn is_city(&self) -> bool {
        true
    }
}
