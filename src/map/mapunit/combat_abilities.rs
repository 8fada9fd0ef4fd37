use unciv_core::unique::{CombatAction, StateForConditionals, UniqueType};
use unciv_core::{UnitId, Vector2};

use crate::battle::battle_constants::DEFAULT_NUKE_BLAST_RADIUS;
use crate::game_info::GameInfo;

impl GameInfo {
    fn unit_state(&self, unit_id: UnitId) -> StateForConditionals {
        StateForConditionals {
            civ: Some(self.unit(unit_id).owner),
            unit: Some(unit_id),
            ..StateForConditionals::default()
        }
    }

    fn unit_unique_sum(&self, unit_id: UnitId, unique_type: UniqueType, with_civ: bool) -> i32 {
        let state = self.unit_state(unit_id);
        let uniques = if with_civ {
            self.unit_matching_uniques_with_civ(unit_id, unique_type, &state)
        } else {
            self.unit_matching_uniques(unit_id, unique_type, &state)
        };
        uniques.iter().map(|unique| unique.int_param(0)).sum()
    }

    pub fn max_attacks_per_turn(&self, unit_id: UnitId) -> i32 {
        1 + self.unit_unique_sum(unit_id, UniqueType::AdditionalAttacks, true)
    }

    pub fn intercept_chance(&self, unit_id: UnitId) -> i32 {
        self.unit_unique_sum(unit_id, UniqueType::ChanceInterceptAirAttacks, false)
    }

    pub fn interception_range(&self, unit_id: UnitId) -> i32 {
        self.base_unit(unit_id).intercept_range + self.unit_unique_sum(unit_id, UniqueType::AirInterceptionRange, true)
    }

    fn max_interceptions_per_turn(&self, unit_id: UnitId) -> i32 {
        1 + self.unit_unique_sum(unit_id, UniqueType::ExtraInterceptionsPerTurn, false)
    }

    /// Whether the unit could intercept an air attack on `attacked_tile` right now
    pub fn can_intercept(&self, unit_id: UnitId, attacked_tile: Vector2) -> bool {
        let unit = self.unit(unit_id);
        if unit.is_destroyed || self.intercept_chance(unit_id) <= 0 {
            return false;
        }
        if self.base_unit(unit_id).is_air_unit() && !unit.has_movement() {
            return false;
        }
        if unit.attacks_this_turn >= self.max_interceptions_per_turn(unit_id) {
            return false;
        }
        unit.current_tile.aerial_distance_to(attacked_tile) <= self.interception_range(unit_id)
    }

    /// Multiplier on the damage this unit takes from being intercepted
    pub fn received_intercept_damage_factor(&self, unit_id: UnitId) -> f32 {
        let state = self.unit_state(unit_id);
        self.unit_matching_uniques(unit_id, UniqueType::DamageFromInterceptionReduced, &state)
            .iter()
            .fold(1.0, |factor, unique| factor * (1.0 - unique.float_param(0) / 100.0))
    }

    /// Extra interception damage in percent, for the interceptor fighting `attacker`
    pub fn interception_damage_bonus(&self, interceptor: UnitId, state: &StateForConditionals) -> i32 {
        let state = StateForConditionals {
            combat_action: Some(CombatAction::Intercept),
            ..state.clone()
        };
        self.unit_matching_uniques(interceptor, UniqueType::DamageWhenIntercepting, &state)
            .iter()
            .map(|unique| unique.int_param(0))
            .sum()
    }

    /// Strength level of a nuclear weapon, None for any other unit
    pub fn nuke_level(&self, unit_id: UnitId) -> Option<i32> {
        let state = self.unit_state(unit_id);
        self.unit_matching_uniques(unit_id, UniqueType::NuclearWeapon, &state)
            .first()
            .map(|unique| unique.int_param(0))
    }

    pub fn nuke_blast_radius(&self, unit_id: UnitId) -> i32 {
        let state = self.unit_state(unit_id);
        self.unit_matching_uniques(unit_id, UniqueType::BlastRadius, &state)
            .first()
            .map_or(DEFAULT_NUKE_BLAST_RADIUS, |unique| unique.int_param(0))
    }

    pub fn is_nuclear_weapon(&self, unit_id: UnitId) -> bool {
        self.base_unit(unit_id).is_nuclear_weapon()
    }
}
