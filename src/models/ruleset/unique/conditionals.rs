use unciv_core::unique::{CombatAction, Conditional, StateForConditionals, Unique};
use unciv_core::{CombatantId, Vector2};

use crate::game_info::GameInfo;

impl GameInfo {
    /// Whether every gating conditional of the unique holds; triggers never gate
    pub fn conditionals_apply(&self, unique: &Unique, state: &StateForConditionals) -> bool {
        if state.ignore_conditionals {
            return true;
        }
        unique
            .conditionals
            .iter()
            .filter(|conditional| !conditional.is_trigger())
            .all(|conditional| self.conditional_applies(conditional, state))
    }

    fn conditional_applies(&self, conditional: &Conditional, state: &StateForConditionals) -> bool {
        match conditional {
            Conditional::VsCombatant(filter) => state
                .their_combatant
                .is_some_and(|their| self.combatant_matches_filter(their, filter)),
            Conditional::VsCity => matches!(state.their_combatant, Some(CombatantId::City(_))),
            Conditional::WhenAttacking => state.combat_action == Some(CombatAction::Attack),
            Conditional::WhenDefending => state.combat_action == Some(CombatAction::Defend),
            Conditional::WhenIntercepting => state.combat_action == Some(CombatAction::Intercept),
            Conditional::InTiles(filter) => self
                .relevant_tile(state)
                .is_some_and(|tile| self.tile_matches_filter(tile, filter, state.civ)),
            Conditional::UponDefeat | Conditional::UponDefeatingUnit(_) => true,
        }
    }

    /// The tile a fight happens on, else where the holder stands
    fn relevant_tile(&self, state: &StateForConditionals) -> Option<Vector2> {
        state
            .attacked_tile
            .or_else(|| state.unit.map(|unit| self.unit(unit).current_tile))
            .or_else(|| state.city.map(|city| self.city(city).location))
    }

    /// Implements combatantFilter
    pub fn combatant_matches_filter(&self, combatant: CombatantId, filter: &str) -> bool {
        match combatant {
            CombatantId::Unit(unit) => self.unit_matches_filter(unit, filter),
            CombatantId::City(city) => filter == "City" || self.city_matches_filter(city, filter),
        }
    }
}
