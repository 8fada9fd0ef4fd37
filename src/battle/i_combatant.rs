use unciv_core::{CivId, CombatantId, Vector2};

use crate::game_info::GameInfo;

/// Broad classification of a combatant, used by the damage model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantKind {
    Melee,
    Ranged,
    Civilian,
    City,
}

/// Trait for entities that can participate in combat.
///
/// Combatants are handles: every query reads the live [GameInfo], so a combatant
/// stays valid across the mutations of a battle.
pub trait ICombatant: Copy + std::fmt::Debug {
    fn id(&self) -> CombatantId;

    /// Get the name of the combatant
    fn get_name(&self, game: &GameInfo) -> String;

    /// Get the current health of the combatant
    fn get_health(&self, game: &GameInfo) -> i32;

    /// Get the maximum health of the combatant
    fn get_max_health(&self, game: &GameInfo) -> i32;

    fn get_kind(&self, game: &GameInfo) -> CombatantKind;

    /// Base strength when attacking, before modifiers
    fn get_attacking_strength(&self, game: &GameInfo) -> i32;

    /// Base strength when defending, before modifiers
    fn get_defending_strength(&self, game: &GameInfo, attacked_by_ranged: bool) -> i32;

    /// Apply damage to the combatant; negative damage heals
    fn take_damage(&self, game: &mut GameInfo, damage: i32);

    /// Check if the combatant is defeated
    fn is_defeated(&self, game: &GameInfo) -> bool;

    /// Get the civilization of the combatant
    fn get_civ_info(&self, game: &GameInfo) -> CivId;

    /// Get the tile the combatant is on
    fn get_tile(&self, game: &GameInfo) -> Vector2;

    /// Check if the combatant is invisible to a specific civilization
    fn is_invisible(&self, game: &GameInfo, to: CivId) -> bool;

    /// Check if the combatant can attack
    fn can_attack(&self, game: &GameInfo) -> bool;

    /// Implements combatantFilter
    fn matches_filter(&self, game: &GameInfo, filter: &str) -> bool {
        game.combatant_matches_filter(self.id(), filter)
    }

    fn is_melee(&self, game: &GameInfo) -> bool {
        !self.is_ranged(game)
    }

    fn is_ranged(&self, game: &GameInfo) -> bool;

    fn is_air_unit(&self, game: &GameInfo) -> bool;

    fn is_water_unit(&self, game: &GameInfo) -> bool;

    fn is_land_unit(&self, game: &GameInfo) -> bool;

    fn is_city(&self) -> bool;

    fn is_civilian(&self, game: &GameInfo) -> bool {
        self.get_kind(game) == CombatantKind::Civilian
    }
}
