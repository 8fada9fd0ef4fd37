use unciv_core::unique::UniqueType;
use unciv_core::{CivId, CombatantId, UnitId, Vector2};

use crate::battle::i_combatant::{CombatantKind, ICombatant};
use crate::game_info::GameInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapUnitCombatant {
    pub unit_id: UnitId,
}

impl MapUnitCombatant {
    pub fn new(unit_id: UnitId) -> Self {
        Self { unit_id }
    }
}

impl ICombatant for MapUnitCombatant {
    fn id(&self) -> CombatantId {
        CombatantId::Unit(self.unit_id)
    }

    fn get_name(&self, game: &GameInfo) -> String {
        game.unit(self.unit_id).name.clone()
    }

    fn get_health(&self, game: &GameInfo) -> i32 {
        game.unit(self.unit_id).health
    }

    fn get_max_health(&self, _game: &GameInfo) -> i32 {
        100
    }

    fn get_kind(&self, game: &GameInfo) -> CombatantKind {
        let base_unit = game.base_unit(self.unit_id);
        if base_unit.is_civilian() {
            CombatantKind::Civilian
        } else if base_unit.is_ranged() {
            CombatantKind::Ranged
        } else {
            CombatantKind::Melee
        }
    }

    fn get_attacking_strength(&self, game: &GameInfo) -> i32 {
        let base_unit = game.base_unit(self.unit_id);
        if base_unit.is_ranged() {
            base_unit.ranged_strength
        } else {
            base_unit.strength
        }
    }

    fn get_defending_strength(&self, game: &GameInfo, attacked_by_ranged: bool) -> i32 {
        let unit = game.unit(self.unit_id);
        let base_unit = unit.base_unit(&game.ruleset);
        if game.is_embarked(unit) && !base_unit.is_civilian() {
            game.constants.embarked_unit_defence
        } else if base_unit.is_ranged() && attacked_by_ranged {
            base_unit.ranged_strength
        } else {
            base_unit.strength
        }
    }

    /// Health stays within 0..=100; a unit brought to 0 is removed from the map
    fn take_damage(&self, game: &mut GameInfo, damage: i32) {
        let unit = game.unit_mut(self.unit_id);
        unit.health = (unit.health - damage).clamp(0, 100);
        if unit.health == 0 {
            game.destroy_unit(self.unit_id);
        }
    }

    fn is_defeated(&self, game: &GameInfo) -> bool {
        game.unit(self.unit_id).health <= 0
    }

    fn get_civ_info(&self, game: &GameInfo) -> CivId {
        game.unit(self.unit_id).owner
    }

    fn get_tile(&self, game: &GameInfo) -> Vector2 {
        game.unit(self.unit_id).current_tile
    }

    fn is_invisible(&self, game: &GameInfo, to: CivId) -> bool {
        let unit = game.unit(self.unit_id);
        if unit.owner == to || !game.unit_has_unique(self.unit_id, UniqueType::InvisibleToNonAdjacent) {
            return false;
        }
        !game.civ(to).viewable_invisible_units_tiles.contains(&unit.current_tile)
    }

    fn can_attack(&self, game: &GameInfo) -> bool {
        let unit = game.unit(self.unit_id);
        unit.has_movement()
            && !unit.base_unit(&game.ruleset).is_civilian()
            && unit.attacks_this_turn < game.max_attacks_per_turn(self.unit_id)
    }

    fn is_ranged(&self, game: &GameInfo) -> bool {
        game.base_unit(self.unit_id).is_ranged()
    }

    fn is_air_unit(&self, game: &GameInfo) -> bool {
        game.base_unit(self.unit_id).is_air_unit()
    }

    fn is_water_unit(&self, game: &GameInfo) -> bool {
        game.base_unit(self.unit_id).is_water_unit()
    }

    fn is_land_unit(&self, game: &GameInfo) -> bool {
        game.base_unit(self.unit_id).is_land_unit()
    }

    fn is_city(&self) -> bool {
        false
    }
}
