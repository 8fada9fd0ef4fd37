use unciv_core::{CivId, CombatantId, Vector2};

use crate::battle::city_combatant::CityCombatant;
use crate::battle::i_combatant::{CombatantKind, ICombatant};
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::game_info::GameInfo;

/// Either side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combatant {
    Unit(MapUnitCombatant),
    City(CityCombatant),
}

macro_rules! delegate {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            Combatant::Unit($inner) => $call,
            Combatant::City($inner) => $call,
        }
    };
}

impl Combatant {
    pub fn from_id(id: CombatantId) -> Self {
        match id {
            CombatantId::Unit(unit_id) => Combatant::Unit(MapUnitCombatant::new(unit_id)),
            CombatantId::City(city_id) => Combatant::City(CityCombatant::new(city_id)),
        }
    }

    pub fn as_unit(&self) -> Option<MapUnitCombatant> {
        match self {
            Combatant::Unit(unit) => Some(*unit),
            Combatant::City(_) => None,
        }
    }
}

impl From<MapUnitCombatant> for Combatant {
    fn from(unit: MapUnitCombatant) -> Self {
        Combatant::Unit(unit)
    }
}

impl From<CityCombatant> for Combatant {
    fn from(city: CityCombatant) -> Self {
        Combatant::City(city)
    }
}

impl ICombatant for Combatant {
    fn id(&self) -> CombatantId {
        delegate!(self, inner => inner.id())
    }

    fn get_name(&self, game: &GameInfo) -> String {
        delegate!(self, inner => inner.get_name(game))
    }

    fn get_health(&self, game: &GameInfo) -> i32 {
        delegate!(self, inner => inner.get_health(game))
    }

    fn get_max_health(&self, game: &GameInfo) -> i32 {
        delegate!(self, inner => inner.get_max_health(game))
    }

    fn get_kind(&self, game: &GameInfo) -> CombatantKind {
        delegate!(self, inner => inner.get_kind(game))
    }

    fn get_attacking_strength(&self, game: &GameInfo) -> i32 {
        delegate!(self, inner => inner.get_attacking_strength(game))
    }

    fn get_defending_strength(&self, game: &GameInfo, attacked_by_ranged: bool) -> i32 {
        delegate!(self, inner => inner.get_defending_strength(game, attacked_by_ranged))
    }

    fn take_damage(&self, game: &mut GameInfo, damage: i32) {
        delegate!(self, inner => inner.take_damage(game, damage))
    }

    fn is_defeated(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.is_defeated(game))
    }

    fn get_civ_info(&self, game: &GameInfo) -> CivId {
        delegate!(self, inner => inner.get_civ_info(game))
    }

    fn get_tile(&self, game: &GameInfo) -> Vector2 {
        delegate!(self, inner => inner.get_tile(game))
    }

    fn is_invisible(&self, game: &GameInfo, to: CivId) -> bool {
        delegate!(self, inner => inner.is_invisible(game, to))
    }

    fn can_attack(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.can_attack(game))
    }

    fn is_ranged(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.is_ranged(game))
    }

    fn is_air_unit(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.is_air_unit(game))
    }

    fn is_water_unit(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.is_water_unit(game))
    }

    fn is_land_unit(&self, game: &GameInfo) -> bool {
        delegate!(self, inner => inner.is_land_unit(game))
    }

    fn is_city(&self) -> bool {
        matches!(self, Combatant::City(_))
    }
}
