use crate::ids::{CityId, CivId, CombatantId, UnitId};
use crate::unique::CombatAction;
use crate::vector2::Vector2;

/// State information for evaluating conditionals in the game.
///
/// Holds ids only; the conditionals are checked against the live game state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateForConditionals {
    /// The civilization this state is for
    pub civ: Option<CivId>,
    /// The city this state is for
    pub city: Option<CityId>,
    /// The unit this state is for
    pub unit: Option<UnitId>,

    /// Our combatant in combat
    pub our_combatant: Option<CombatantId>,
    /// Their combatant in combat
    pub their_combatant: Option<CombatantId>,
    /// The tile being attacked
    pub attacked_tile: Option<Vector2>,
    /// The combat action being performed
    pub combat_action: Option<CombatAction>,

    /// Whether to ignore conditionals
    pub ignore_conditionals: bool,
}

impl StateForConditionals {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// A state in which every conditional passes
    pub fn ignore_conditionals() -> Self {
        Self {
            ignore_conditionals: true,
            ..Self::default()
        }
    }

    pub fn for_civ(civ: CivId) -> Self {
        Self {
            civ: Some(civ),
            ..Self::default()
        }
    }

    /// State for a combatant fighting `enemy`
    pub fn for_combat(
        civ: CivId,
        our_combatant: CombatantId,
        their_combatant: Option<CombatantId>,
        attacked_tile: Option<Vector2>,
        combat_action: Option<CombatAction>,
    ) -> Self {
        let (unit, city) = match our_combatant {
            CombatantId::Unit(unit) => (Some(unit), None),
            CombatantId::City(city) => (None, Some(city)),
        };
        Self {
            civ: Some(civ),
            city,
            unit,
            our_combatant: Some(our_combatant),
            their_combatant,
            attacked_tile,
            combat_action,
            ignore_conditionals: false,
        }
    }
}
