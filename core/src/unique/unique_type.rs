use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of unique abilities that combat reads.
///
/// The comment on each variant is the text template used by rulesets,
/// with `[]` marking the positional params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueType {
    // Strength modifiers
    /// "[+N]% Strength"
    Strength,
    /// "Bonus vs [combatantFilter] [N]%"
    BonusVs,
    /// "Penalty vs [combatantFilter] [N]%"
    PenaltyVs,
    /// "[+N]% Strength for cities"
    StrengthForCities,
    /// "[+N]% Strength when performing Air Sweep"
    StrengthWhenAirsweep,
    /// "[N]% to Flank Attack bonuses"
    FlankAttackBonus,
    /// "No defensive terrain bonus"
    NoDefensiveTerrainBonus,
    /// "No defensive terrain penalty"
    NoDefensiveTerrainPenalty,
    /// "No damage penalty for wounded units"
    NoDamagePenaltyWoundedUnits,
    /// "[+N]% Strength bonus for [mapUnitFilter] units within [N] tiles"
    StrengthBonusInRadius,
    /// "[Great General] provides double combat bonus"
    GreatGeneralProvidesDoubleCombatBonus,

    // Attack rules
    /// "Can move after attacking"
    CanMoveAfterAttacking,
    /// "[N] additional attacks per turn"
    AdditionalAttacks,
    /// "Must set up to ranged attack"
    MustSetUp,
    /// "Ranged attacks may be performed over obstacles"
    IndirectFire,
    /// "Can't attack"
    CannotAttack,
    /// "May attack when embarked"
    AttackOnSea,
    /// "Can only be seen by adjacent units or by units with the right visibility"
    InvisibleToNonAdjacent,
    /// "May withdraw before melee ([N]%)"
    WithdrawsBeforeMeleeCombat,
    /// "Heals [N] damage if it kills a unit"
    HealsAfterKilling,

    // Capture
    /// "Uncapturable"
    Uncapturable,
    /// "May capture killed [mapUnitFilter] units"
    KillUnitCapture,
    /// "Earn [N] Gold and recruit the defeated [mapUnitFilter] unit" - params: [filter, gold]
    GainFromDefeatingUnit,
    /// "Receive [N] Gold and recruit a unit from conquered encampments"
    GainFromEncampment,
    /// "Founds a new city"
    FoundCity,
    /// "Can build [improvementFilter] improvements on tiles"
    BuildImprovements,
    /// "Gain [N] Gold" - only ever fired through a trigger conditional
    GainGold,

    // Interception
    /// "Cannot be intercepted"
    CannotBeIntercepted,
    /// "Cannot intercept [mapUnitFilter] units"
    CannotInterceptUnits,
    /// "[N]% chance to intercept air attacks"
    ChanceInterceptAirAttacks,
    /// "[N]% Damage when intercepting"
    DamageWhenIntercepting,
    /// "[N]% Damage taken from interception"
    DamageFromInterceptionReduced,
    /// "[+N] Air Interception Range"
    AirInterceptionRange,
    /// "[N] extra interceptions may be made per turn"
    ExtraInterceptionsPerTurn,

    // Nukes
    /// "Nuclear weapon of Strength [N]"
    NuclearWeapon,
    /// "Blast radius [N]"
    BlastRadius,
    /// "Self-destructs when attacking"
    SelfDestructs,
    /// "[N]% Damage to garrisoned units from nukes in [cityFilter] cities"
    GarrisonDamageFromNukes,
    /// "[N]% Population loss from nuclear attacks in [cityFilter] cities"
    PopulationLossFromNukes,
    /// "[N]% Chance to be destroyed by nukes"
    DestroyableByNukesChance,
    /// "Can't be removed"
    Irremovable,
    /// "Unpillagable"
    Unpillagable,

    // Cities
    /// "[+N] City health"
    CityHealth,
}

impl fmt::Display for UniqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
