//! A small built-in ruleset with the units, terrains and promotions combat needs.
//! Mods and scenarios build their own [Ruleset]; this one backs the demo and the tests.

use unciv_core::constants;
use unciv_core::unique::{Conditional, Unique, UniqueType};

use crate::models::ruleset::tile::{Terrain, TerrainType, TileImprovement};
use crate::models::ruleset::unit::{BaseUnit, Promotion, UnitDomain};
use crate::models::ruleset::Ruleset;

pub fn vanilla_ruleset() -> Ruleset {
    let mut ruleset = Ruleset::new();
    ruleset.technology_count = 80;

    for base_unit in vanilla_units() {
        ruleset.add_unit(base_unit);
    }

    let terrains = [
        Terrain::new("Grassland", TerrainType::Land, 0.0),
        Terrain::new("Plains", TerrainType::Land, 0.0),
        Terrain::new("Desert", TerrainType::Land, 0.0),
        Terrain::new("Hill", TerrainType::Land, 0.25).obstructing_sight(),
        Terrain::new("Mountain", TerrainType::Land, 0.25).impassable().obstructing_sight(),
        Terrain::new("Coast", TerrainType::Water, 0.0),
        Terrain::new("Ocean", TerrainType::Water, 0.0),
        Terrain::new("Forest", TerrainType::TerrainFeature, 0.25)
            .obstructing_sight()
            .with_unique(Unique::new(UniqueType::DestroyableByNukesChance, &["50"])),
        Terrain::new("Jungle", TerrainType::TerrainFeature, 0.25)
            .obstructing_sight()
            .with_unique(Unique::new(UniqueType::DestroyableByNukesChance, &["50"])),
        Terrain::new("Marsh", TerrainType::TerrainFeature, -0.15),
        Terrain::new(constants::FALLOUT, TerrainType::TerrainFeature, -0.15),
    ];
    for terrain in terrains {
        ruleset.add_terrain(terrain);
    }

    ruleset.add_improvement(TileImprovement::new("Farm"));
    ruleset.add_improvement(TileImprovement::new("Mine"));
    ruleset.add_improvement(
        TileImprovement::new("Citadel").with_unique(Unique::new(UniqueType::Unpillagable, &[])),
    );
    ruleset.add_improvement(
        TileImprovement::new("Great Wall Section").with_unique(Unique::new(UniqueType::Irremovable, &[])),
    );
    ruleset.add_improvement(TileImprovement::new(constants::BARBARIAN_ENCAMPMENT));

    let promotions = [
        Promotion::new(
            "Shock I",
            vec![Unique::new(UniqueType::Strength, &["+15"])
                .with_conditional(Conditional::InTiles("Open terrain".to_string()))],
        ),
        Promotion::new(
            "Cover I",
            vec![Unique::new(UniqueType::Strength, &["+33"])
                .with_conditional(Conditional::VsCombatant("Ranged".to_string()))
                .with_conditional(Conditional::WhenDefending)],
        ),
        Promotion::new("Blitz", vec![Unique::new(UniqueType::AdditionalAttacks, &["1"])]),
        Promotion::new("Sortie", vec![Unique::new(UniqueType::ExtraInterceptionsPerTurn, &["1"])]),
        Promotion::new("Air Targeting I", vec![Unique::new(UniqueType::BonusVs, &["Water", "33"])]),
        Promotion::new(
            "Interception I",
            vec![Unique::new(UniqueType::DamageWhenIntercepting, &["33"])],
        ),
        Promotion::new(
            "Evasion",
            vec![Unique::new(UniqueType::DamageFromInterceptionReduced, &["50"])],
        ),
        Promotion::new(
            "Flank Attack",
            vec![Unique::new(UniqueType::FlankAttackBonus, &["50"])],
        ),
    ];
    for promotion in promotions {
        ruleset.add_promotion(promotion);
    }

    ruleset
}

fn vanilla_units() -> Vec<BaseUnit> {
    vec![
        BaseUnit::new("Settler", "Civilian", UnitDomain::Land, 0, 2)
            .with_unique(Unique::new(UniqueType::FoundCity, &[])),
        BaseUnit::new("Worker", "Civilian", UnitDomain::Land, 0, 2)
            .with_unique(Unique::new(UniqueType::BuildImprovements, &["Land"])),
        BaseUnit::new("Work Boats", "Civilian Water", UnitDomain::Water, 0, 4)
            .with_unique(Unique::new(UniqueType::BuildImprovements, &["Water"])),
        BaseUnit::new("Great General", "Civilian", UnitDomain::Land, 0, 2)
            .with_great_person_type(constants::WAR_GREAT_PERSON_TYPE)
            .with_unique(Unique::new(UniqueType::StrengthBonusInRadius, &["15", "Military", "2"])),
        BaseUnit::new("Warrior", "Melee", UnitDomain::Land, 8, 2),
        BaseUnit::new("Spearman", "Melee", UnitDomain::Land, 11, 2)
            .with_unique(Unique::new(UniqueType::BonusVs, &["Mounted", "50"])),
        BaseUnit::new("Horseman", "Mounted", UnitDomain::Land, 12, 4)
            .with_required_resource("Horses")
            .with_unique(Unique::new(UniqueType::CanMoveAfterAttacking, &[]))
            .with_unique(Unique::new(UniqueType::PenaltyVs, &["City", "33"])),
        BaseUnit::new("Archer", "Archery", UnitDomain::Land, 5, 2).with_ranged(7, 2),
        BaseUnit::new("Artillery", "Siege", UnitDomain::Land, 21, 2)
            .with_ranged(60, 3)
            .with_unique(Unique::new(UniqueType::MustSetUp, &[]))
            .with_unique(Unique::new(UniqueType::IndirectFire, &[])),
        BaseUnit::new("Scout", "Scout", UnitDomain::Land, 4, 2)
            .with_unique(Unique::new(UniqueType::WithdrawsBeforeMeleeCombat, &["80"])),
        BaseUnit::new("Anti-Aircraft Gun", "Melee", UnitDomain::Land, 32, 2)
            .with_intercept_range(2)
            .with_unique(Unique::new(UniqueType::ChanceInterceptAirAttacks, &["100"]))
            .with_unique(Unique::new(UniqueType::BonusVs, &["Air", "100"])),
        BaseUnit::new("Trireme", "Melee Water", UnitDomain::Water, 10, 4),
        BaseUnit::new("Privateer", "Melee Water", UnitDomain::Water, 25, 5)
            .with_unique(Unique::new(UniqueType::KillUnitCapture, &["Water"])),
        BaseUnit::new("Submarine", "Submarine", UnitDomain::Water, 25, 5)
            .with_ranged(35, 3)
            .with_unique(Unique::new(UniqueType::InvisibleToNonAdjacent, &[])),
        BaseUnit::new("Fighter", "Fighter", UnitDomain::Air, 45, 2)
            .with_ranged(45, 8)
            .with_intercept_range(6)
            .with_required_resource("Oil")
            .with_unique(Unique::new(UniqueType::ChanceInterceptAirAttacks, &["100"]))
            .with_unique(Unique::new(UniqueType::BonusVs, &["Air", "100"])),
        BaseUnit::new("Bomber", "Bomber", UnitDomain::Air, 65, 2)
            .with_ranged(65, 10)
            .with_required_resource("Oil")
            .with_unique(Unique::new(UniqueType::CannotInterceptUnits, &["Air"])),
        BaseUnit::new("Stealth Bomber", "Bomber", UnitDomain::Air, 85, 2)
            .with_ranged(85, 20)
            .with_unique(Unique::new(UniqueType::CannotBeIntercepted, &[])),
        BaseUnit::new("Atomic Bomb", "Atomic Bomber", UnitDomain::Air, 0, 1)
            .with_ranged(0, 12)
            .with_required_resource("Uranium")
            .with_unique(Unique::new(UniqueType::NuclearWeapon, &["1"]))
            .with_unique(Unique::new(UniqueType::BlastRadius, &["2"]))
            .with_unique(Unique::new(UniqueType::SelfDestructs, &[])),
        BaseUnit::new("Nuclear Missile", "Missile", UnitDomain::Air, 0, 1)
            .with_ranged(0, 12)
            .with_required_resource("Uranium")
            .with_unique(Unique::new(UniqueType::NuclearWeapon, &["2"]))
            .with_unique(Unique::new(UniqueType::SelfDestructs, &[])),
    ]
}
