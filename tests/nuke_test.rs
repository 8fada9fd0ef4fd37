mod common;

use common::{rng, TestGame};
use unciv::battle::nuke::{may_use_nuke, nuke};
use unciv::battle::MapUnitCombatant;
use unciv::civilization::diplomacy::DiplomaticModifiers;
use unciv::models::ruleset::unit::{BaseUnit, UnitDomain};
use unciv_core::unique::{Unique, UniqueType};
use unciv_core::{constants, CivId, UnitId, Vector2};

const LAUNCH_SITE: Vector2 = Vector2::new(-2, 0);
const GROUND_ZERO: Vector2 = Vector2::new(3, 0);

struct NuclearStandoff {
    test_game: TestGame,
    attacker: CivId,
    victim: CivId,
    missile: UnitId,
}

/// Two civs that know each other but are at peace, with a missile ready to launch
fn nuclear_standoff(weapon: &str) -> NuclearStandoff {
    nuclear_standoff_in(TestGame::new(), weapon)
}

fn nuclear_standoff_in(mut test_game: TestGame, weapon: &str) -> NuclearStandoff {
    let attacker = test_game.add_civ("Launchers");
    let victim = test_game.add_civ("Victims");
    test_game.game.meet_civs(attacker, victim);
    test_game.add_city("Silo City", attacker, Vector2::new(0, -5));
    test_game.add_city("Far Capital", victim, Vector2::new(-4, 0));
    let missile = test_game.add_unit(weapon, attacker, LAUNCH_SITE);
    NuclearStandoff {
        test_game,
        attacker,
        victim,
        missile,
    }
}

#[test]
fn nukes_need_an_explored_target_away_from_the_launch_site() {
    let NuclearStandoff {
        mut test_game, attacker, missile, ..
    } = nuclear_standoff("Nuclear Missile");
    let missile = MapUnitCombatant::new(missile);

    assert!(!may_use_nuke(&test_game.game, missile, GROUND_ZERO));
    test_game.game.civ_mut(attacker).explored_tiles.insert(GROUND_ZERO);
    assert!(may_use_nuke(&test_game.game, missile, GROUND_ZERO));

    test_game.game.civ_mut(attacker).explored_tiles.insert(LAUNCH_SITE);
    assert!(!may_use_nuke(&test_game.game, missile, LAUNCH_SITE));
}

#[test]
fn nukes_cannot_hit_strangers_or_treaty_partners() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile,
    } = nuclear_standoff("Nuclear Missile");
    let missile = MapUnitCombatant::new(missile);
    let stranger = test_game.add_civ("Strangers");
    let stranger_warrior = test_game.add_unit("Warrior", stranger, Vector2::new(4, 0));
    test_game.game.update_visibility(attacker);
    test_game.game.civ_mut(attacker).explored_tiles.insert(GROUND_ZERO);

    assert!(!may_use_nuke(&test_game.game, missile, GROUND_ZERO));

    test_game.game.destroy_unit(stranger_warrior);
    test_game.add_unit("Warrior", victim, GROUND_ZERO);
    assert!(may_use_nuke(&test_game.game, missile, GROUND_ZERO));

    if let Some(manager) = test_game.game.civ_mut(attacker).get_diplomacy_manager_mut(victim) {
        manager.turns_to_peace_treaty = 10;
    }
    assert!(!may_use_nuke(&test_game.game, missile, GROUND_ZERO));
}

#[test]
fn a_nuclear_missile_wipes_out_units_and_starts_a_war() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile,
    } = nuclear_standoff("Nuclear Missile");
    let warrior = test_game.add_unit("Warrior", victim, GROUND_ZERO);

    nuke(&mut test_game.game, &mut rng(1), MapUnitCombatant::new(missile), GROUND_ZERO);

    let game = &test_game.game;
    assert!(game.unit(warrior).is_destroyed);
    assert!(game.unit(missile).is_destroyed);
    assert!(game.is_at_war(attacker, victim));
    assert!(!game.civ(victim).is_destroyed);
    let opinion = game
        .civ(victim)
        .get_diplomacy_manager(attacker)
        .map(|manager| manager.get_modifier(DiplomaticModifiers::UsedNuclearWeapons));
    assert_eq!(opinion, Some(-50.0));
    assert!(test_game
        .notification_texts(attacker)
        .contains(&"After being hit by our [Nuclear Missile], [Victims] has declared war on us!".to_string()));
    assert!(test_game
        .notification_texts(victim)
        .contains(&"A(n) [Nuclear Missile] has been detonated by [Launchers]!".to_string()));
}

#[test]
fn nukes_without_their_resource_do_half_damage() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile,
    } = nuclear_standoff("Nuclear Missile");
    test_game.game.civ_mut(attacker).resources.insert("Uranium".to_string(), -1);
    let warrior = test_game.add_unit("Warrior", victim, GROUND_ZERO);

    nuke(&mut test_game.game, &mut rng(2), MapUnitCombatant::new(missile), GROUND_ZERO);

    assert_eq!(test_game.game.unit(warrior).health, 50);
}

#[test]
fn ground_zero_is_pillaged_and_covered_in_fallout() {
    let NuclearStandoff {
        mut test_game, missile, ..
    } = nuclear_standoff("Nuclear Missile");
    test_game.game.tile_mut(GROUND_ZERO).improvement = Some("Farm".to_string());

    nuke(&mut test_game.game, &mut rng(3), MapUnitCombatant::new(missile), GROUND_ZERO);

    let tile = test_game.game.tile(GROUND_ZERO);
    assert_eq!(tile.improvement.as_deref(), Some("Farm"));
    assert!(tile.improvement_is_pillaged);
    assert!(tile.has_terrain_feature(constants::FALLOUT));
}

#[test]
fn forests_at_ground_zero_burn_down() {
    let NuclearStandoff {
        mut test_game, missile, ..
    } = nuclear_standoff("Nuclear Missile");
    test_game.add_terrain_feature(GROUND_ZERO, "Forest");

    nuke(&mut test_game.game, &mut rng(4), MapUnitCombatant::new(missile), GROUND_ZERO);

    let tile = test_game.game.tile(GROUND_ZERO);
    assert!(!tile.has_terrain_feature("Forest"));
    assert!(tile.has_terrain_feature(constants::FALLOUT));
}

#[test]
fn irremovable_improvements_survive_the_blast() {
    let NuclearStandoff {
        mut test_game, missile, ..
    } = nuclear_standoff("Nuclear Missile");
    test_game.game.tile_mut(GROUND_ZERO).improvement = Some("Great Wall Section".to_string());

    nuke(&mut test_game.game, &mut rng(5), MapUnitCombatant::new(missile), GROUND_ZERO);

    let tile = test_game.game.tile(GROUND_ZERO);
    assert_eq!(tile.improvement.as_deref(), Some("Great Wall Section"));
    assert!(!tile.improvement_is_pillaged);
}

#[test]
fn small_cities_are_destroyed_by_strong_nukes() {
    let NuclearStandoff {
        mut test_game,
        victim,
        missile,
        ..
    } = nuclear_standoff("Nuclear Missile");
    let outpost = test_game.add_city("Outpost", victim, GROUND_ZERO);

    nuke(&mut test_game.game, &mut rng(6), MapUnitCombatant::new(missile), GROUND_ZERO);

    assert!(test_game.game.city(outpost).is_destroyed);
    assert!(!test_game.game.civ(victim).cities.contains(&outpost));
    assert_eq!(test_game.game.tile(GROUND_ZERO).city, None);
}

#[test]
fn original_capitals_survive_strong_nukes() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile,
    } = nuclear_standoff("Nuclear Missile");
    // The launch site is within the blast, fire from further away
    test_game.game.destroy_unit(missile);
    let missile = test_game.add_unit("Nuclear Missile", attacker, GROUND_ZERO);
    let capital = test_game.game.civ(victim).cities[0];
    test_game.game.city_mut(capital).population = 4;

    nuke(&mut test_game.game, &mut rng(7), MapUnitCombatant::new(missile), Vector2::new(-4, 0));

    let capital = test_game.game.city(capital);
    assert!(!capital.is_destroyed);
    // Loses 60% to 78% of its 4 pop, rounded down
    assert!((1..=2).contains(&capital.population));
    assert!(capital.health < test_game.game.city_max_health(capital.id));
}

#[test]
fn a_bomb_shot_down_on_the_way_never_detonates() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile: bomb,
    } = nuclear_standoff("Atomic Bomb");
    let warrior = test_game.add_unit("Warrior", victim, GROUND_ZERO);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", victim, Vector2::new(4, 0));

    nuke(&mut test_game.game, &mut rng(8), MapUnitCombatant::new(bomb), GROUND_ZERO);

    let game = &test_game.game;
    assert!(game.unit(bomb).is_destroyed);
    assert_eq!(game.unit(warrior).health, 100);
    let gun = game.unit(anti_aircraft);
    assert_eq!(gun.health, 100);
    assert_eq!(gun.attacks_this_turn, 1);
    assert_eq!(gun.promotions.xp, 2);
    assert!(!game.tile(GROUND_ZERO).has_terrain_feature(constants::FALLOUT));
    // War is declared before the interception roll
    assert!(game.is_at_war(attacker, victim));
    assert!(test_game
        .notification_texts(attacker)
        .contains(&"After an attempted attack by our [Atomic Bomb], [Victims] has declared war on us!".to_string()));
    assert!(!test_game
        .notification_texts(victim)
        .iter()
        .any(|text| text.contains("detonated")));
    let opinion = game
        .civ(victim)
        .get_diplomacy_manager(attacker)
        .map(|manager| manager.get_modifier(DiplomaticModifiers::UsedNuclearWeapons));
    assert_eq!(opinion, Some(0.0));
}

#[test]
fn a_bomb_that_survives_interception_still_detonates() {
    let mut test_game = TestGame::new();
    test_game.add_base_unit(
        BaseUnit::new("Hardened Bomb", "Atomic Bomber", UnitDomain::Air, 400, 1)
            .with_unique(Unique::new(UniqueType::NuclearWeapon, &["1"])),
    );
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile: bomb,
    } = nuclear_standoff_in(test_game, "Hardened Bomb");
    let warrior = test_game.add_unit("Warrior", victim, GROUND_ZERO);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", victim, Vector2::new(4, 0));

    nuke(&mut test_game.game, &mut rng(9), MapUnitCombatant::new(bomb), GROUND_ZERO);

    let game = &test_game.game;
    let bomb = game.unit(bomb);
    assert!(!bomb.is_destroyed);
    assert!((1..100).contains(&bomb.health));
    assert_eq!(bomb.attacks_this_turn, 1);
    assert!(game.unit(warrior).is_destroyed);
    // Off ground zero a level 1 blast deals 30 to 108 damage
    let gun = game.unit(anti_aircraft);
    assert!(gun.is_destroyed || (1..=70).contains(&gun.health));
    assert!(test_game
        .notification_texts(attacker)
        .contains(&"After being hit by our [Hardened Bomb], [Victims] has declared war on us!".to_string()));
    assert!(test_game
        .notification_texts(victim)
        .contains(&"A(n) [Hardened Bomb] has been detonated by [Launchers]!".to_string()));
}

#[test]
fn civilians_die_once_a_blast_leaves_them_at_forty_health_or_less() {
    let NuclearStandoff {
        mut test_game,
        attacker,
        victim,
        missile,
    } = nuclear_standoff("Nuclear Missile");
    // Without uranium the blast deals a flat 50 damage
    test_game.game.civ_mut(attacker).resources.insert("Uranium".to_string(), -1);
    let healthy = test_game.add_unit("Worker", victim, GROUND_ZERO);
    let just_above = test_game.add_unit("Worker", victim, Vector2::new(2, 0));
    let at_threshold = test_game.add_unit("Worker", victim, Vector2::new(4, 0));
    test_game.game.unit_mut(just_above).health = 91;
    test_game.game.unit_mut(at_threshold).health = 90;

    nuke(&mut test_game.game, &mut rng(10), MapUnitCombatant::new(missile), GROUND_ZERO);

    let game = &test_game.game;
    assert_eq!(game.unit(healthy).health, 50);
    assert_eq!(game.unit(just_above).health, 41);
    assert!(game.unit(at_threshold).is_destroyed);
    assert_eq!(game.unit(at_threshold).health, 0);
}
