mod common;

use common::{rng, unit_combatant, TestGame};
use rand::Rng;
use unciv::battle::air_interception::{air_sweep, select_interceptor, try_intercept_air_attack};
use unciv::battle::battle::DamageDealt;
use unciv::battle::MapUnitCombatant;
use unciv::map::mapunit::UnitAction;
use unciv::models::ruleset::unit::{BaseUnit, UnitDomain};
use unciv_core::unique::{Unique, UniqueType};
use unciv_core::{CivId, Vector2};

const AIRFIELD: Vector2 = Vector2::new(0, 0);
const TARGET: Vector2 = Vector2::new(3, 0);

/// Two civs at war, each with a city far from the action
fn two_civs_at_war() -> (TestGame, CivId, CivId) {
    let mut test_game = TestGame::new();
    let flyers = test_game.add_civ("Flyers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(flyers, defenders);
    test_game.add_city("Hangar", flyers, Vector2::new(-5, 0));
    test_game.add_city("Bunker", defenders, Vector2::new(5, -1));
    (test_game, flyers, defenders)
}

fn flak() -> BaseUnit {
    BaseUnit::new("Flak", "Melee", UnitDomain::Land, 20, 2)
        .with_intercept_range(2)
        .with_unique(Unique::new(UniqueType::ChanceInterceptAirAttacks, &["50"]))
}

fn interceptor_jet() -> BaseUnit {
    BaseUnit::new("Interceptor Jet", "Fighter", UnitDomain::Air, 40, 2)
        .with_ranged(40, 6)
        .with_intercept_range(6)
        .with_unique(Unique::new(UniqueType::ChanceInterceptAirAttacks, &["50"]))
}

#[test]
fn units_without_an_intercept_chance_never_intercept() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    test_game.add_unit("Warrior", defenders, TARGET);

    let interceptor = select_interceptor(&test_game.game, MapUnitCombatant::new(bomber), TARGET, defenders, None);
    assert_eq!(interceptor, None);
}

#[test]
fn the_best_interceptor_is_sent() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(flak());
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    test_game.add_unit("Flak", defenders, Vector2::new(2, 0));
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(3, 1));

    let interceptor = select_interceptor(&test_game.game, MapUnitCombatant::new(bomber), TARGET, defenders, None);
    assert_eq!(interceptor, Some(anti_aircraft));
}

#[test]
fn the_defender_does_not_intercept_attacks_on_itself() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, TARGET);

    let interceptor = select_interceptor(
        &test_game.game,
        MapUnitCombatant::new(bomber),
        TARGET,
        defenders,
        Some(unit_combatant(anti_aircraft)),
    );
    assert_eq!(interceptor, None);
}

#[test]
fn out_of_range_units_do_not_intercept() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(6, 0));

    let interceptor = select_interceptor(&test_game.game, MapUnitCombatant::new(bomber), TARGET, defenders, None);
    assert_eq!(interceptor, None);
}

#[test]
fn stealth_bombers_cannot_be_intercepted() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let stealth_bomber = test_game.add_unit("Stealth Bomber", flyers, AIRFIELD);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(3, 1));

    let damage = try_intercept_air_attack(
        &mut test_game.game,
        &mut rng(1),
        MapUnitCombatant::new(stealth_bomber),
        TARGET,
        defenders,
        None,
    );

    assert_eq!(damage, DamageDealt::NONE);
    assert_eq!(test_game.game.unit(stealth_bomber).health, 100);
    assert_eq!(test_game.game.unit(anti_aircraft).attacks_this_turn, 0);
}

#[test]
fn a_sure_interception_damages_the_attacker() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(3, 1));

    let damage = try_intercept_air_attack(&mut test_game.game, &mut rng(2), MapUnitCombatant::new(bomber), TARGET, defenders, None);

    assert_eq!(damage.attacker_dealt, 0);
    assert!(damage.defender_dealt > 0);
    assert_eq!(test_game.game.unit(bomber).health, 100 - damage.defender_dealt);
    let interceptor = test_game.game.unit(anti_aircraft);
    assert_eq!(interceptor.attacks_this_turn, 1);
    assert_eq!(interceptor.promotions.xp, 2);
    assert!(test_game
        .notification_texts(defenders)
        .iter()
        .any(|text| text.starts_with("Our [Anti-Aircraft Gun] ([-0] HP) intercepted")));
}

#[test]
fn an_interceptor_only_fires_once_per_turn() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let first_bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    let second_bomber = test_game.add_unit("Bomber", flyers, Vector2::new(0, 1));
    test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(3, 1));

    try_intercept_air_attack(&mut test_game.game, &mut rng(3), MapUnitCombatant::new(first_bomber), TARGET, defenders, None);
    let second = try_intercept_air_attack(&mut test_game.game, &mut rng(3), MapUnitCombatant::new(second_bomber), TARGET, defenders, None);

    assert_eq!(second, DamageDealt::NONE);
    assert_eq!(test_game.game.unit(second_bomber).health, 100);
}

#[test]
fn air_sweeps_draw_out_air_interceptors_first() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(interceptor_jet());
    let fighter = test_game.add_unit("Fighter", flyers, AIRFIELD);
    test_game.game.unit_mut(fighter).action = Some(UnitAction::AirSweep);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, TARGET);
    let jet = test_game.add_unit("Interceptor Jet", defenders, Vector2::new(4, 0));

    air_sweep(&mut test_game.game, &mut rng(5), MapUnitCombatant::new(fighter), Vector2::new(2, 0));

    assert_eq!(test_game.game.unit(jet).attacks_this_turn, 1);
    assert_eq!(test_game.game.unit(anti_aircraft).attacks_this_turn, 0);
    let fighter = test_game.game.unit(fighter);
    assert_eq!(fighter.attacks_this_turn, 1);
    assert_eq!(fighter.action, None);
}

#[test]
fn sweeping_empty_skies_is_reported() {
    let (mut test_game, flyers, _) = two_civs_at_war();
    let fighter = test_game.add_unit("Fighter", flyers, AIRFIELD);

    air_sweep(&mut test_game.game, &mut rng(6), MapUnitCombatant::new(fighter), TARGET);

    assert!(test_game
        .notification_texts(flyers)
        .contains(&"Nothing tried to intercept our [Fighter]".to_string()));
    assert_eq!(test_game.game.unit(fighter).current_movement, 0.0);
}

#[test]
fn equally_good_interceptors_go_in_unit_order() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(flak());
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    let first_flak = test_game.add_unit("Flak", defenders, Vector2::new(2, 0));
    test_game.add_unit("Flak", defenders, Vector2::new(3, 1));

    let interceptor = select_interceptor(&test_game.game, MapUnitCombatant::new(bomber), TARGET, defenders, None);
    assert_eq!(interceptor, Some(first_flak));
}

#[test]
fn a_missed_interception_still_uses_up_the_shot() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(flak());
    let bomber = test_game.add_unit("Bomber", flyers, AIRFIELD);
    let flak = test_game.add_unit("Flak", defenders, Vector2::new(3, 1));
    // The interception roll is the first draw, find a seed that misses the 50% chance
    let missing_seed = (0..).find(|seed| rng(*seed).random::<f32>() > 0.5).unwrap();

    let damage = try_intercept_air_attack(
        &mut test_game.game,
        &mut rng(missing_seed),
        MapUnitCombatant::new(bomber),
        TARGET,
        defenders,
        None,
    );

    assert_eq!(damage, DamageDealt::NONE);
    assert_eq!(test_game.game.unit(bomber).health, 100);
    let flak = test_game.game.unit(flak);
    assert_eq!(flak.attacks_this_turn, 1);
    assert_eq!(flak.promotions.xp, 0);
    assert!(!test_game
        .notification_texts(defenders)
        .iter()
        .any(|text| text.contains("intercepted")));
}

#[test]
fn sweeping_into_ground_fire_costs_nothing() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    let fighter = test_game.add_unit("Fighter", flyers, AIRFIELD);
    test_game.game.unit_mut(fighter).action = Some(UnitAction::AirSweep);
    let anti_aircraft = test_game.add_unit("Anti-Aircraft Gun", defenders, Vector2::new(3, 1));

    air_sweep(&mut test_game.game, &mut rng(7), MapUnitCombatant::new(fighter), TARGET);

    let game = &test_game.game;
    let gun = game.unit(anti_aircraft);
    assert_eq!(gun.attacks_this_turn, 1);
    assert_eq!(gun.health, 100);
    assert_eq!(gun.promotions.xp, 0);
    let sweeper = game.unit(fighter);
    assert_eq!(sweeper.health, 100);
    assert_eq!(sweeper.promotions.xp, 0);
    assert_eq!(sweeper.action, None);
    assert!(test_game
        .notification_texts(flyers)
        .contains(&"Our [Fighter] ([-0] HP) was attacked by an intercepting [Anti-Aircraft Gun] ([-0] HP)".to_string()));
    assert!(test_game
        .notification_texts(defenders)
        .contains(&"Our [Anti-Aircraft Gun] ([-0] HP) intercepted and attacked an enemy [Fighter] ([-0] HP)".to_string()));
}

#[test]
fn dogfights_hurt_both_sides_and_teach_both_pilots() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(interceptor_jet());
    let fighter = test_game.add_unit("Fighter", flyers, AIRFIELD);
    test_game.game.unit_mut(fighter).action = Some(UnitAction::AirSweep);
    let jet = test_game.add_unit("Interceptor Jet", defenders, Vector2::new(4, 0));

    air_sweep(&mut test_game.game, &mut rng(8), MapUnitCombatant::new(fighter), TARGET);

    let game = &test_game.game;
    let (sweeper, interceptor) = (game.unit(fighter), game.unit(jet));
    assert!((1..100).contains(&sweeper.health));
    assert!((1..100).contains(&interceptor.health));
    assert_eq!(sweeper.promotions.xp, 5);
    assert_eq!(interceptor.promotions.xp, 5);
    let expected = format!(
        "Our [Fighter] ([-{}] HP) was attacked by an intercepting [Interceptor Jet] ([-{}] HP)",
        100 - sweeper.health,
        100 - interceptor.health
    );
    assert!(test_game.notification_texts(flyers).contains(&expected));
}

#[test]
fn sweeps_draw_out_the_first_of_equally_good_jets() {
    let (mut test_game, flyers, defenders) = two_civs_at_war();
    test_game.add_base_unit(interceptor_jet());
    let fighter = test_game.add_unit("Fighter", flyers, AIRFIELD);
    test_game.game.unit_mut(fighter).action = Some(UnitAction::AirSweep);
    let first_jet = test_game.add_unit("Interceptor Jet", defenders, Vector2::new(4, 0));
    let second_jet = test_game.add_unit("Interceptor Jet", defenders, Vector2::new(4, 1));

    air_sweep(&mut test_game.game, &mut rng(9), MapUnitCombatant::new(fighter), TARGET);

    assert_eq!(test_game.game.unit(first_jet).attacks_this_turn, 1);
    assert_eq!(test_game.game.unit(second_jet).attacks_this_turn, 0);
}
