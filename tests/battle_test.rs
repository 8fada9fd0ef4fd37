mod common;

use common::{city_combatant, rng, unit_combatant, TestGame};
use proptest::prelude::*;
use unciv::battle::battle::{self, DamageDealt};
use unciv::battle::{battle_damage, ICombatant};
use unciv::civilization::AlertType;
use unciv::models::ruleset::unit::{BaseUnit, UnitDomain};
use unciv_core::unique::{Conditional, Unique, UniqueType};
use unciv_core::Vector2;

const HERE: Vector2 = Vector2::new(0, 0);
const NEXT_DOOR: Vector2 = Vector2::new(1, 0);

/// Two civs at war, each with a warrior next to the other's
fn warriors_facing_off(attacker_health: i32, defender_health: i32) -> (TestGame, unciv_core::UnitId, unciv_core::UnitId) {
    let mut test_game = TestGame::new();
    let attacking_civ = test_game.add_civ("Attackers");
    let defending_civ = test_game.add_civ("Defenders");
    test_game.make_at_war(attacking_civ, defending_civ);
    let attacker = test_game.add_unit("Warrior", attacking_civ, HERE);
    let defender = test_game.add_unit("Warrior", defending_civ, NEXT_DOOR);
    test_game.game.unit_mut(attacker).health = attacker_health;
    test_game.game.unit_mut(defender).health = defender_health;
    (test_game, attacker, defender)
}

#[test]
fn evenly_matched_melee_ends_with_exactly_one_survivor() {
    let (mut test_game, attacker, defender) = warriors_facing_off(10, 10);
    let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(defender));

    battle::attack(&mut test_game.game, &mut rng(1), attacker_combatant, defender_combatant);

    let game = &test_game.game;
    let attacker_dead = attacker_combatant.is_defeated(game);
    let defender_dead = defender_combatant.is_defeated(game);
    assert!(attacker_dead ^ defender_dead);
    let survivor = if attacker_dead { defender } else { attacker };
    assert!(game.unit(survivor).health > 0);
}

#[test]
fn evenly_matched_melee_is_a_coin_flip() {
    let mut attacker_wins = 0;
    for seed in 0..200 {
        let (mut test_game, attacker, defender) = warriors_facing_off(10, 10);
        let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(defender));
        battle::attack(&mut test_game.game, &mut rng(seed), attacker_combatant, defender_combatant);
        if defender_combatant.is_defeated(&test_game.game) {
            attacker_wins += 1;
        }
    }
    assert!((70..=130).contains(&attacker_wins), "attacker won {attacker_wins} of 200");
}

#[test]
fn winning_melee_attacker_moves_into_the_tile() {
    let (mut test_game, attacker, defender) = warriors_facing_off(100, 1);
    let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(defender));

    battle::attack(&mut test_game.game, &mut rng(3), attacker_combatant, defender_combatant);

    let game = &test_game.game;
    assert!(game.unit(defender).is_destroyed);
    assert_eq!(game.unit(attacker).current_tile, NEXT_DOOR);
    assert_eq!(game.tile(NEXT_DOOR).military_unit, Some(attacker));
    assert_eq!(game.tile(HERE).military_unit, None);
}

#[test]
fn melee_grants_experience_and_great_general_points() {
    let (mut test_game, attacker, defender) = warriors_facing_off(100, 100);
    let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(defender));

    battle::attack(&mut test_game.game, &mut rng(4), attacker_combatant, defender_combatant);

    let game = &test_game.game;
    assert_eq!(game.unit(attacker).promotions.xp, 5);
    assert_eq!(game.unit(defender).promotions.xp, 4);
    assert_eq!(game.civ(game.unit(attacker).owner).great_general_points, 5);
    assert_eq!(game.unit(attacker).attacks_this_turn, 1);
    assert_eq!(game.unit(attacker).current_movement, 0.0);
}

#[test]
fn experience_from_barbarians_is_capped() {
    let mut test_game = TestGame::new();
    let civ = test_game.add_civ("Settlers of Catan");
    let barbarians = test_game.add_barbarians();
    let attacker = test_game.add_unit("Warrior", civ, HERE);
    let barbarian = test_game.add_unit("Warrior", barbarians, NEXT_DOOR);
    test_game.game.unit_mut(attacker).promotions.total_xp_produced = 28;

    let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(barbarian));
    battle::attack(&mut test_game.game, &mut rng(5), attacker_combatant, defender_combatant);

    assert_eq!(test_game.game.unit(attacker).promotions.xp, 2);
    assert_eq!(test_game.game.unit(attacker).promotions.total_xp_produced, 30);
}

#[test]
fn ranged_attack_on_city_only_hurts_the_city() {
    let mut test_game = TestGame::new();
    let archers = test_game.add_civ("Archers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(archers, defenders);
    let archer = test_game.add_unit("Archer", archers, HERE);
    let city = test_game.add_city("Troy", defenders, Vector2::new(2, 0));
    let health_before = test_game.game.city(city).health;

    let damage = battle::attack(&mut test_game.game, &mut rng(6), unit_combatant(archer), city_combatant(city));

    let game = &test_game.game;
    assert!(game.city(city).health < health_before);
    assert_eq!(damage.attacker_dealt, health_before - game.city(city).health);
    assert_eq!(damage.defender_dealt, 0);
    assert_eq!(game.unit(archer).health, 100);
    assert_eq!(game.unit(archer).current_movement, 0.0);
    assert_eq!(game.unit(archer).promotions.xp, 2);
}

#[test]
fn ranged_attacker_never_takes_damage() {
    let mut test_game = TestGame::new();
    let archers = test_game.add_civ("Archers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(archers, defenders);
    let archer = test_game.add_unit("Archer", archers, HERE);
    let spearman = test_game.add_unit("Spearman", defenders, Vector2::new(2, 0));

    let damage = battle::attack(&mut test_game.game, &mut rng(7), unit_combatant(archer), unit_combatant(spearman));

    assert_eq!(damage.defender_dealt, 0);
    assert!(damage.attacker_dealt > 0);
    assert_eq!(test_game.game.unit(archer).health, 100);
}

#[test]
fn civilians_never_strike_back() {
    let mut test_game = TestGame::new();
    let attackers = test_game.add_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    let warrior = test_game.add_unit("Warrior", attackers, HERE);
    let worker = test_game.add_unit("Worker", defenders, NEXT_DOOR);

    let damage = battle_damage::calculate_damage_to_attacker(
        &test_game.game,
        unit_combatant(warrior),
        unit_combatant(worker),
        HERE,
    );
    assert_eq!(damage, 0);
}

#[test]
fn defeated_settler_is_converted_into_a_worker() {
    let mut test_game = TestGame::new();
    let attackers = test_game.add_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(attackers, defenders);
    let warrior = test_game.add_unit("Warrior", attackers, HERE);
    let settler = test_game.add_unit("Settler", defenders, NEXT_DOOR);

    let damage = battle::attack(&mut test_game.game, &mut rng(8), unit_combatant(warrior), unit_combatant(settler));

    let game = &test_game.game;
    assert_eq!(damage, DamageDealt::NONE);
    assert!(game.unit(settler).is_destroyed);
    let worker = game.tile(NEXT_DOOR).civilian_unit.expect("a worker should stand where the settler was");
    assert_eq!(game.unit(worker).name, "Worker");
    assert_eq!(game.unit(worker).owner, attackers);
    assert_eq!(game.unit(worker).current_movement, 0.0);
    assert_eq!(game.unit(warrior).current_tile, NEXT_DOOR);
    // Losing its only unit knocks the defender out
    assert!(game.civ(defenders).is_destroyed);
    assert!(game
        .civ(attackers)
        .popup_alerts
        .iter()
        .any(|alert| alert.alert_type == AlertType::Defeated));
}

#[test]
fn captured_worker_keeps_its_type() {
    let mut test_game = TestGame::new();
    let attackers = test_game.add_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(attackers, defenders);
    test_game.add_city("Home", defenders, Vector2::new(-4, 0));
    let warrior = test_game.add_unit("Warrior", attackers, HERE);
    let worker = test_game.add_unit("Worker", defenders, NEXT_DOOR);

    battle::attack(&mut test_game.game, &mut rng(9), unit_combatant(warrior), unit_combatant(worker));

    let game = &test_game.game;
    assert!(!game.unit(worker).is_destroyed);
    assert_eq!(game.unit(worker).owner, attackers);
    assert_eq!(game.unit(worker).original_owner, defenders);
    assert!(test_game
        .notification_texts(defenders)
        .contains(&"An enemy [Warrior] has captured our [Worker]".to_string()));
}

#[test]
fn defender_withdraws_before_melee() {
    let mut test_game = TestGame::new();
    test_game.add_base_unit(
        BaseUnit::new("Skirmisher", "Scout", UnitDomain::Land, 4, 2)
            .with_unique(Unique::new(UniqueType::WithdrawsBeforeMeleeCombat, &["100"])),
    );
    let attackers = test_game.add_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(attackers, defenders);
    let warrior = test_game.add_unit("Warrior", attackers, NEXT_DOOR);
    let skirmisher = test_game.add_unit("Skirmisher", defenders, HERE);

    let damage = battle::attack(&mut test_game.game, &mut rng(10), unit_combatant(warrior), unit_combatant(skirmisher));

    let game = &test_game.game;
    assert_eq!(damage, DamageDealt::NONE);
    let withdrew_to = game.unit(skirmisher).current_tile;
    assert_ne!(withdrew_to, HERE);
    assert_eq!(withdrew_to.aerial_distance_to(HERE), 1);
    // Away from the attacker, since nothing blocks the tiles behind
    assert_eq!(withdrew_to.aerial_distance_to(NEXT_DOOR), 2);
    assert_eq!(game.unit(skirmisher).health, 100);
    assert_eq!(game.unit(warrior).health, 100);
    assert_eq!(game.unit(warrior).current_tile, NEXT_DOOR);
    assert_eq!(game.unit(warrior).current_movement, 0.0);
    assert_eq!(game.unit(warrior).attacks_this_turn, 1);
}

#[test]
fn barbarians_raid_cities_instead_of_taking_them() {
    let mut test_game = TestGame::new();
    let civ = test_game.add_civ("Raided");
    let barbarians = test_game.add_barbarians();
    let city = test_game.add_city("Lindisfarne", civ, HERE);
    test_game.game.city_mut(city).health = 1;
    test_game.game.civ_mut(civ).gold = 300;
    let raider = test_game.add_unit("Warrior", barbarians, NEXT_DOOR);

    battle::attack(&mut test_game.game, &mut rng(11), unit_combatant(raider), city_combatant(city));

    let game = &test_game.game;
    assert_eq!(game.city(city).civ, civ);
    assert_eq!(game.city(city).health, 2);
    assert_eq!(game.civ(civ).gold, 100);
    assert!(game.unit(raider).is_destroyed);
    assert!(test_game
        .notification_texts(civ)
        .contains(&"Barbarians raided [Lindisfarne] and stole [200] Gold from your treasury!".to_string()));
}

#[test]
fn melee_unit_conquers_a_defeated_city() {
    let mut test_game = TestGame::new();
    let attackers = test_game.add_human_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(attackers, defenders);
    let city = test_game.add_city("Carthage", defenders, HERE);
    test_game.game.city_mut(city).health = 1;
    let warrior = test_game.add_unit("Warrior", attackers, NEXT_DOOR);

    battle::attack(&mut test_game.game, &mut rng(12), unit_combatant(warrior), city_combatant(city));

    let game = &test_game.game;
    assert_eq!(game.city(city).civ, attackers);
    assert!(game.city(city).has_just_been_conquered);
    assert!(!game.city(city).is_capital);
    assert_eq!(game.unit(warrior).current_tile, HERE);
    assert_eq!(game.tile(HERE).get_owner(), Some(attackers));
    // Already beaten down, so the final blow earns nothing
    assert_eq!(game.unit(warrior).promotions.xp, 0);
    assert!(game.civ(defenders).is_destroyed);
    let alerts: Vec<AlertType> = game.civ(attackers).popup_alerts.iter().map(|alert| alert.alert_type).collect();
    assert!(alerts.contains(&AlertType::CityConquered));
    assert!(alerts.contains(&AlertType::Defeated));
}

#[test]
fn gold_is_granted_upon_defeat() {
    let mut test_game = TestGame::new();
    test_game.add_base_unit(
        BaseUnit::new("Martyr", "Melee", UnitDomain::Land, 8, 2).with_unique(
            Unique::new(UniqueType::GainGold, &["25"])
                .with_conditional(Conditional::UponDefeat)
                .with_source("Martyr"),
        ),
    );
    let attackers = test_game.add_civ("Attackers");
    let defenders = test_game.add_civ("Defenders");
    test_game.make_at_war(attackers, defenders);
    test_game.add_city("Home", defenders, Vector2::new(-4, 0));
    let attacker = test_game.add_unit("Warrior", attackers, NEXT_DOOR);
    let defender = test_game.add_unit("Martyr", defenders, HERE);
    test_game.game.unit_mut(defender).health = 1;

    battle::attack(&mut test_game.game, &mut rng(13), unit_combatant(attacker), unit_combatant(defender));

    assert!(test_game.game.unit(defender).is_destroyed);
    assert_eq!(test_game.game.civ(defenders).gold, 25);
}

proptest! {
    #[test]
    fn melee_never_kills_both_sides(attacker_health in 1..=100i32, defender_health in 1..=100i32, seed in any::<u64>()) {
        let (mut test_game, attacker, defender) = warriors_facing_off(attacker_health, defender_health);
        let (attacker_combatant, defender_combatant) = (unit_combatant(attacker), unit_combatant(defender));

        let damage = battle::take_damage(&mut test_game.game, &mut rng(seed), attacker_combatant, defender_combatant);

        let game = &test_game.game;
        prop_assert!(!(attacker_combatant.is_defeated(game) && defender_combatant.is_defeated(game)));
        prop_assert_eq!(damage.attacker_dealt, defender_health - game.unit(defender).health);
        prop_assert_eq!(damage.defender_dealt, attacker_health - game.unit(attacker).health);
    }

    #[test]
    fn city_health_never_drops_below_one(hits in proptest::collection::vec(0..500i32, 1..10)) {
        let mut test_game = TestGame::new();
        let civ = test_game.add_civ("Besieged");
        let city = test_game.add_city("Masada", civ, HERE);
        let combatant = city_combatant(city);
        for damage in hits {
            combatant.take_damage(&mut test_game.game, damage);
            prop_assert!(test_game.game.city(city).health >= 1);
        }
    }
}
