//! Capturing defeated units.
//!
//! See https://forums.civfanatics.com/threads/prize-ships-for-land-units.650196/
//! and https://civilization.fandom.com/wiki/Module:Data/Civ5/GK/Defines

use rand::Rng;
use tracing::info;
use unciv_core::mod_constants::ModConstants;
use unciv_core::unique::{StateForConditionals, UniqueType};
use unciv_core::{constants, CivId, UnitId, Vector2};

use crate::battle::battle;
use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::battle::random::seeded_random_for_tile;
use crate::civilization::{AlertType, NotificationAction, NotificationCategory, NotificationIcon, PopupAlert};
use crate::game_info::GameInfo;

/// Tries the three ways of capturing a defeated military unit and spawns the prize when any worked.
/// Returns whether a captured unit was placed.
pub fn try_capture_military_unit(
    game: &mut GameInfo,
    attacker: Combatant,
    defender: Combatant,
    attacked_tile: Vector2,
) -> bool {
    let (Combatant::Unit(attacker), Combatant::Unit(defender)) = (attacker, defender) else {
        return false;
    };

    let state = StateForConditionals::for_combat(
        defender.get_civ_info(game),
        defender.id(),
        Some(attacker.id()),
        Some(attacked_tile),
        None,
    );
    if !game
        .unit_matching_uniques(defender.unit_id, UniqueType::Uncapturable, &state)
        .is_empty()
    {
        return false;
    }

    if !defender.is_defeated(game) || defender.is_civilian(game) {
        return false;
    }

    // Every contributor runs, even once one of them succeeded: they all have side effects (gold)
    let contributions = [
        unit_captured_prize_ships_unique(game, attacker, defender),
        unit_captured_from_encampment(game, attacker, defender, attacked_tile),
        unit_gain_from_defeating_unit(game, attacker, defender),
    ];
    if !contributions.iter().any(|captured| *captured) {
        return false;
    }

    // The defeated defender is already off the map, but its record still knows where it stood
    spawn_captured_unit(game, defender, attacker)
}

/// Chance that a unit with the capture unique takes its defeated enemy
pub fn prize_ship_capture_chance(constants: &ModConstants, attacking_strength: f32, defending_strength: f32) -> f32 {
    f32::min(
        constants.capture_chance_max,
        constants.capture_chance_base + attacking_strength / defending_strength * constants.capture_chance_strength_factor,
    )
}

fn unit_captured_prize_ships_unique(game: &GameInfo, attacker: MapUnitCombatant, defender: MapUnitCombatant) -> bool {
    let state = StateForConditionals::for_combat(
        attacker.get_civ_info(game),
        attacker.id(),
        Some(defender.id()),
        None,
        None,
    );
    let can_capture = game
        .unit_matching_uniques(attacker.unit_id, UniqueType::KillUnitCapture, &state)
        .iter()
        .any(|unique| defender.matches_filter(game, unique.param(0)));
    if !can_capture {
        return false;
    }

    let capture_chance = prize_ship_capture_chance(
        &game.constants,
        attacker.get_attacking_strength(game) as f32,
        defender.get_defending_strength(game, attacker.is_ranged(game)).max(1) as f32,
    );
    // Turn and location based, so reloading can't change the outcome
    let mut random = seeded_random_for_tile(game.turns, defender.get_tile(game));
    random.random::<f32>() <= capture_chance
}

fn unit_gain_from_defeating_unit(game: &mut GameInfo, attacker: MapUnitCombatant, defender: MapUnitCombatant) -> bool {
    if !attacker.is_melee(game) {
        return false;
    }
    let attacker_civ = attacker.get_civ_info(game);
    let state = StateForConditionals::for_combat(attacker_civ, attacker.id(), Some(defender.id()), None, None);
    let gold: Vec<i32> = game
        .unit_matching_uniques_with_civ(attacker.unit_id, UniqueType::GainFromDefeatingUnit, &state)
        .iter()
        .filter(|unique| game.unit_matches_filter(defender.unit_id, unique.param(0)))
        .map(|unique| unique.int_param(1))
        .collect();

    for amount in &gold {
        game.civ_mut(attacker_civ).add_gold(*amount);
    }
    !gold.is_empty()
}

fn unit_captured_from_encampment(
    game: &mut GameInfo,
    attacker: MapUnitCombatant,
    defender: MapUnitCombatant,
    attacked_tile: Vector2,
) -> bool {
    if !game.civ(defender.get_civ_info(game)).is_barbarian {
        return false;
    }
    if game.tile(attacked_tile).improvement.as_deref() != Some(constants::BARBARIAN_ENCAMPMENT) {
        return false;
    }

    // Needs to be checked before we try to move to the enemy tile, since the encampment disappears after we move in
    let attacker_civ = attacker.get_civ_info(game);
    let gold: Vec<i32> = game
        .civ_matching_uniques(attacker_civ, UniqueType::GainFromEncampment, &StateForConditionals::for_civ(attacker_civ))
        .iter()
        .map(|unique| unique.int_param(0))
        .collect();
    for amount in &gold {
        game.civ_mut(attacker_civ).add_gold(*amount);
    }
    !gold.is_empty()
}

/// Places a copy of the defeated unit near its tile for the attacker.
/// Returns whether the captured unit could be placed.
fn spawn_captured_unit(game: &mut GameInfo, defender: MapUnitCombatant, attacker: MapUnitCombatant) -> bool {
    let defender_tile = defender.get_tile(game);
    let defender_name = defender.get_name(game);
    let attacker_name = attacker.get_name(game);
    let attacker_civ = attacker.get_civ_info(game);
    let defender_civ = defender.get_civ_info(game);

    let Some(added_unit) = game.place_unit_near_tile(defender_tile, &defender_name, attacker_civ) else {
        return false;
    };
    let captured_unit_health = game.constants.captured_unit_health;
    let unit = game.unit_mut(added_unit);
    unit.current_movement = 0.0;
    unit.health = captured_unit_health;
    let added_unit_tile = unit.current_tile;
    info!("{} captured a {}", attacker_name, defender_name);

    game.civ_mut(attacker_civ).add_notification(
        format!("An enemy [{}] has joined us!", defender_name),
        vec![NotificationAction::MapUnitAction {
            location: added_unit_tile,
            unit: added_unit,
        }],
        NotificationCategory::War,
        &[&defender_name],
    );
    game.civ_mut(defender_civ).add_location_notification(
        format!("An enemy [{}] has captured our [{}]", attacker_name, defender_name),
        defender_tile,
        NotificationCategory::War,
        &[&attacker_name, NotificationIcon::WAR, &defender_name],
    );

    if let Some(civilian) = game.tile(defender_tile).civilian_unit {
        if game.unit(civilian).owner != attacker_civ {
            capture_civilian_unit(game, attacker, MapUnitCombatant::new(civilian), true);
        }
    }
    true
}

/// Captures, converts or destroys a civilian defeated by `attacker`.
///
/// # Panics
/// If `attacker` and `defender` belong to the same civ.
pub fn capture_civilian_unit(
    game: &mut GameInfo,
    attacker: impl ICombatant,
    defender: MapUnitCombatant,
    check_defeat: bool,
) {
    let attacker_civ = attacker.get_civ_info(game);
    // Saved now, capturing overwrites the owner
    let defender_civ = defender.get_civ_info(game);
    assert_ne!(attacker_civ, defender_civ, "Can't capture our own unit!");

    let captured_unit = defender.unit_id;
    game.unit_mut(captured_unit).action = None;
    let captured_unit_tile = defender.get_tile(game);
    let original_owner = game.unit(captured_unit).original_owner;
    let founds_cities = game.base_unit(captured_unit).has_unique(UniqueType::FoundCity);

    let was_destroyed_instead = if game.unit_has_unique(captured_unit, UniqueType::Uncapturable) {
        game.destroy_unit(captured_unit);
        true
    } else if founds_cities && game.civ(attacker_civ).is_city_state {
        // City states can never capture settlers at all
        game.destroy_unit(captured_unit);
        true
    } else if attacker_civ == original_owner {
        // Recaptured, without converting settlers to workers
        game.transfer_unit(captured_unit, attacker_civ);
        false
    } else if may_return_to_original_owner(game, attacker_civ, defender_civ, original_owner) {
        game.transfer_unit(captured_unit, attacker_civ);
        game.civ_mut(attacker_civ)
            .popup_alerts
            .push(PopupAlert::new(AlertType::RecapturedCivilian, captured_unit_tile.to_string()));
        false
    } else {
        capture_or_convert_to_worker(game, captured_unit, attacker_civ).is_none()
    };

    let attacker_name = attacker.get_name(game);
    let defender_name = defender.get_name(game);
    let what_happened = if was_destroyed_instead { "destroyed" } else { "captured" };
    info!("{} {} a {}", attacker_name, what_happened, defender_name);
    game.civ_mut(defender_civ).add_location_notification(
        format!("An enemy [{}] has {} our [{}]", attacker_name, what_happened, defender_name),
        captured_unit_tile,
        NotificationCategory::War,
        &[&attacker_name, NotificationIcon::WAR, &defender_name],
    );
    game.civ_mut(attacker_civ).add_location_notification(
        format!("We have {} an enemy [{}]", what_happened, defender_name),
        captured_unit_tile,
        NotificationCategory::War,
        &[&defender_name, NotificationIcon::WAR, &attacker_name],
    );
    if was_destroyed_instead {
        battle::trigger_defeat_uniques(game, defender, Combatant::from_id(attacker.id()), captured_unit_tile);
    }

    if check_defeat {
        game.destroy_if_defeated(defender_civ, attacker_civ);
    }
}

/// Only humans get the choice of handing back civilians the barbarians took
fn may_return_to_original_owner(game: &GameInfo, attacker_civ: CivId, defender_civ: CivId, original_owner: CivId) -> bool {
    let attacker = game.civ(attacker_civ);
    let original = game.civ(original_owner);
    game.civ(defender_civ).is_barbarian
        && !original.is_barbarian
        && attacker_civ != original_owner
        && attacker.knows(original_owner)
        && original.is_alive()
        && !game.is_at_war(attacker_civ, original_owner)
        && attacker.is_human()
}

/// Captures the unit, turning settlers into the ruleset's first land worker unless the captor is barbarian
/// (so the settler can be returned later).
///
/// Returns where the captured unit stands afterwards, or None when no worker type exists
/// or none could be placed.
pub fn capture_or_convert_to_worker(game: &mut GameInfo, captured_unit: UnitId, capturing_civ: CivId) -> Option<Vector2> {
    let founds_cities = game.base_unit(captured_unit).has_unique(UniqueType::FoundCity);
    if !founds_cities || game.civ(capturing_civ).is_barbarian {
        game.transfer_unit(captured_unit, capturing_civ);
        return Some(game.unit(captured_unit).current_tile);
    }

    game.destroy_unit(captured_unit);
    // So later "was it captured" checks see the new owner
    game.unit_mut(captured_unit).owner = capturing_civ;

    let worker_type_unit = game
        .ruleset
        .units
        .iter()
        .find(|unit| {
            unit.is_civilian()
                && unit
                    .uniques
                    .iter()
                    .any(|unique| unique.unique_type == UniqueType::BuildImprovements && unique.param(0) == constants::LAND)
        })?
        .name
        .clone();
    let position = game.unit(captured_unit).current_tile;
    let worker = game.place_unit_near_tile(position, &worker_type_unit, capturing_civ)?;
    game.unit_mut(worker).current_movement = 0.0;
    Some(game.unit(worker).current_tile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_chance_is_capped() {
        let constants = ModConstants::default();
        assert!((prize_ship_capture_chance(&constants, 10.0, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(prize_ship_capture_chance(&constants, 100.0, 1.0), 0.8);
        assert!((prize_ship_capture_chance(&constants, 0.0, 10.0) - 0.1).abs() < 1e-6);
    }
}
