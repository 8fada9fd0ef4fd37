//! Resolution of a single attack, from declaration to its aftermath.
//!
//! Damage calculations according to civ v wiki and https://steamcommunity.com/sharedfiles/filedetails/?id=170194443

use std::ops::Add;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};
use unciv_core::unique::{Conditional, StateForConditionals, Unique, UniqueType};
use unciv_core::{CityId, CivId, Vector2};

use crate::battle::attackable_tile::AttackableTile;
use crate::battle::battle_constants::{BARBARIAN_RAIDED_CITY_HEALTH, MAX_BARBARIAN_RANSOM};
use crate::battle::battle_damage;
use crate::battle::battle_unit_capture;
use crate::battle::city_combatant::CityCombatant;
use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::battle::{air_interception, nuke};
use crate::civilization::{AlertType, NotificationAction, NotificationCategory, NotificationIcon, PopupAlert};
use crate::game_info::GameInfo;
use crate::map::mapunit::UnitAction;

/// Holder for battle result - actual damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageDealt {
    /// Damage done by attacker to defender
    pub attacker_dealt: i32,
    /// Damage done by defender to attacker
    pub defender_dealt: i32,
}

impl DamageDealt {
    pub const NONE: DamageDealt = DamageDealt::new(0, 0);

    pub const fn new(attacker_dealt: i32, defender_dealt: i32) -> Self {
        Self {
            attacker_dealt,
            defender_dealt,
        }
    }
}

impl Add for DamageDealt {
    type Output = DamageDealt;

    fn add(self, other: DamageDealt) -> DamageDealt {
        DamageDealt::new(
            self.attacker_dealt + other.attacker_dealt,
            self.defender_dealt + other.defender_dealt,
        )
    }
}

/// The combatant defending `position`: the city first, then the military unit, then the civilian
pub fn get_map_combatant_of_tile(game: &GameInfo, position: Vector2) -> Option<Combatant> {
    let tile = game.tile_map.get(position)?;
    if let Some(city) = tile.city {
        return Some(Combatant::City(CityCombatant::new(city)));
    }
    tile.military_unit
        .or(tile.civilian_unit)
        .map(|unit| Combatant::Unit(MapUnitCombatant::new(unit)))
}

/// Moves `attacker` to [AttackableTile::tile_to_attack_from], then attacks if still possible
/// (by calling [attack] or [nuke::nuke]).
pub fn move_and_attack<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: Combatant,
    attackable_tile: &AttackableTile,
) -> DamageDealt {
    if !move_preparing_attack(game, attacker, attackable_tile) {
        return DamageDealt::NONE;
    }
    attack_or_nuke(game, rng, attacker, attackable_tile)
}

/// Moves `attacker` to the tile it attacks from, handles siege setup and returns
/// `true` if an attack is still possible.
pub fn move_preparing_attack(game: &mut GameInfo, attacker: Combatant, attackable_tile: &AttackableTile) -> bool {
    let Combatant::Unit(unit_combatant) = attacker else {
        return true;
    };
    let unit_id = unit_combatant.unit_id;
    game.move_to_tile(unit_id, attackable_tile.tile_to_attack_from);
    if game.unit(unit_id).current_tile != attackable_tile.tile_to_attack_from {
        return false;
    }

    // Moving there may have captured the civilian we were after
    match get_map_combatant_of_tile(game, attackable_tile.tile_to_attack) {
        Some(combatant) if combatant.get_civ_info(game) != attacker.get_civ_info(game) => {}
        // Nukes and air sweeps may target empty tiles
        _ if game.is_nuclear_weapon(unit_id) || game.unit(unit_id).is_preparing_air_sweep() => {}
        _ => return false,
    }

    let unit = game.unit(unit_id);
    if game.unit_has_unique(unit_id, UniqueType::MustSetUp) && !unit.is_set_up_for_siege() && unit.has_movement() {
        let unit = game.unit_mut(unit_id);
        unit.action = Some(UnitAction::SetUp);
        unit.use_movement_points(1.0);
    }

    game.unit(unit_id).has_movement()
}

/// Only meant to be called after all prerequisite checks have been done.
pub fn attack_or_nuke<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: Combatant,
    attackable_tile: &AttackableTile,
) -> DamageDealt {
    if let Combatant::Unit(unit) = attacker {
        if game.is_nuclear_weapon(unit.unit_id) {
            nuke::nuke(game, rng, unit, attackable_tile.tile_to_attack);
            return DamageDealt::NONE;
        }
        if game.unit(unit.unit_id).is_preparing_air_sweep() {
            air_interception::air_sweep(game, rng, unit, attackable_tile.tile_to_attack);
            return DamageDealt::NONE;
        }
    }

    let defender = get_map_combatant_of_tile(game, attackable_tile.tile_to_attack)
        .unwrap_or_else(|| panic!("Nothing to attack on {}", attackable_tile.tile_to_attack));
    attack(game, rng, attacker, defender)
}

/// Resolves one attack and everything that follows from it.
///
/// The attack must be legal, as checked by [crate::battle::target_helper].
pub fn attack<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: Combatant,
    defender: Combatant,
) -> DamageDealt {
    let attacked_tile = defender.get_tile(game);
    let attacker_civ = attacker.get_civ_info(game);
    let defender_civ = defender.get_civ_info(game);
    debug!(
        "{} {} attacked {} {}",
        game.civ(attacker_civ).civ_name,
        attacker.get_name(game),
        game.civ(defender_civ).civ_name,
        defender.get_name(game)
    );
    assert!(!attacker.is_defeated(game), "{} is already defeated", attacker.get_name(game));

    if let Combatant::Unit(unit) = attacker {
        game.unit_mut(unit.unit_id).attacks_since_turn_start.push(attacked_tile);
        game.civ_mut(attacker_civ).attacks_since_turn_start.push(attacked_tile);
    }

    let mut intercept_damage = DamageDealt::NONE;
    if let Combatant::Unit(unit) = attacker {
        if attacker.is_air_unit(game) {
            intercept_damage = air_interception::try_intercept_air_attack(
                game,
                rng,
                unit,
                attacked_tile,
                defender_civ,
                Some(defender),
            );
            if attacker.is_defeated(game) {
                return intercept_damage;
            }
        }
    }

    // Withdraw from melee ability
    if let (Combatant::Unit(attacking_unit), Combatant::Unit(defending_unit)) = (attacker, defender) {
        if attacker.is_melee(game) {
            let withdraw_chance = game
                .unit_matching_uniques(
                    defending_unit.unit_id,
                    UniqueType::WithdrawsBeforeMeleeCombat,
                    &StateForConditionals::for_combat(defender_civ, defender.id(), Some(attacker.id()), Some(attacked_tile), None),
                )
                .iter()
                .map(|unique| unique.int_param(0))
                .max();
            if let Some(withdraw_chance) = withdraw_chance {
                if do_withdraw_from_melee_ability(game, rng, attacking_unit, defending_unit, withdraw_chance) {
                    return DamageDealt::NONE;
                }
            }
        }
    }

    let is_already_defeated_city = defender.is_city() && defender.is_defeated(game);

    let damage_dealt = take_damage(game, rng, attacker, defender);

    // Capturing a civilian is reported by the capture itself
    let captured_civilian = defender.is_civilian(game) && attacker.is_melee(game);
    if !captured_civilian {
        post_battle_notifications(game, attacker, defender, attacked_tile, Some(damage_dealt));
    }

    if defender.is_defeated(game) && attacker.is_melee(game) {
        if let (Combatant::City(city), Combatant::Unit(unit)) = (defender, attacker) {
            if game.civ(attacker_civ).is_barbarian {
                raid_city(game, city, unit);
            } else {
                conquer_city(game, city.city_id, unit);
            }
        }
    }

    if let (Combatant::Unit(defending_unit), true) = (defender, defender.is_defeated(game)) {
        trigger_defeat_uniques(game, defending_unit, attacker, attacked_tile);
        if let Combatant::Unit(attacking_unit) = attacker {
            trigger_victory_uniques(game, attacking_unit, defending_unit);
        }
    }
    if let (Combatant::Unit(attacking_unit), true) = (attacker, attacker.is_defeated(game)) {
        trigger_defeat_uniques(game, attacking_unit, defender, attacked_tile);
        if let Combatant::Unit(defending_unit) = defender {
            trigger_victory_uniques(game, defending_unit, attacking_unit);
        }
    }

    let captured_military_unit = battle_unit_capture::try_capture_military_unit(game, attacker, defender, attacked_tile);
    // The captured copy is a new unit, `defender` still looks beatable
    if !captured_military_unit {
        post_battle_move_to_attacked_tile(game, attacker, defender, attacked_tile);
    }

    reduce_attacker_movement_points_and_attacks(game, attacker, defender);

    if !is_already_defeated_city {
        post_battle_add_xp(game, attacker, defender);
    }

    if defender.is_defeated(game) && !defender.is_city() && !defender.is_civilian(game) {
        try_heal_after_killing(game, attacker);
    } else if attacker.is_defeated(game) && !attacker.is_city() && !attacker.is_civilian(game) {
        try_heal_after_killing(game, defender);
    }

    if let Combatant::Unit(unit) = attacker {
        let unit_id = unit.unit_id;
        if !game.unit(unit_id).is_destroyed {
            if game.unit_has_unique(unit_id, UniqueType::SelfDestructs) {
                game.destroy_unit(unit_id);
            } else if game.unit(unit_id).is_moving() {
                game.unit_mut(unit_id).action = None;
            }
        }
    }

    if attacker_civ != defender_civ {
        game.destroy_if_defeated(defender_civ, attacker_civ);
        game.destroy_if_defeated(attacker_civ, defender_civ);
    }

    damage_dealt + intercept_damage
}

/// Applies the damage of one fight: straight to the defender for ranged attacks,
/// round by round for melee, and captures civilians attacked in melee.
pub fn take_damage<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: Combatant,
    defender: Combatant,
) -> DamageDealt {
    let tile_to_attack_from = attacker.get_tile(game);
    let mut potential_damage_to_defender =
        battle_damage::calculate_damage_to_defender(game, attacker, defender, tile_to_attack_from);
    let mut potential_damage_to_attacker =
        battle_damage::calculate_damage_to_attacker(game, attacker, defender, tile_to_attack_from);

    let attacker_health_before = attacker.get_health(game);
    let defender_health_before = defender.get_health(game);

    match defender {
        Combatant::Unit(civilian) if defender.is_civilian(game) && attacker.is_melee(game) => {
            debug!("{} captures {}", attacker.get_name(game), defender.get_name(game));
            battle_unit_capture::capture_civilian_unit(game, attacker, civilian, true);
        }
        // Air units are ranged, but take damage as well
        _ if attacker.is_ranged(game) && !attacker.is_air_unit(game) => {
            debug!("ranged attack for {} damage", potential_damage_to_defender);
            defender.take_damage(game, potential_damage_to_defender);
        }
        _ => {
            debug!(
                "melee fight, {} damage to defender and {} to attacker at most",
                potential_damage_to_defender, potential_damage_to_attacker
            );
            // Either side may defeat the other midway, so each round randomly picks
            // who gets the hit in, weighted by the damage each side still has to deal
            while potential_damage_to_defender + potential_damage_to_attacker > 0 {
                let roll = rng.random_range(0..potential_damage_to_defender + potential_damage_to_attacker);
                if roll < potential_damage_to_defender {
                    potential_damage_to_defender -= 1;
                    defender.take_damage(game, 1);
                    if defender.is_defeated(game) {
                        break;
                    }
                } else {
                    potential_damage_to_attacker -= 1;
                    attacker.take_damage(game, 1);
                    if attacker.is_defeated(game) {
                        break;
                    }
                }
            }
        }
    }

    DamageDealt::new(
        defender_health_before - defender.get_health(game),
        attacker_health_before - attacker.get_health(game),
    )
}

pub(crate) fn post_battle_notifications(
    game: &mut GameInfo,
    attacker: Combatant,
    defender: Combatant,
    attacked_tile: Vector2,
    damage_dealt: Option<DamageDealt>,
) {
    let attacker_civ = attacker.get_civ_info(game);
    let defender_civ = defender.get_civ_info(game);
    if attacker_civ == defender_civ {
        return;
    }

    let (what_happened_icon, what_happened) = if !attacker.is_city() && attacker.is_defeated(game) {
        (NotificationIcon::WAR, " was destroyed while attacking")
    } else if !defender.is_defeated(game) {
        (NotificationIcon::WAR, " has attacked")
    } else if defender.is_city() && attacker.is_melee(game) && game.civ(attacker_civ).is_barbarian {
        (NotificationIcon::WAR, " has raided")
    } else if defender.is_city() && attacker.is_melee(game) {
        (NotificationIcon::WAR, " has captured")
    } else {
        (NotificationIcon::DEATH, " has destroyed")
    };

    let attacker_string = if attacker.is_city() {
        format!("Enemy city [{}]", attacker.get_name(game))
    } else {
        format!("An enemy [{}]", attacker.get_name(game))
    };
    let defender_string = if defender.is_city() {
        if defender.is_defeated(game) && attacker.is_ranged(game) {
            format!(" the defence of [{}]", defender.get_name(game))
        } else {
            format!(" [{}]", defender.get_name(game))
        }
    } else {
        format!(" our [{}]", defender.get_name(game))
    };

    let (attacker_hurt, defender_hurt) = match damage_dealt {
        Some(damage) => (
            if damage.defender_dealt != 0 {
                format!(" ([-{}] HP)", damage.defender_dealt)
            } else {
                String::new()
            },
            format!(" ([-{}] HP)", damage.attacker_dealt),
        ),
        None => (String::new(), String::new()),
    };

    let attacker_icon = if attacker.is_city() {
        NotificationIcon::CITY.to_string()
    } else {
        attacker.get_name(game)
    };
    let defender_icon = if defender.is_city() {
        NotificationIcon::CITY.to_string()
    } else {
        defender.get_name(game)
    };
    let attacker_tile = attacker.get_tile(game);
    game.civ_mut(defender_civ).add_notification(
        format!("{attacker_string}{attacker_hurt}{what_happened}{defender_string}{defender_hurt}"),
        NotificationAction::locations(&[attacked_tile, attacker_tile]),
        NotificationCategory::War,
        &[&attacker_icon, what_happened_icon, &defender_icon],
    );
}

/// Fires the "upon being defeated" uniques of a unit that lost a fight
pub fn trigger_defeat_uniques(game: &mut GameInfo, our_unit: MapUnitCombatant, enemy: Combatant, attacked_tile: Vector2) {
    let uniques = game.unit_triggered_uniques(our_unit.unit_id, &|conditional| {
        matches!(conditional, Conditional::UponDefeat)
    });
    let our_civ = our_unit.get_civ_info(game);
    debug!(
        "{} defeated by {} on {}, {} uniques triggered",
        our_unit.get_name(game),
        enemy.get_name(game),
        attacked_tile,
        uniques.len()
    );
    for unique in &uniques {
        trigger_unique(game, unique, our_civ, attacked_tile);
    }
}

/// Fires the "upon defeating a [filter] unit" uniques of the victor
fn trigger_victory_uniques(game: &mut GameInfo, our_unit: MapUnitCombatant, defeated_unit: MapUnitCombatant) {
    let uniques = game.unit_triggered_uniques(our_unit.unit_id, &|conditional| match conditional {
        Conditional::UponDefeatingUnit(filter) => game.unit_matches_filter(defeated_unit.unit_id, filter),
        _ => false,
    });
    let our_civ = our_unit.get_civ_info(game);
    let position = defeated_unit.get_tile(game);
    for unique in &uniques {
        trigger_unique(game, unique, our_civ, position);
    }
}

fn trigger_unique(game: &mut GameInfo, unique: &Unique, civ: CivId, position: Vector2) {
    match unique.unique_type {
        UniqueType::GainGold => {
            let amount = unique.int_param(0);
            let civ_info = game.civ_mut(civ);
            civ_info.add_gold(amount);
            civ_info.add_location_notification(
                format!("You have gained [{}] Gold from [{}]", amount, unique.source_object_name),
                position,
                NotificationCategory::General,
                &[NotificationIcon::GOLD],
            );
        }
        other => debug!("{:?} has no triggered effect", other),
    }
}

fn try_heal_after_killing(game: &mut GameInfo, victor: Combatant) {
    let Combatant::Unit(unit) = victor else {
        return;
    };
    if game.unit(unit.unit_id).is_destroyed {
        return;
    }
    let amount_to_heal: i32 = game
        .unit_matching_uniques(unit.unit_id, UniqueType::HealsAfterKilling, &StateForConditionals::for_civ(unit.get_civ_info(game)))
        .iter()
        .map(|unique| unique.int_param(0))
        .sum();
    if amount_to_heal > 0 {
        game.unit_mut(unit.unit_id).heal_by(amount_to_heal);
    }
}

fn post_battle_move_to_attacked_tile(game: &mut GameInfo, attacker: Combatant, defender: Combatant, attacked_tile: Vector2) {
    let Combatant::Unit(unit) = attacker else {
        return;
    };
    if !attacker.is_melee(game) || game.unit(unit.unit_id).is_destroyed {
        return;
    }
    let defender_gone = defender.is_defeated(game)
        || defender.get_civ_info(game) == attacker.get_civ_info(game)
        || defender.as_unit().is_some_and(|defender| game.unit(defender.unit_id).is_destroyed);
    // A unit beaten in enemy territory we can't enter stays out of reach
    if defender_gone && game.can_move_to(game.unit(unit.unit_id), attacked_tile) {
        // Any civilian left on the tile gets captured on the way in
        game.move_to_tile(unit.unit_id, attacked_tile);
    }
}

pub(crate) fn post_battle_add_xp(game: &mut GameInfo, attacker: Combatant, defender: Combatant) {
    if defender.is_civilian(game) {
        return;
    }
    let constants = &game.constants;
    let (attacker_xp, defender_xp) = if attacker.is_melee(game) {
        (constants.xp_melee_attacker, constants.xp_melee_defender)
    } else {
        (constants.xp_ranged, constants.xp_ranged)
    };
    add_xp(game, attacker, attacker_xp, defender);
    add_xp(game, defender, defender_xp, attacker);
}

/// Experience for a unit that fought `other`. Fighting barbarians only trains a unit up to a cap.
pub(crate) fn add_xp(game: &mut GameInfo, this_combatant: Combatant, amount: i32, other_combatant: Combatant) {
    let Combatant::Unit(unit) = this_combatant else {
        return;
    };
    let max_xp_from_barbarians = game.constants.max_xp_from_barbarians;
    let total_xp = game.unit(unit.unit_id).promotions.total_xp_produced;
    let xp_gained = if game.civ(other_combatant.get_civ_info(game)).is_barbarian {
        amount.min(max_xp_from_barbarians - total_xp).max(0)
    } else {
        amount
    };
    if xp_gained == 0 {
        return;
    }
    game.unit_mut(unit.unit_id).promotions.add_xp(xp_gained);

    let civ = unit.get_civ_info(game);
    if game.civ(civ).is_major_civ() {
        game.civ_mut(civ).great_general_points += xp_gained;
    }
}

pub(crate) fn reduce_attacker_movement_points_and_attacks(game: &mut GameInfo, attacker: Combatant, defender: Combatant) {
    let unit_combatant = match attacker {
        Combatant::City(city) => {
            game.city_mut(city.city_id).attacked_this_turn = true;
            return;
        }
        Combatant::Unit(unit) => unit,
    };
    let unit_id = unit_combatant.unit_id;
    // Capturing a civilian is not an attack, and the move there was already paid for
    if defender.is_civilian(game) && attacker.get_tile(game) == defender.get_tile(game) {
        return;
    }

    let can_keep_moving = game.unit_has_unique(unit_id, UniqueType::CanMoveAfterAttacking)
        || game.max_attacks_per_turn(unit_id) > game.unit(unit_id).attacks_this_turn + 1;
    let moves_like_air_units = game.base_unit(unit_id).moves_like_air_units();
    let won_melee = attacker.is_melee(game) && defender.is_defeated(game);

    let unit = game.unit_mut(unit_id);
    unit.attacks_this_turn += 1;
    if can_keep_moving {
        // A melee unit that won already paid for moving onto the enemy's tile,
        // and air units only have one "movement" anyway
        if !moves_like_air_units && !won_melee {
            unit.use_movement_points(1.0);
        }
    } else {
        unit.current_movement = 0.0;
    }
    // But not, for instance, if it's set up: then it should definitely keep the action
    if unit.is_fortified() || unit.is_sleeping() || unit.is_guarding() {
        unit.action = None;
    }
}

/// Barbarians can't capture cities: they take gold and leave the city barely standing
fn raid_city(game: &mut GameInfo, city: CityCombatant, raider: MapUnitCombatant) {
    let city_civ = city.get_civ_info(game);
    let city_name = city.get_name(game);
    let location = city.get_tile(game);
    // Back to 2 HP
    city.take_damage(game, 1 - BARBARIAN_RAIDED_CITY_HEALTH);
    let ransom = MAX_BARBARIAN_RANSOM.min(game.civ(city_civ).gold.max(0));
    info!("Barbarians raided {} for {} gold", city_name, ransom);
    let civ = game.civ_mut(city_civ);
    civ.add_gold(-ransom);
    civ.add_location_notification(
        format!("Barbarians raided [{}] and stole [{}] Gold from your treasury!", city_name, ransom),
        location,
        NotificationCategory::War,
        &[NotificationIcon::WAR],
    );
    game.destroy_unit(raider.unit_id);
}

fn conquer_city(game: &mut GameInfo, city_id: CityId, attacker: MapUnitCombatant) {
    let attacker_civ = attacker.get_civ_info(game);
    let (city_name, location) = {
        let city = game.city(city_id);
        (city.name.clone(), city.location)
    };
    info!("{} conquered {}", game.civ(attacker_civ).civ_name, city_name);
    game.civ_mut(attacker_civ).add_location_notification(
        format!("We have conquered the city of [{}]!", city_name),
        location,
        NotificationCategory::War,
        &[NotificationIcon::WAR],
    );

    game.city_mut(city_id).has_just_been_conquered = true;
    let center_tile = game.tile(location);
    let (garrison, civilian, air_units) = (
        center_tile.military_unit,
        center_tile.civilian_unit,
        center_tile.air_units.clone(),
    );
    if let Some(garrison) = garrison {
        game.destroy_unit(garrison);
    }
    if let Some(civilian) = civilian {
        if game.unit(civilian).owner != attacker_civ {
            battle_unit_capture::capture_civilian_unit(game, attacker, MapUnitCombatant::new(civilian), false);
        }
    }
    for air_unit in air_units {
        game.destroy_unit(air_unit);
    }

    let city_civ = game.city(city_id).civ;
    let retakes_capital = {
        let city = game.city(city_id);
        city.is_original_capital && city.founding_civ == attacker_civ
    };
    if !game.civ(attacker_civ).is_major_civ() && game.city(city_id).can_be_destroyed(true) {
        game.destroy_city(city_id);
        return;
    }

    game.transfer_city(city_id, attacker_civ);
    if retakes_capital {
        game.city_mut(city_id).is_capital = true;
    } else if game.civ(attacker_civ).is_human() {
        game.civ_mut(attacker_civ)
            .popup_alerts
            .push(PopupAlert::new(AlertType::CityConquered, city_id.to_string()));
    }
    debug!("{} changed hands from {:?} to {:?}", city_name, city_civ, attacker_civ);
}

/// Evading a melee attack. The chance drops when the attacker is fast
/// and for every tile behind the defender it could not withdraw to.
fn do_withdraw_from_melee_ability<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: MapUnitCombatant,
    defender: MapUnitCombatant,
    base_withdraw_chance: i32,
) -> bool {
    if base_withdraw_chance <= 0 {
        return false;
    }
    let defender_unit = game.unit(defender.unit_id);
    if game.is_embarked(defender_unit) {
        return false;
    }

    let from_tile = defender.get_tile(game);
    let attacker_tile = attacker.get_tile(game);
    let attacker_neighbors = game.tile_map.neighbors(attacker_tile);
    let defender_civ = defender.get_civ_info(game);
    let cannot_withdraw_to = |position: Vector2| {
        let tile = game.tile(position);
        !game.can_move_to(defender_unit, position)
            || (defender.is_land_unit(game) && !tile.is_land())
            || (tile.is_city_center() && tile.get_owner() != Some(defender_civ))
    };

    // Behind the defender, away from the attacker
    let (first_candidates, second_candidates): (Vec<Vector2>, Vec<Vector2>) = game
        .tile_map
        .neighbors(from_tile)
        .into_iter()
        .filter(|position| *position != attacker_tile)
        .partition(|position| !attacker_neighbors.contains(position));

    let attacker_movement = game.base_unit(attacker.unit_id).movement;
    let blocked_tiles = first_candidates.iter().filter(|position| cannot_withdraw_to(**position)).count() as i32;
    let percent_chance = base_withdraw_chance - (attacker_movement - 2).max(0) * 20 - blocked_tiles * 20;
    if rng.random_range(0..100) > percent_chance {
        return false;
    }

    let first_candidates: Vec<Vector2> =
        first_candidates.into_iter().filter(|position| !cannot_withdraw_to(*position)).collect();
    let second_candidates: Vec<Vector2> =
        second_candidates.into_iter().filter(|position| !cannot_withdraw_to(*position)).collect();
    let to_tile = match first_candidates.choose(rng).or_else(|| second_candidates.choose(rng)) {
        Some(tile) => *tile,
        None => return false,
    };

    // A free teleport, not a paid move
    game.remove_unit_from_tile(defender.unit_id);
    game.put_unit_in_tile(defender.unit_id, to_tile);
    // And count 1 attack for attacker but leave it in place
    reduce_attacker_movement_points_and_attacks(game, Combatant::Unit(attacker), Combatant::Unit(defender));

    let notification = format!(
        "[{}] withdrew from a [{}]",
        defender.get_name(game),
        attacker.get_name(game)
    );
    info!("{}", notification);
    let defender_name = defender.get_name(game);
    let attacker_name = attacker.get_name(game);
    let attacker_civ = attacker.get_civ_info(game);
    for civ in [defender_civ, attacker_civ] {
        game.civ_mut(civ).add_notification(
            notification.clone(),
            NotificationAction::locations(&[to_tile, attacker_tile]),
            NotificationCategory::War,
            &[&defender_name, NotificationIcon::WAR, &attacker_name],
        );
    }
    true
}
