use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use unciv_core::unique::{CombatAction, StateForConditionals, UniqueType};
use unciv_core::{CivId, UnitId, Vector2};

use crate::battle::battle::{self, DamageDealt};
use crate::battle::battle_damage;
use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::civilization::{NotificationAction, NotificationCategory, NotificationIcon};
use crate::game_info::GameInfo;

/// Draws out an interceptor over `attacked_tile` from any civ at war with the attacker.
///
/// - Counts as an attack for both units; the interceptor can't miss.
/// - Air units are preferred. Among them a random civ's unit with the highest intercept chance is picked.
/// - Land interceptors deal no damage and nobody gains XP.
/// - Air interceptors fight it out like melee units, but with ranged strength. 5 XP to both,
///   and none of the interception bonuses apply.
pub fn air_sweep<R: Rng + ?Sized>(game: &mut GameInfo, rng: &mut R, attacker: MapUnitCombatant, attacked_tile: Vector2) {
    let attacker_id = attacker.unit_id;
    let attacker_civ = attacker.get_civ_info(game);

    // Counts as an attack, even if nothing else happens
    game.unit_mut(attacker_id).attacks_this_turn += 1;
    let can_keep_moving = game.unit_has_unique(attacker_id, UniqueType::CanMoveAfterAttacking)
        || game.max_attacks_per_turn(attacker_id) > game.unit(attacker_id).attacks_this_turn;
    let moves_like_air_units = game.base_unit(attacker_id).moves_like_air_units();
    let unit = game.unit_mut(attacker_id);
    if can_keep_moving {
        if !moves_like_air_units {
            unit.use_movement_points(1.0);
        }
    } else {
        unit.current_movement = 0.0;
    }

    let attacker_name = attacker.get_name(game);

    let mut intercepting_civs: Vec<CivId> = game
        .civ_ids()
        .into_iter()
        .filter(|civ| !game.civ(*civ).is_destroyed && game.is_at_war(attacker_civ, *civ))
        .collect();
    // Randomize civs, so no civ is always first in line
    intercepting_civs.shuffle(rng);

    let mut potential_interceptors: Vec<(UnitId, i32)> = intercepting_civs
        .iter()
        .flat_map(|civ| game.civ(*civ).units.iter().copied())
        .filter(|unit| game.can_intercept(*unit, attacked_tile))
        .map(|unit| (unit, game.intercept_chance(unit)))
        .collect();
    // First priority, only air units
    if potential_interceptors.iter().any(|(unit, _)| game.base_unit(*unit).is_air_unit()) {
        potential_interceptors.retain(|(unit, _)| game.base_unit(*unit).is_air_unit());
    }
    // Stable, so equal chances stay in shuffled civ order
    potential_interceptors.sort_by(|(_, a), (_, b)| b.cmp(a));

    let Some(&(interceptor_id, _)) = potential_interceptors.first() else {
        game.civ_mut(attacker_civ).add_notification(
            format!("Nothing tried to intercept our [{}]", attacker_name),
            Vec::new(),
            NotificationCategory::War,
            &[&attacker_name],
        );
        game.unit_mut(attacker_id).action = None;
        return;
    };

    let interceptor = MapUnitCombatant::new(interceptor_id);
    let interceptor_name = interceptor.get_name(game);
    let interceptor_civ = interceptor.get_civ_info(game);
    let locations = NotificationAction::locations(&[interceptor.get_tile(game), attacker.get_tile(game)]);
    // Even if you miss, you took the shot
    game.unit_mut(interceptor_id).attacks_this_turn += 1;
    debug!("{} sweeps {}, {} intercepts", attacker_name, attacked_tile, interceptor_name);

    if !interceptor.is_air_unit(game) {
        game.civ_mut(attacker_civ).add_notification(
            format!(
                "Our [{}] ([-0] HP) was attacked by an intercepting [{}] ([-0] HP)",
                attacker_name, interceptor_name
            ),
            locations.clone(),
            NotificationCategory::War,
            &[&attacker_name, NotificationIcon::WAR, &interceptor_name],
        );
        game.civ_mut(interceptor_civ).add_notification(
            format!(
                "Our [{}] ([-0] HP) intercepted and attacked an enemy [{}] ([-0] HP)",
                interceptor_name, attacker_name
            ),
            locations,
            NotificationCategory::War,
            &[&interceptor_name, NotificationIcon::WAR, &attacker_name],
        );
        game.unit_mut(attacker_id).action = None;
        return;
    }

    // Air versus air works like melee
    let damage_dealt = battle::take_damage(game, rng, Combatant::Unit(attacker), Combatant::Unit(interceptor));

    let sweep_xp = game.constants.xp_air_sweep;
    battle::add_xp(game, Combatant::Unit(interceptor), sweep_xp, Combatant::Unit(attacker));
    battle::add_xp(game, Combatant::Unit(attacker), sweep_xp, Combatant::Unit(interceptor));

    let locations_interceptor_unknown = NotificationAction::locations(&[attacked_tile, attacker.get_tile(game)]);
    add_air_sweep_interception_notifications(
        game,
        attacker,
        interceptor,
        damage_dealt,
        locations_interceptor_unknown,
        locations,
    );
    game.unit_mut(attacker_id).action = None;
}

fn add_air_sweep_interception_notifications(
    game: &mut GameInfo,
    attacker: MapUnitCombatant,
    interceptor: MapUnitCombatant,
    damage_dealt: DamageDealt,
    locations_interceptor_unknown: Vec<NotificationAction>,
    locations: Vec<NotificationAction>,
) {
    let attacker_name = attacker.get_name(game);
    let interceptor_name = interceptor.get_name(game);
    let attacker_civ = attacker.get_civ_info(game);
    let interceptor_civ = interceptor.get_civ_info(game);
    let attacker_lost = damage_dealt.defender_dealt;
    let interceptor_lost = damage_dealt.attacker_dealt;

    let attacker_text = if attacker.is_defeated(game) {
        if game.civ(attacker_civ).viewable_tiles.contains(&interceptor.get_tile(game)) {
            format!(
                "Our [{attacker_name}] ([-{attacker_lost}] HP) was destroyed by an intercepting [{interceptor_name}] ([-{interceptor_lost}] HP)"
            )
        } else {
            format!("Our [{attacker_name}] ([-{attacker_lost}] HP) was destroyed by an unknown interceptor")
        }
    } else if interceptor.is_defeated(game) {
        format!(
            "Our [{attacker_name}] ([-{attacker_lost}] HP) destroyed an intercepting [{interceptor_name}] ([-{interceptor_lost}] HP)"
        )
    } else {
        format!(
            "Our [{attacker_name}] ([-{attacker_lost}] HP) was attacked by an intercepting [{interceptor_name}] ([-{interceptor_lost}] HP)"
        )
    };
    game.civ_mut(attacker_civ).add_notification(
        attacker_text,
        locations_interceptor_unknown,
        NotificationCategory::War,
        &[&attacker_name, NotificationIcon::WAR, NotificationIcon::QUESTION],
    );

    let interceptor_text = if attacker.is_defeated(game) {
        format!(
            "Our [{interceptor_name}] ([-{interceptor_lost}] HP) intercepted and destroyed an enemy [{attacker_name}] ([-{attacker_lost}] HP)"
        )
    } else if interceptor.is_defeated(game) {
        if game.civ(interceptor_civ).viewable_tiles.contains(&attacker.get_tile(game)) {
            format!(
                "Our [{interceptor_name}] ([-{interceptor_lost}] HP) intercepted and was destroyed by an enemy [{attacker_name}] ([-{attacker_lost}] HP)"
            )
        } else {
            format!("Our [{interceptor_name}] ([-{interceptor_lost}] HP) intercepted and was destroyed by an unknown enemy")
        }
    } else {
        format!(
            "Our [{interceptor_name}] ([-{interceptor_lost}] HP) intercepted and attacked an enemy [{attacker_name}] ([-{attacker_lost}] HP)"
        )
    };
    game.civ_mut(interceptor_civ).add_notification(
        interceptor_text,
        locations,
        NotificationCategory::War,
        &[&interceptor_name, NotificationIcon::WAR, &attacker_name],
    );
}

/// Picks the interceptor `intercepting_civ` would send against `attacker`:
/// the eligible unit with the highest intercept chance, first in unit order on ties.
pub fn select_interceptor(
    game: &GameInfo,
    attacker: MapUnitCombatant,
    attacked_tile: Vector2,
    intercepting_civ: CivId,
    defender: Option<Combatant>,
) -> Option<UnitId> {
    let mut candidates: Vec<(UnitId, i32)> = game
        .civ(intercepting_civ)
        .units
        .iter()
        .copied()
        .filter(|unit| game.can_intercept(*unit, attacked_tile))
        .map(|unit| (unit, game.intercept_chance(unit)))
        .collect();
    candidates.sort_by(|(_, a), (_, b)| b.cmp(a));

    let defending_unit = defender.and_then(|defender| defender.as_unit()).map(|unit| unit.unit_id);
    candidates.into_iter().map(|(unit, _)| unit).find(|unit| {
        // The defender is busy defending
        if Some(*unit) == defending_unit {
            return false;
        }
        let state = StateForConditionals::for_combat(
            intercepting_civ,
            MapUnitCombatant::new(*unit).id(),
            Some(attacker.id()),
            Some(attacked_tile),
            Some(CombatAction::Intercept),
        );
        game.unit_matching_uniques(*unit, UniqueType::CannotInterceptUnits, &state)
            .iter()
            .all(|unique| !attacker.matches_filter(game, unique.param(0)))
    })
}

/// Lets `intercepting_civ` intercept an air, ranged or nuclear attack on `attacked_tile`.
///
/// Only the attacker can be hurt; the returned damage is all `defender_dealt`.
pub fn try_intercept_air_attack<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: MapUnitCombatant,
    attacked_tile: Vector2,
    intercepting_civ: CivId,
    defender: Option<Combatant>,
) -> DamageDealt {
    let attacker_civ = attacker.get_civ_info(game);
    let state = StateForConditionals::for_combat(
        attacker_civ,
        attacker.id(),
        defender.map(|defender| defender.id()),
        Some(attacked_tile),
        Some(CombatAction::Attack),
    );
    if !game
        .unit_matching_uniques(attacker.unit_id, UniqueType::CannotBeIntercepted, &state)
        .is_empty()
    {
        return DamageDealt::NONE;
    }

    let Some(interceptor_id) = select_interceptor(game, attacker, attacked_tile, intercepting_civ, defender) else {
        return DamageDealt::NONE;
    };
    let interceptor = MapUnitCombatant::new(interceptor_id);

    // Even if you miss, you took the shot
    game.unit_mut(interceptor_id).attacks_this_turn += 1;
    let intercept_chance = game.intercept_chance(interceptor_id);
    let roll: f32 = rng.random();
    debug!(
        "{} tries to intercept {}: rolled {:.2} against {}%",
        interceptor.get_name(game),
        attacker.get_name(game),
        roll,
        intercept_chance
    );
    if roll > intercept_chance as f32 / 100.0 {
        return DamageDealt::NONE;
    }

    let interceptor_tile = interceptor.get_tile(game);
    let damage = battle_damage::calculate_damage_to_defender(
        game,
        Combatant::Unit(interceptor),
        Combatant::Unit(attacker),
        interceptor_tile,
    );
    let intercept_state = StateForConditionals::for_combat(
        intercepting_civ,
        interceptor.id(),
        Some(attacker.id()),
        Some(attacked_tile),
        Some(CombatAction::Intercept),
    );
    let damage_factor = (1.0 + game.interception_damage_bonus(interceptor_id, &intercept_state) as f32 / 100.0)
        * game.received_intercept_damage_factor(attacker.unit_id);
    let damage = ((damage as f32 * damage_factor) as i32).min(attacker.get_health(game));

    attacker.take_damage(game, damage);
    if damage > 0 {
        let interception_xp = game.constants.xp_interception;
        battle::add_xp(game, Combatant::Unit(interceptor), interception_xp, Combatant::Unit(attacker));
    }

    add_interception_notifications(game, attacker, interceptor, damage);
    DamageDealt::new(0, damage)
}

fn add_interception_notifications(
    game: &mut GameInfo,
    attacker: MapUnitCombatant,
    interceptor: MapUnitCombatant,
    damage: i32,
) {
    let attacker_name = attacker.get_name(game);
    let interceptor_name = interceptor.get_name(game);
    let attacker_civ = attacker.get_civ_info(game);
    let interceptor_civ = interceptor.get_civ_info(game);
    let interceptor_tile = interceptor.get_tile(game);
    let locations = NotificationAction::locations(&[interceptor_tile, attacker.get_tile(game)]);

    let attacker_text = if !attacker.is_defeated(game) {
        format!("Our [{attacker_name}] ([-{damage}] HP) was attacked by an intercepting [{interceptor_name}] ([-0] HP)")
    } else if game.civ(attacker_civ).viewable_tiles.contains(&interceptor_tile) {
        format!("Our [{attacker_name}] ([-{damage}] HP) was destroyed by an intercepting [{interceptor_name}] ([-0] HP)")
    } else {
        format!("Our [{attacker_name}] ([-{damage}] HP) was destroyed by an unknown interceptor")
    };
    game.civ_mut(attacker_civ).add_location_notification(
        attacker_text,
        interceptor_tile,
        NotificationCategory::War,
        &[&attacker_name, NotificationIcon::WAR, &interceptor_name],
    );

    let interceptor_text = if attacker.is_defeated(game) {
        format!("Our [{interceptor_name}] ([-0] HP) intercepted and destroyed an enemy [{attacker_name}] ([-{damage}] HP)")
    } else {
        format!("Our [{interceptor_name}] ([-0] HP) intercepted and attacked an enemy [{attacker_name}] ([-{damage}] HP)")
    };
    game.civ_mut(interceptor_civ).add_notification(
        interceptor_text,
        locations,
        NotificationCategory::War,
        &[&interceptor_name, NotificationIcon::WAR, &attacker_name],
    );
}
