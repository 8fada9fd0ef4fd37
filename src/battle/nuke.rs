//! Nuclear strikes: war declarations, interception, then the blast itself.
//!
//! See https://forums.civfanatics.com/resources/unit-guide-modern-future-units-g-k.25628/
//! and https://www.carlsguides.com/strategy/civilization5/units/aircraft-nukes.php

use rand::Rng;
use tracing::{debug, info};
use unciv_core::unique::UniqueType;
use unciv_core::{constants, CityId, CivId, Vector2};

use crate::battle::air_interception;
use crate::battle::battle::{get_map_combatant_of_tile, post_battle_notifications};
use crate::battle::battle_constants::{NUKE_FULL_DAMAGE, NUKE_MISSING_RESOURCE_FACTOR};
use crate::battle::city_combatant::CityCombatant;
use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::civilization::diplomacy::DiplomaticModifiers;
use crate::civilization::{NotificationAction, NotificationCategory, NotificationIcon};
use crate::game_info::GameInfo;

/// Checks whether `nuke` is allowed to nuke `target_tile`:
/// - not the tile it stands on, nor an unexplored or out of range one
/// - not if we would need to declare war on someone we can't
///
/// Nuking your own tiles and units is allowed.
pub fn may_use_nuke(game: &GameInfo, nuke: MapUnitCombatant, target_tile: Vector2) -> bool {
    let attacker_civ = nuke.get_civ_info(game);
    let launch_tile = nuke.get_tile(game);

    if launch_tile == target_tile {
        return false;
    }
    if !game.civ(attacker_civ).explored_tiles.contains(&target_tile) {
        return false;
    }
    // Range counts, line of sight doesn't
    if launch_tile.aerial_distance_to(target_tile) > game.base_unit(nuke.unit_id).range {
        return false;
    }

    let is_legal_victim = |defender_civ: Option<CivId>| {
        let Some(defender_civ) = defender_civ else {
            return true;
        };
        let defender = game.civ(defender_civ);
        if defender_civ == attacker_civ || defender.is_defeated() || defender.is_barbarian {
            return true;
        }
        // Unknown civs can't be nuked, even in tiles we can't see
        game.civ(attacker_civ)
            .get_diplomacy_manager(defender_civ)
            .is_some_and(|manager| manager.can_attack())
    };

    game.tile_map
        .tiles_in_distance(target_tile, game.nuke_blast_radius(nuke.unit_id))
        .into_iter()
        .all(|tile| {
            is_legal_victim(game.tile(tile).get_owner())
                && is_legal_victim(get_map_combatant_of_tile(game, tile).map(|combatant| combatant.get_civ_info(game)))
        })
}

/// Detonates `attacker` over `target_tile`, unless it gets shot down on the way.
pub fn nuke<R: Rng + ?Sized>(game: &mut GameInfo, rng: &mut R, attacker: MapUnitCombatant, target_tile: Vector2) {
    let attacking_civ = attacker.get_civ_info(game);
    let Some(nuke_strength) = game.nuke_level(attacker.unit_id) else {
        return;
    };
    let blast_radius = game.nuke_blast_radius(attacker.unit_id);
    let hit_tiles = game.tile_map.tiles_in_distance(target_tile, blast_radius);
    info!(
        "{} launches a {} (level {}) at {}",
        game.civ(attacking_civ).civ_name,
        attacker.get_name(game),
        nuke_strength,
        target_tile
    );

    let (hit_civs_territory, notify_declared_war_civs) =
        declare_war_on_hit_civs(game, rng, attacker, &hit_tiles, target_tile);

    add_nuke_notifications(game, attacker, target_tile, &notify_declared_war_civs, &hit_civs_territory);

    if attacker.is_defeated(game) {
        info!("{} was shot down before detonating", attacker.get_name(game));
        return;
    }

    game.unit_mut(attacker.unit_id).attacks_since_turn_start.push(target_tile);

    for tile in hit_tiles {
        do_nuke_explosion_for_tile(game, rng, attacker, tile, nuke_strength, tile == target_tile);
    }

    if game.unit_has_unique(attacker.unit_id, UniqueType::SelfDestructs) {
        game.destroy_unit(attacker.unit_id);
    }

    // One penalty with every civ that knows us, however many were hit
    let penalty = game.constants.used_nuclear_weapons_modifier;
    for civ in game.civ_ids() {
        if let Some(manager) = game.civ_mut(civ).get_diplomacy_manager_mut(attacking_civ) {
            manager.set_modifier(DiplomaticModifiers::UsedNuclearWeapons, penalty);
        }
    }

    if !game.unit(attacker.unit_id).is_destroyed {
        game.unit_mut(attacker.unit_id).attacks_this_turn += 1;
    }
}

/// Declares war on every civ owning a hit tile or a hit unit. Civs with units in the blast
/// get a chance to intercept.
///
/// Returns the civs whose territory was hit, and the civs we are newly at war with.
fn declare_war_on_hit_civs<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: MapUnitCombatant,
    hit_tiles: &[Vector2],
    target_tile: Vector2,
) -> (Vec<CivId>, Vec<CivId>) {
    let attacking_civ = attacker.get_civ_info(game);
    let mut notify_declared_war_civs: Vec<CivId> = Vec::new();
    let mut try_declare_war = |game: &mut GameInfo, civ_suffered: CivId| {
        if civ_suffered != attacking_civ
            && game.civ(civ_suffered).knows(attacking_civ)
            && !game.civ(civ_suffered).is_at_war_with(attacking_civ)
        {
            game.declare_war(attacking_civ, civ_suffered);
            if !notify_declared_war_civs.contains(&civ_suffered) {
                notify_declared_war_civs.push(civ_suffered);
            }
        }
    };

    let mut hit_civs_territory: Vec<CivId> = Vec::new();
    for owner in hit_tiles.iter().filter_map(|tile| game.tile(*tile).get_owner()) {
        if !hit_civs_territory.contains(&owner) {
            hit_civs_territory.push(owner);
        }
    }
    for hit_civ in &hit_civs_territory {
        try_declare_war(game, *hit_civ);
    }

    // Potentially hit units will try to intercept the nuke before it drops
    let mut civs_whose_units_were_attacked: Vec<CivId> = Vec::new();
    for unit in hit_tiles.iter().flat_map(|tile| game.tile(*tile).get_units()) {
        let owner = game.unit(unit).owner;
        if owner != attacking_civ && !civs_whose_units_were_attacked.contains(&owner) {
            civs_whose_units_were_attacked.push(owner);
        }
    }
    for civ in civs_whose_units_were_attacked {
        try_declare_war(game, civ);
        if attacker.is_air_unit(game) && !attacker.is_defeated(game) {
            air_interception::try_intercept_air_attack(game, rng, attacker, target_tile, civ, None);
        }
    }

    (hit_civs_territory, notify_declared_war_civs)
}

fn add_nuke_notifications(
    game: &mut GameInfo,
    attacker: MapUnitCombatant,
    target_tile: Vector2,
    notify_declared_war_civs: &[CivId],
    hit_civs_territory: &[CivId],
) {
    let attacking_civ = attacker.get_civ_info(game);
    let attacker_name = attacker.get_name(game);
    let attacking_civ_name = game.civ(attacking_civ).civ_name.clone();
    let nuke_notification_actions = vec![
        NotificationAction::LocationAction { location: target_tile },
        NotificationAction::CivilopediaAction {
            link: format!("Units/{}", attacker_name),
        },
    ];

    // An intercepted and destroyed nuke fails to detonate
    let war_text = if attacker.is_defeated(game) {
        "After an attempted attack by our"
    } else {
        "After being hit by our"
    };
    for defending_civ in notify_declared_war_civs {
        let defending_civ_name = game.civ(*defending_civ).civ_name.clone();
        game.civ_mut(attacking_civ).add_notification(
            format!("{} [{}], [{}] has declared war on us!", war_text, attacker_name, defending_civ_name),
            nuke_notification_actions.clone(),
            NotificationCategory::Diplomacy,
            &[&defending_civ_name, NotificationIcon::WAR, &attacker_name],
        );
    }
    if attacker.is_defeated(game) {
        return;
    }

    for other_civ in game.civ_ids() {
        if other_civ == attacking_civ || !game.civ(other_civ).is_alive() {
            continue;
        }
        let (text, icons): (String, Vec<&str>) = if hit_civs_territory.contains(&other_civ) {
            (
                format!(
                    "A(n) [{}] from [{}] has exploded in our territory!",
                    attacker_name, attacking_civ_name
                ),
                vec![attacking_civ_name.as_str(), NotificationIcon::WAR, attacker_name.as_str()],
            )
        } else if game.civ(other_civ).knows(attacking_civ) {
            (
                format!("A(n) [{}] has been detonated by [{}]!", attacker_name, attacking_civ_name),
                vec![attacking_civ_name.as_str(), NotificationIcon::WAR, attacker_name.as_str()],
            )
        } else {
            (
                format!("A(n) [{}] has been detonated by [an unknown civilization]!", attacker_name),
                vec![NotificationIcon::WAR, attacker_name.as_str()],
            )
        };
        game.civ_mut(other_civ).add_notification(
            text,
            nuke_notification_actions.clone(),
            NotificationCategory::War,
            &icons,
        );
    }
}

/// Damage to units for a blast of `nuke_strength`, before modifiers
fn unit_damage_for_nuke_level<R: Rng + ?Sized>(rng: &mut R, nuke_strength: i32, is_ground_zero: bool) -> i32 {
    if is_ground_zero || nuke_strength >= 2 {
        NUKE_FULL_DAMAGE
    } else if nuke_strength == 1 {
        30 + rng.random_range(0..40) + rng.random_range(0..40)
    } else {
        // Level 0 is not a thing in the base game, it would treat units like level 2
        20 + rng.random_range(0..30)
    }
}

fn do_nuke_explosion_for_tile<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    attacker: MapUnitCombatant,
    tile: Vector2,
    nuke_strength: i32,
    is_ground_zero: bool,
) {
    let attacking_civ = attacker.get_civ_info(game);
    let mut damage_modifier_from_missing_resource = 1.0;
    if !game.civ(attacking_civ).is_barbarian {
        if let Some(resource) = &game.base_unit(attacker.unit_id).required_resource {
            if game.civ(attacking_civ).get_resource_amount(resource) < 0 {
                damage_modifier_from_missing_resource *= NUKE_MISSING_RESOURCE_FACTOR;
            }
        }
    }

    // A bunker protects the garrison even when the city itself is destroyed
    let mut building_modifier = 1.0;

    if let Some(city_id) = game.tile(tile).city {
        building_modifier = game.city_aggregate_modifier(city_id, UniqueType::GarrisonDamageFromNukes);
        let city_civ = game.city(city_id).civ;
        do_nuke_explosion_damage_to_city(game, rng, city_id, nuke_strength, damage_modifier_from_missing_resource);
        post_battle_notifications(
            game,
            Combatant::Unit(attacker),
            Combatant::City(CityCombatant::new(city_id)),
            tile,
            None,
        );
        game.destroy_if_defeated(city_civ, attacking_civ);
    }

    let civilian_death_threshold = game.constants.nuke_civilian_death_threshold;
    for unit_id in game.tile(tile).get_units() {
        let base_damage = unit_damage_for_nuke_level(rng, nuke_strength, is_ground_zero);
        let damage =
            (base_damage as f32 * building_modifier * damage_modifier_from_missing_resource + f32::EPSILON) as i32;
        let defender = MapUnitCombatant::new(unit_id);
        debug!("{} takes {} nuke damage", defender.get_name(game), damage);
        if defender.is_civilian(game) {
            if game.unit(unit_id).health - damage <= civilian_death_threshold {
                game.unit_mut(unit_id).health = 0;
                game.destroy_unit(unit_id);
            } else {
                defender.take_damage(game, damage);
            }
        } else {
            defender.take_damage(game, damage);
        }
        post_battle_notifications(game, Combatant::Unit(attacker), Combatant::Unit(defender), tile, None);
        let defender_civ = defender.get_civ_info(game);
        game.destroy_if_defeated(defender_civ, attacking_civ);
    }

    // Never touch city centers, if they survived
    if game.tile(tile).is_city_center() {
        return;
    }

    let destroyable_features: Vec<(String, f32)> = game
        .tile(tile)
        .terrain_features
        .iter()
        .filter_map(|feature| game.ruleset.terrains.get(feature))
        .flat_map(|terrain| {
            terrain
                .get_matching_uniques(UniqueType::DestroyableByNukesChance)
                .map(|unique| (terrain.name.clone(), unique.float_param(0) / 100.0))
        })
        .collect();
    let terrain_has_destroyable_features = game
        .tile(tile)
        .all_terrain_names()
        .filter_map(|name| game.ruleset.terrains.get(name))
        .any(|terrain| terrain.has_unique(UniqueType::DestroyableByNukesChance));

    if terrain_has_destroyable_features {
        for (feature, chance) in destroyable_features {
            if !(chance > 0.0 && is_ground_zero) && rng.random::<f32>() >= chance {
                continue;
            }
            if let Some(tile) = game.tile_map.get_mut(tile) {
                tile.remove_terrain_feature(&feature, &game.ruleset);
            }
            apply_pillage_and_fallout(game, tile);
        }
    } else if is_ground_zero || rng.random::<f32>() < game.constants.nuke_fallout_probability {
        apply_pillage_and_fallout(game, tile);
    }
}

fn apply_pillage_and_fallout(game: &mut GameInfo, position: Vector2) {
    let improvement = game.tile(position).improvement.clone();
    let unpillaged_improvement = improvement.filter(|_| !game.tile(position).improvement_is_pillaged);
    if let Some(improvement) = unpillaged_improvement {
        let (irremovable, unpillagable) = game
            .ruleset
            .tile_improvements
            .get(&improvement)
            .map_or((false, false), |improvement| {
                (
                    improvement.has_unique(UniqueType::Irremovable),
                    improvement.has_unique(UniqueType::Unpillagable),
                )
            });
        if !irremovable {
            let tile = game.tile_mut(position);
            if unpillagable {
                tile.remove_improvement();
            } else {
                tile.set_pillaged();
            }
        }
    }

    let tile = game.tile_mut(position);
    if tile.has_road() && !tile.road_is_pillaged {
        tile.road_is_pillaged = true;
    }
    if tile.is_water || tile.is_impassable || tile.has_terrain_feature(constants::FALLOUT) {
        return;
    }
    if let Some(tile) = game.tile_map.get_mut(position) {
        tile.add_terrain_feature(constants::FALLOUT, &game.ruleset);
    }
}

/// Share of the population lost to a blast of `nuke_strength`, before shelters
fn population_loss_fraction<R: Rng + ?Sized>(rng: &mut R, nuke_strength: i32) -> f32 {
    match nuke_strength {
        ..=0 => 0.0,
        1 => (30 + rng.random_range(0..20) + rng.random_range(0..20)) as f32 / 100.0,
        2 => (60 + rng.random_range(0..10) + rng.random_range(0..10)) as f32 / 100.0,
        // Hypothetical level 3 always brings the city down to 1 pop
        _ => 1.0,
    }
}

fn do_nuke_explosion_damage_to_city<R: Rng + ?Sized>(
    game: &mut GameInfo,
    rng: &mut R,
    city_id: CityId,
    nuke_strength: i32,
    damage_modifier_from_missing_resource: f32,
) {
    // Original capitals are protected by can_be_destroyed; other capitals suffer normally
    let city = game.city(city_id);
    if (nuke_strength > 2 || (nuke_strength > 1 && city.population < 5)) && city.can_be_destroyed(true) {
        info!("{} is wiped out by the blast", city.name);
        game.destroy_city(city_id);
        return;
    }

    let city_combatant = CityCombatant::new(city_id);
    let damage = (city_combatant.get_health(game) as f32 * 0.5 * damage_modifier_from_missing_resource) as i32;
    city_combatant.take_damage(game, damage);

    // Rounded down twice, before and after shelters
    let population = game.city(city_id).population;
    let raw_population_loss = (population as f32 * population_loss_fraction(rng, nuke_strength)) as i32;
    let shelter_modifier = game.city_aggregate_modifier(city_id, UniqueType::PopulationLossFromNukes);
    let population_loss = (raw_population_loss as f32 * shelter_modifier) as i32;
    game.city_mut(city_id).add_population(-population_loss);
}
