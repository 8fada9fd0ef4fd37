//! Which tiles a unit, or a city, can attack this turn.

use std::collections::HashSet;

use unciv_core::constants::MINIMUM_MOVEMENT_EPSILON;
use unciv_core::unique::{CombatAction, StateForConditionals, UniqueType};
use unciv_core::{CityId, UnitId, Vector2};

use crate::battle::attackable_tile::AttackableTile;
use crate::battle::battle::get_map_combatant_of_tile;
use crate::battle::city_combatant::CityCombatant;
use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::game_info::GameInfo;
use crate::map::mapunit::movement::PathsToTilesWithinTurn;

/// Range of a city's bombardment
pub const CITY_BOMBARD_RANGE: i32 = 2;

/// Gets the tiles `unit_id` can attack, with the tile it would attack from.
///
/// `tiles_to_check` replaces the civ's viewable tiles when given, e.g. for AI lookahead.
/// With `stay_on_tile` the unit only considers attacking from where it stands.
pub fn get_attackable_enemies(
    game: &GameInfo,
    unit_id: UnitId,
    unit_distance_to_tiles: &PathsToTilesWithinTurn,
    tiles_to_check: Option<&HashSet<Vector2>>,
    stay_on_tile: bool,
) -> Vec<AttackableTile> {
    let unit = game.unit(unit_id);
    let base_unit = unit.base_unit(&game.ruleset);
    let range_of_attack = if base_unit.is_melee() { 1 } else { base_unit.range };
    let mut attackable_tiles = Vec::new();

    let unit_must_be_set_up = game.unit_has_unique(unit_id, UniqueType::MustSetUp);
    let tiles_to_attack_from = if stay_on_tile || base_unit.moves_like_air_units() {
        vec![(unit.current_tile, unit.current_movement)]
    } else {
        get_tiles_to_attack_from_when_unit_moves(game, unit_id, unit_distance_to_tiles, unit_must_be_set_up)
    };

    let has_indirect_fire = !game
        .unit_matching_uniques_with_civ(unit_id, UniqueType::IndirectFire, &StateForConditionals::for_civ(unit.owner))
        .is_empty();

    let mut tiles_with_enemies: HashSet<Vector2> = HashSet::new();
    let mut tiles_without_enemies: HashSet<Vector2> = HashSet::new();

    for (reachable_tile, movement_left) in tiles_to_attack_from {
        let tiles_in_attack_range: Vec<Vector2> = if base_unit.is_melee() {
            game.tile_map.neighbors(reachable_tile)
        } else if base_unit.moves_like_air_units() || has_indirect_fire {
            game.tile_map.tiles_in_distance(reachable_tile, range_of_attack)
        } else {
            let mut viewable: Vec<Vector2> = game
                .tile_map
                .get_viewable_tiles(reachable_tile, range_of_attack)
                .into_iter()
                .collect();
            viewable.sort();
            viewable
        };

        for tile in tiles_in_attack_range {
            // Military units can technically enter tiles with enemy civilians,
            // attacking the tile they would stand on is silly
            if tile == reachable_tile {
                continue;
            }

            if tiles_with_enemies.contains(&tile) {
                attackable_tiles.push(AttackableTile::new(
                    reachable_tile,
                    tile,
                    movement_left,
                    get_map_combatant_of_tile(game, tile),
                ));
            } else if tiles_without_enemies.contains(&tile) {
                continue;
            } else if tile_contains_attackable_enemy(game, unit_id, tile, tiles_to_check) || unit.is_preparing_air_sweep() {
                tiles_with_enemies.insert(tile);
                attackable_tiles.push(AttackableTile::new(
                    reachable_tile,
                    tile,
                    movement_left,
                    get_map_combatant_of_tile(game, tile),
                ));
            } else {
                tiles_without_enemies.insert(tile);
            }
        }
    }

    attackable_tiles
}

fn get_tiles_to_attack_from_when_unit_moves(
    game: &GameInfo,
    unit_id: UnitId,
    unit_distance_to_tiles: &PathsToTilesWithinTurn,
    unit_must_be_set_up: bool,
) -> Vec<(Vector2, f32)> {
    let unit = game.unit(unit_id);
    let movement_points_to_expend_after_movement = if unit_must_be_set_up { 1.0 } else { 0.0 };
    let movement_points_to_expend_here = if unit_must_be_set_up && !unit.is_set_up_for_siege() {
        1.0
    } else {
        0.0
    };

    unit_distance_to_tiles
        .paths
        .iter()
        .map(|(tile, distance)| {
            let movement_points_to_expend_before_attack = if *tile == unit.current_tile {
                movement_points_to_expend_here
            } else {
                movement_points_to_expend_after_movement
            };
            let movement_left =
                unit.current_movement - distance.total_movement - movement_points_to_expend_before_attack;
            (*tile, movement_left)
        })
        // still got leftover movement points after all that, to attack
        .filter(|(_, movement_left)| *movement_left > MINIMUM_MOVEMENT_EPSILON)
        .filter(|(tile, _)| *tile == unit.current_tile || game.can_move_to(unit, *tile))
        .collect()
}

fn tile_contains_attackable_enemy(
    game: &GameInfo,
    unit_id: UnitId,
    tile: Vector2,
    tiles_to_check: Option<&HashSet<Vector2>>,
) -> bool {
    let unit = game.unit(unit_id);
    let viewable_tiles = tiles_to_check.unwrap_or(&game.civ(unit.owner).viewable_tiles);
    let combatant = Combatant::Unit(MapUnitCombatant::new(unit_id));
    if !viewable_tiles.contains(&tile) || !contains_attackable_enemy(game, tile, combatant) {
        return false;
    }

    // A melee unit can only "attack" a lone civilian by moving onto it
    let defends_alone_as_civilian = matches!(
        get_map_combatant_of_tile(game, tile),
        Some(Combatant::Unit(occupant)) if occupant.is_civilian(game)
    );
    !unit.base_unit(&game.ruleset).is_melee() || !defends_alone_as_civilian || game.can_pass_through(unit, tile)
}

/// Whether the occupant of `tile` is an enemy `combatant` may attack
pub fn contains_attackable_enemy(game: &GameInfo, tile: Vector2, combatant: Combatant) -> bool {
    if let Combatant::Unit(unit_combatant) = combatant {
        let unit = game.unit(unit_combatant.unit_id);
        if game.is_embarked(unit) && !game.unit_has_unique(unit_combatant.unit_id, UniqueType::AttackOnSea) {
            // Can't attack water units while embarked, only land
            if game.tile(tile).is_water || combatant.is_ranged(game) {
                return false;
            }
        }
    }

    let Some(tile_combatant) = get_map_combatant_of_tile(game, tile) else {
        return false;
    };
    let our_civ = combatant.get_civ_info(game);
    let their_civ = tile_combatant.get_civ_info(game);
    if our_civ == their_civ {
        return false;
    }

    // If the user automates units, one may capture the city before the user had a chance to decide
    // what to do with it, and then the next unit should not attack that city
    if let Combatant::City(city) = tile_combatant {
        if game.city(city.city_id).has_just_been_conquered {
            return false;
        }
    }

    if !game.is_at_war(our_civ, their_civ) {
        return false;
    }

    if let Combatant::Unit(unit_combatant) = combatant {
        let unit = game.unit(unit_combatant.unit_id);
        // Land melee units need to embark first
        if combatant.is_land_unit(game) && combatant.is_melee(game) && game.tile(tile).is_water && !game.is_embarked(unit) {
            return false;
        }

        let state = StateForConditionals::for_combat(
            our_civ,
            combatant.id(),
            Some(tile_combatant.id()),
            Some(tile),
            Some(CombatAction::Attack),
        );
        if !game
            .unit_matching_uniques(unit_combatant.unit_id, UniqueType::CannotAttack, &state)
            .is_empty()
        {
            return false;
        }
    }

    // Only units with the right visibility can see submarines (or other invisible units) from more than one
    // tile away. Garrisoned invisible units can be attacked by anyone, else the city would be invincible.
    if tile_combatant.is_invisible(game, our_civ) && !game.tile(tile).is_city_center() {
        return combatant.as_unit().is_some() && game.civ(our_civ).viewable_invisible_units_tiles.contains(&tile);
    }

    true
}

/// Get a list of visible tiles which have something attackable
pub fn get_bombardable_tiles(game: &GameInfo, city_id: CityId) -> Vec<Vector2> {
    let city = game.city(city_id);
    let combatant = Combatant::City(CityCombatant::new(city_id));
    game.tile_map
        .tiles_in_distance(city.location, CITY_BOMBARD_RANGE)
        .into_iter()
        .filter(|tile| {
            game.civ(city.civ).viewable_tiles.contains(tile) && contains_attackable_enemy(game, *tile, combatant)
        })
        .collect()
}
