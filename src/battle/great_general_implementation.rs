use std::collections::HashMap;

use unciv_core::unique::{CombatAction, StateForConditionals, Unique, UniqueType};
use unciv_core::{constants, UnitId, Vector2};

use crate::battle::combatant::Combatant;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::battle::target_helper;
use crate::game_info::GameInfo;
use crate::map::mapunit::movement::PathsToTilesWithinTurn;

#[derive(Debug, Clone)]
struct GeneralBonusData {
    general: UnitId,
    radius: i32,
    filter: String,
    bonus: i32,
}

impl GeneralBonusData {
    fn new(general: UnitId, unique: &Unique) -> Self {
        Self {
            general,
            radius: unique.int_param(2),
            filter: unique.param(1).to_string(),
            bonus: unique.int_param(0),
        }
    }

    fn applies_to(&self, game: &GameInfo, unit_id: UnitId, distance: i32) -> bool {
        // "Military" is by far the most common filter
        distance <= self.radius
            && (self.filter == constants::MILITARY || game.unit_matches_filter(unit_id, &self.filter))
    }
}

/// Determine the "Great General" bonus for a unit by searching for units carrying the
/// [UniqueType::StrengthBonusInRadius] unique in the vicinity.
///
/// Returns the name of the best contributing unit and its bonus in percent (typically 15),
/// or 0 if nothing applies. Bonuses from several generals never stack.
pub fn get_great_general_bonus(
    game: &GameInfo,
    our_unit_combatant: MapUnitCombatant,
    enemy: Combatant,
    combat_action: CombatAction,
) -> (String, i32) {
    let unit_id = our_unit_combatant.unit_id;
    let unit = game.unit(unit_id);
    let state = StateForConditionals::for_combat(
        unit.owner,
        our_unit_combatant.id(),
        Some(enemy.id()),
        None,
        Some(combat_action),
    );

    let best = game
        .civ(unit.owner)
        .units
        .iter()
        .flat_map(|general| {
            game.unit_matching_uniques(*general, UniqueType::StrengthBonusInRadius, &state)
                .into_iter()
                .map(|unique| GeneralBonusData::new(*general, unique))
        })
        // Support the border case when a mod unit has several auras
        // (e.g. +50% at radius 1, +25% at radius 2, +5% at radius 3)
        .filter(|data| {
            let distance = game.unit(data.general).current_tile.aerial_distance_to(unit.current_tile);
            data.applies_to(game, unit_id, distance)
        })
        .max_by_key(|data| data.bonus);

    let Some(best) = best else {
        return (String::new(), 0);
    };

    let general = game.unit(best.general);
    let doubled = !game
        .unit_matching_uniques_with_civ(unit_id, UniqueType::GreatGeneralProvidesDoubleCombatBonus, &state)
        .is_empty()
        && general.base_unit(&game.ruleset).great_person_type.as_deref() == Some(constants::WAR_GREAT_PERSON_TYPE);

    let bonus = if doubled { best.bonus * 2 } else { best.bonus };
    (general.name.clone(), bonus)
}

/// Find a tile for accompanying a military unit where the total bonus for all affected units is maximized.
///
/// Candidates are tiles reachable this turn that hold a friendly military unit not faster than
/// the general, and no other civilian. Units that have enemies to attack right now don't count
/// towards the total.
pub fn find_tile_for_great_general(
    game: &GameInfo,
    general_id: UnitId,
    distance_to_tiles: &PathsToTilesWithinTurn,
) -> Option<Vector2> {
    let general = game.unit(general_id);
    let state = StateForConditionals {
        civ: Some(general.owner),
        unit: Some(general_id),
        ..StateForConditionals::default()
    };

    // Best bonus first, so the first matching aura is the one that would apply
    let mut general_bonus_data: Vec<GeneralBonusData> = game
        .unit_matching_uniques(general_id, UniqueType::StrengthBonusInRadius, &state)
        .into_iter()
        .map(|unique| GeneralBonusData::new(general_id, unique))
        .collect();
    general_bonus_data.sort_by(|a, b| b.bonus.cmp(&a.bonus).then(a.radius.cmp(&b.radius)));
    let unit_bonus_radius = general_bonus_data.iter().map(|data| data.radius).max()?;

    let general_movement = general.base_unit(&game.ruleset).movement;
    let candidate_tiles: Vec<Vector2> = distance_to_tiles
        .tiles()
        .filter(|position| {
            let tile = game.tile(*position);
            let Some(military) = tile.military_unit else {
                return false;
            };
            game.unit(military).owner == general.owner
                && (tile.civilian_unit.is_none() || tile.civilian_unit == Some(general_id))
                && game.base_unit(military).movement <= general_movement
                && !tile.is_city_center()
        })
        .collect();

    let mut has_attackable_enemies: HashMap<UnitId, bool> = HashMap::new();
    let mut best: Option<(Vector2, i32)> = None;

    for candidate in candidate_tiles {
        let mut total_bonus = 0;
        for affected_tile in game.tile_map.tiles_in_distance(candidate, unit_bonus_radius) {
            let Some(military) = game.tile(affected_tile).military_unit else {
                continue;
            };
            let military_unit = game.unit(military);
            if military_unit.owner != general.owner || game.is_embarked(military_unit) {
                continue;
            }
            let busy = *has_attackable_enemies.entry(military).or_insert_with(|| {
                let distance_to_tiles = game.get_distance_to_tiles(military);
                !target_helper::get_attackable_enemies(game, military, &distance_to_tiles, None, false).is_empty()
            });
            if busy {
                continue;
            }
            let distance = affected_tile.aerial_distance_to(candidate);
            total_bonus += general_bonus_data
                .iter()
                .find(|data| data.applies_to(game, military, distance))
                .map_or(0, |data| data.bonus);
        }
        if best.map_or(true, |(_, best_bonus)| best_bonus < total_bonus) {
            best = Some((candidate, total_bonus));
        }
    }

    best.map(|(position, _)| position)
}
