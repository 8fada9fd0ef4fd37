//! Effective strengths and damage of a fight.
//!
//! Modifiers are collected per side as named integer percentages and combined
//! multiplicatively: each bonus scales the strength the others already produced.

use unciv_core::unique::{CombatAction, StateForConditionals, Unique, UniqueType};
use unciv_core::{Counter, Vector2};

use crate::battle::combatant::Combatant;
use crate::battle::great_general_implementation;
use crate::battle::i_combatant::ICombatant;
use crate::battle::map_unit_combatant::MapUnitCombatant;
use crate::game_info::GameInfo;

fn get_state_for_conditionals(
    game: &GameInfo,
    combat_action: CombatAction,
    combatant: Combatant,
    enemy: Combatant,
) -> StateForConditionals {
    let attacked_tile = if combat_action == CombatAction::Attack {
        enemy.get_tile(game)
    } else {
        combatant.get_tile(game)
    };
    StateForConditionals::for_combat(
        combatant.get_civ_info(game),
        combatant.id(),
        Some(enemy.id()),
        Some(attacked_tile),
        Some(combat_action),
    )
}

fn add_unique_modifiers(modifiers: &mut Counter<String>, uniques: &[&Unique]) {
    for unique in uniques {
        modifiers.add(unique.modifier_name(), unique.int_param(0));
    }
}

/// Modifiers that apply to a combatant regardless of whether it attacks or defends
fn get_general_modifiers(
    game: &GameInfo,
    combatant: Combatant,
    enemy: Combatant,
    combat_action: CombatAction,
) -> Counter<String> {
    let mut modifiers = Counter::new();
    let conditional_state = get_state_for_conditionals(game, combat_action, combatant, enemy);
    let civ = combatant.get_civ_info(game);

    match combatant {
        Combatant::Unit(unit) => {
            add_unit_unique_modifiers(game, unit, enemy, &conditional_state, &mut modifiers);
            add_resource_lacking_malus(game, unit, &mut modifiers);

            let (great_general_name, great_general_bonus) =
                great_general_implementation::get_great_general_bonus(game, unit, enemy, combat_action);
            if great_general_bonus != 0 {
                modifiers.add(great_general_name, great_general_bonus);
            }
        }
        Combatant::City(city) => {
            let uniques = game.city_matching_uniques(city.city_id, UniqueType::StrengthForCities, &conditional_state);
            add_unique_modifiers(&mut modifiers, &uniques);
        }
    }

    if game.civ(enemy.get_civ_info(game)).is_barbarian {
        modifiers.add("Difficulty".to_string(), (game.difficulty.barbarian_bonus * 100.0) as i32);
    }

    // https://www.carlsguides.com/strategy/civilization5/war/combatbonuses.php
    let happiness = game.civ(civ).happiness;
    if happiness < 0 {
        let constants = &game.constants;
        modifiers.add(
            "Unhappiness".to_string(),
            (constants.unhappiness_penalty_per_point * happiness).max(-constants.max_unhappiness_penalty),
        );
    }

    modifiers
}

fn add_unit_unique_modifiers(
    game: &GameInfo,
    combatant: MapUnitCombatant,
    enemy: Combatant,
    conditional_state: &StateForConditionals,
    modifiers: &mut Counter<String>,
) {
    let unit_id = combatant.unit_id;
    let strength_uniques = game.unit_matching_uniques_with_civ(unit_id, UniqueType::Strength, conditional_state);
    add_unique_modifiers(modifiers, &strength_uniques);

    for unique in game.unit_matching_uniques_with_civ(unit_id, UniqueType::BonusVs, conditional_state) {
        if enemy.matches_filter(game, unique.param(0)) {
            modifiers.add(format!("vs [{}]", unique.param(0)), unique.int_param(1));
        }
    }
    for unique in game.unit_matching_uniques_with_civ(unit_id, UniqueType::PenaltyVs, conditional_state) {
        if enemy.matches_filter(game, unique.param(0)) {
            modifiers.add(format!("vs [{}]", unique.param(0)), -unique.int_param(1));
        }
    }
}

fn add_resource_lacking_malus(game: &GameInfo, combatant: MapUnitCombatant, modifiers: &mut Counter<String>) {
    let unit = game.unit(combatant.unit_id);
    let civ = game.civ(unit.owner);
    if civ.is_barbarian {
        return;
    }
    if let Some(resource) = &unit.base_unit(&game.ruleset).required_resource {
        if civ.get_resource_amount(resource) < 0 {
            modifiers.add("Missing resource".to_string(), game.constants.missing_resources_malus);
        }
    }
}

pub fn get_attack_modifiers(
    game: &GameInfo,
    attacker: Combatant,
    defender: Combatant,
    tile_to_attack_from: Vector2,
) -> Counter<String> {
    let mut modifiers = get_general_modifiers(game, attacker, defender, CombatAction::Attack);

    if let Combatant::Unit(unit_combatant) = attacker {
        add_terrain_attack_modifiers(game, unit_combatant, defender, &mut modifiers);

        // Air unit attacking with Air Sweep
        if game.unit(unit_combatant.unit_id).is_preparing_air_sweep() {
            modifiers.add_all(&get_air_sweep_attack_modifiers(game, attacker, defender));
        }

        if attacker.is_melee(game) {
            let number_of_other_attackers_surrounding_defender =
                count_flanking_allies(game, unit_combatant, defender, tile_to_attack_from);
            if number_of_other_attackers_surrounding_defender > 0 {
                let mut flanking_bonus = game.constants.base_flanking_bonus;

                // e.g., Discipline policy - https://civilization.fandom.com/wiki/Discipline_(Civ5)
                let state = get_state_for_conditionals(game, CombatAction::Attack, attacker, defender);
                for unique in game.unit_matching_uniques_with_civ(unit_combatant.unit_id, UniqueType::FlankAttackBonus, &state) {
                    flanking_bonus *= 1.0 + unique.float_param(0) / 100.0;
                }
                modifiers.add(
                    "Flanking".to_string(),
                    (flanking_bonus * number_of_other_attackers_surrounding_defender as f32) as i32,
                );
            }
        }
    }

    modifiers
}

/// Allied melee units next to the defender, besides the attacker itself
fn count_flanking_allies(
    game: &GameInfo,
    attacker: MapUnitCombatant,
    defender: Combatant,
    tile_to_attack_from: Vector2,
) -> usize {
    let owner = game.unit(attacker.unit_id).owner;
    game.tile_map
        .neighbors(defender.get_tile(game))
        .into_iter()
        .filter(|neighbor| *neighbor != tile_to_attack_from)
        .filter_map(|neighbor| game.tile(neighbor).military_unit)
        .filter(|unit_id| *unit_id != attacker.unit_id)
        .filter(|unit_id| {
            game.unit(*unit_id).owner == owner && MapUnitCombatant::new(*unit_id).is_melee(game)
        })
        .count()
}

fn add_terrain_attack_modifiers(
    game: &GameInfo,
    attacker: MapUnitCombatant,
    defender: Combatant,
    modifiers: &mut Counter<String>,
) {
    let unit = game.unit(attacker.unit_id);
    let defender_tile = game.tile(defender.get_tile(game));
    let landing_malus = game.constants.landing_malus;

    if game.is_embarked(unit) && defender_tile.is_land() {
        modifiers.add("Landing".to_string(), landing_malus);
    } else if !attacker.is_air_unit(game)
        && attacker.is_melee(game)
        && game.tile(unit.current_tile).is_water
        && defender_tile.is_land()
        && !defender.is_city()
    {
        // Melee Unit on water attacking to Land (not City) unit
        modifiers.add("Landing".to_string(), landing_malus);
    }
}

pub fn get_air_sweep_attack_modifiers(game: &GameInfo, attacker: Combatant, defender: Combatant) -> Counter<String> {
    let mut modifiers = Counter::new();
    if let Combatant::Unit(unit) = attacker {
        let state = get_state_for_conditionals(game, CombatAction::Attack, attacker, defender);
        let uniques = game.unit_matching_uniques(unit.unit_id, UniqueType::StrengthWhenAirsweep, &state);
        add_unique_modifiers(&mut modifiers, &uniques);
    }
    modifiers
}

pub fn get_defence_modifiers(game: &GameInfo, attacker: Combatant, defender: Combatant) -> Counter<String> {
    let mut modifiers = get_general_modifiers(game, defender, attacker, CombatAction::Defend);

    if let Combatant::Unit(unit_combatant) = defender {
        let unit = game.unit(unit_combatant.unit_id);
        // Embarked units get no terrain defensive bonuses
        if !game.is_embarked(unit) {
            let tile_defence_bonus = game.tile(unit.current_tile).defence_bonus;
            let unit_id = unit_combatant.unit_id;
            if (tile_defence_bonus > 0.0 && !game.unit_has_unique(unit_id, UniqueType::NoDefensiveTerrainBonus))
                || (tile_defence_bonus < 0.0 && !game.unit_has_unique(unit_id, UniqueType::NoDefensiveTerrainPenalty))
            {
                modifiers.add("Tile".to_string(), (tile_defence_bonus * 100.0).round() as i32);
            }

            let fortification_turns = unit.get_fortification_turns();
            if fortification_turns > 0 {
                modifiers.add(
                    "Fortification".to_string(),
                    game.constants.fortification_bonus_per_turn * fortification_turns,
                );
            }
        }
    }

    modifiers
}

/// `Π(1 + modifier/100)` over all modifiers
pub fn modifiers_to_final_bonus(modifiers: &Counter<String>) -> f32 {
    modifiers
        .values()
        .fold(1.0, |final_modifier, value| final_modifier * (1.0 + value as f32 / 100.0))
}

/// Wounded units deal proportionally less damage; cities always fight at full power
pub fn get_health_dependant_damage_ratio(game: &GameInfo, combatant: Combatant) -> f32 {
    match combatant {
        Combatant::City(_) => 1.0,
        Combatant::Unit(unit) => {
            if game.unit_has_unique(unit.unit_id, UniqueType::NoDamagePenaltyWoundedUnits) {
                1.0
            } else {
                0.5 + combatant.get_health(game) as f32 / 200.0
            }
        }
    }
}

pub fn get_attacking_strength(
    game: &GameInfo,
    attacker: Combatant,
    defender: Combatant,
    tile_to_attack_from: Vector2,
) -> f32 {
    let attack_modifier = modifiers_to_final_bonus(&get_attack_modifiers(game, attacker, defender, tile_to_attack_from));
    f32::max(1.0, attacker.get_attacking_strength(game) as f32 * attack_modifier)
}

pub fn get_defending_strength(game: &GameInfo, attacker: Combatant, defender: Combatant) -> f32 {
    let defence_modifier = modifiers_to_final_bonus(&get_defence_modifiers(game, attacker, defender));
    f32::max(
        1.0,
        defender.get_defending_strength(game, attacker.is_ranged(game)) as f32 * defence_modifier,
    )
}

/// Retaliation damage. Ranged attackers other than aircraft take none, and civilians never strike back.
pub fn calculate_damage_to_attacker(
    game: &GameInfo,
    attacker: Combatant,
    defender: Combatant,
    tile_to_attack_from: Vector2,
) -> i32 {
    if attacker.is_ranged(game) && !attacker.is_air_unit(game) {
        return 0;
    }
    if defender.is_civilian(game) {
        return 0;
    }
    let defence_to_attack_ratio = get_defending_strength(game, attacker, defender)
        / get_attacking_strength(game, attacker, defender, tile_to_attack_from);
    (game.constants.base_damage * defence_to_attack_ratio * get_health_dependant_damage_ratio(game, defender)).round()
        as i32
}

pub fn calculate_damage_to_defender(
    game: &GameInfo,
    attacker: Combatant,
    defender: Combatant,
    tile_to_attack_from: Vector2,
) -> i32 {
    let attack_to_defence_ratio = get_attacking_strength(game, attacker, defender, tile_to_attack_from)
        / get_defending_strength(game, attacker, defender);
    (game.constants.base_damage * attack_to_defence_ratio * get_health_dependant_damage_ratio(game, attacker)).round()
        as i32
}
