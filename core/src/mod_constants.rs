use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Used as a member of ModOptions for moddable "constants" - factors in combat formulae and such.
///
/// Merging happens on a very simple basis: any field a mod leaves out keeps its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModConstants {
    // Max amount of experience that can be gained from combat with barbarians
    pub max_xp_from_barbarians: i32,

    // Formula for city Strength:
    // Strength = (baseStrength + ((%techs * multiplier) ^ exponent) * fullMultiplier) * (1 + perPop * population)
    // where %techs is the percentage of techs in the tech tree that are complete
    // If no techs exist in this ruleset, %techs = 0.5 (=50%)
    pub city_strength_base: f32,
    pub city_strength_from_techs_multiplier: f32,
    pub city_strength_from_techs_exponent: f32,
    pub city_strength_from_techs_full_multiplier: f32,
    pub city_strength_per_pop: f32,
    pub city_base_health: i32,

    // Flat defending strength of an embarked military unit
    pub embarked_unit_defence: i32,

    // Base damage of an even fight, before the strength ratio and wounds are applied
    pub base_damage: f32,

    // Percentages, see https://www.carlsguides.com/strategy/civilization5/war/combatbonuses.php
    pub base_flanking_bonus: f32,
    pub fortification_bonus_per_turn: i32,
    pub unhappiness_penalty_per_point: i32,
    pub max_unhappiness_penalty: i32,
    pub missing_resources_malus: i32,
    pub landing_malus: i32,

    // Prize ships: chance = min(max, base + factor * attack / defence)
    pub capture_chance_base: f32,
    pub capture_chance_strength_factor: f32,
    pub capture_chance_max: f32,
    pub captured_unit_health: i32,

    // Civ5: NUKE_NON_COMBAT_DEATH_THRESHOLD = 60, expressed as remaining health
    pub nuke_civilian_death_threshold: i32,
    // Civ5: NUKE_FALLOUT_PROB
    pub nuke_fallout_probability: f32,
    pub used_nuclear_weapons_modifier: f32,

    pub xp_melee_attacker: i32,
    pub xp_melee_defender: i32,
    pub xp_ranged: i32,
    pub xp_air_sweep: i32,
    pub xp_interception: i32,
}

impl Default for ModConstants {
    fn default() -> Self {
        Self {
            max_xp_from_barbarians: 30,

            city_strength_base: 10.0,
            city_strength_from_techs_multiplier: 5.0,
            city_strength_from_techs_exponent: 2.0,
            city_strength_from_techs_full_multiplier: 5.0,
            city_strength_per_pop: 0.1,
            city_base_health: 200,

            embarked_unit_defence: 5,

            base_damage: 30.0,

            base_flanking_bonus: 10.0,
            fortification_bonus_per_turn: 20,
            unhappiness_penalty_per_point: 2,
            max_unhappiness_penalty: 90,
            missing_resources_malus: -25,
            landing_malus: -50,

            capture_chance_base: 0.1,
            capture_chance_strength_factor: 0.4,
            capture_chance_max: 0.8,
            captured_unit_health: 50,

            nuke_civilian_death_threshold: 40,
            nuke_fallout_probability: 0.5,
            used_nuclear_weapons_modifier: -50.0,

            xp_melee_attacker: 5,
            xp_melee_defender: 4,
            xp_ranged: 2,
            xp_air_sweep: 5,
            xp_interception: 2,
        }
    }
}

impl ModConstants {
    /// Reads constants from a mod's json, falling back to defaults per missing field
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
