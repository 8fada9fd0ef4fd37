//! Battle rules that mods cannot change; moddable factors live in `ModConstants`.
//!
//! Based on https://www.carlsguides.com/strategy/civilization5/war/combatbonuses.php

/// Blast radius of nuclear weapons without an explicit radius
pub const DEFAULT_NUKE_BLAST_RADIUS: i32 = 2;

/// Damage to units at ground zero, and everywhere in the blast of a strength 2+ nuke
pub const NUKE_FULL_DAMAGE: i32 = 100;

/// A city brought to 1 health by barbarians is set back to this
pub const BARBARIAN_RAIDED_CITY_HEALTH: i32 = 2;

/// Most gold barbarians take from raiding a city
pub const MAX_BARBARIAN_RANSOM: i32 = 200;

/// Missing strategic resources halve the power of a nuke
pub const NUKE_MISSING_RESOURCE_FACTOR: f32 = 0.5;
