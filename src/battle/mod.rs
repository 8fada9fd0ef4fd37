//! Combat between units and cities: damage, interception, capture and nuclear strikes.

pub mod air_interception;
pub mod attackable_tile;
pub mod battle;
pub mod battle_constants;
pub mod battle_damage;
pub mod battle_unit_capture;
pub mod city_combatant;
pub mod combatant;
pub mod great_general_implementation;
pub mod i_combatant;
pub mod map_unit_combatant;
pub mod nuke;
pub mod random;
pub mod target_helper;

pub use attackable_tile::AttackableTile;
pub use battle::DamageDealt;
pub use city_combatant::CityCombatant;
pub use combatant::Combatant;
pub use i_combatant::{CombatantKind, ICombatant};
pub use map_unit_combatant::MapUnitCombatant;
