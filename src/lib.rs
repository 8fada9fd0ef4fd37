//! Combat resolution for a turn-based 4X strategy game: damage, retaliation,
//! interception, air sweeps, captures and nuclear strikes, over an in-memory world.

pub mod battle;
pub mod city;
pub mod civilization;
pub mod game_info;
pub mod map;
pub mod models;

pub use game_info::GameInfo;
