mod combat_abilities;
mod map_unit;
pub mod movement;

pub use map_unit::{MapUnit, UnitAction, UnitPromotions};
