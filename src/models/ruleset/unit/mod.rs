mod base_unit;
mod promotion;

pub use base_unit::{BaseUnit, UnitDomain};
pub use promotion::Promotion;
