pub mod ruleset;
pub mod tile;
pub mod unique;
pub mod unit;
pub mod vanilla;

pub use ruleset::Ruleset;
