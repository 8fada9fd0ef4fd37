use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type UnitId = Uuid;
pub type CityId = Uuid;

/// Index of a civilization in `GameInfo::civilizations`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivId(pub usize);

impl fmt::Display for CivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "civ#{}", self.0)
    }
}

/// Anything that can be on either side of a battle: a map unit or a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatantId {
    Unit(UnitId),
    City(CityId),
}
