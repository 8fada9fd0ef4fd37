pub const ALL: &str = "All";

pub const BARBARIAN_ENCAMPMENT: &str = "Barbarian encampment";
pub const FALLOUT: &str = "Fallout";

pub const LAND: &str = "Land";
pub const WATER: &str = "Water";

pub const MILITARY: &str = "Military";
pub const CIVILIAN: &str = "Civilian";
pub const CITY: &str = "City";

/// Great person type of the "true" war great people, e.g. the Great General
pub const WAR_GREAT_PERSON_TYPE: &str = "War";

pub const MINIMUM_MOVEMENT_EPSILON: f32 = 0.05;
