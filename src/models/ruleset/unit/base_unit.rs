use serde::{Deserialize, Serialize};
use unciv_core::constants;
use unciv_core::unique::{Unique, UniqueType};

/// Which kind of map terrain a unit moves across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitDomain {
    Land,
    Water,
    Air,
}

/// This is the type of unit, as defined by the ruleset.
/// Individual units on the map are [crate::map::mapunit::MapUnit]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUnit {
    pub name: String,
    /// "Melee", "Archery", "Siege", "Fighter", "Missile"...
    pub unit_type: String,
    pub domain: UnitDomain,
    #[serde(default)]
    pub strength: i32,
    #[serde(default)]
    pub ranged_strength: i32,
    #[serde(default)]
    pub range: i32,
    pub movement: i32,
    /// Interception reach for units with an intercept chance; air units use their range
    #[serde(default)]
    pub intercept_range: i32,
    #[serde(default)]
    pub required_resource: Option<String>,
    #[serde(default)]
    pub great_person_type: Option<String>,
    #[serde(default)]
    pub uniques: Vec<Unique>,
}

impl BaseUnit {
    pub fn new(name: &str, unit_type: &str, domain: UnitDomain, strength: i32, movement: i32) -> Self {
        Self {
            name: name.to_string(),
            unit_type: unit_type.to_string(),
            domain,
            strength,
            ranged_strength: 0,
            range: 0,
            movement,
            intercept_range: 0,
            required_resource: None,
            great_person_type: None,
            uniques: Vec::new(),
        }
    }

    pub fn with_ranged(mut self, ranged_strength: i32, range: i32) -> Self {
        self.ranged_strength = ranged_strength;
        self.range = range;
        self
    }

    pub fn with_unique(mut self, unique: Unique) -> Self {
        self.uniques.push(unique.with_source(&self.name));
        self
    }

    pub fn with_required_resource(mut self, resource: &str) -> Self {
        self.required_resource = Some(resource.to_string());
        self
    }

    pub fn with_great_person_type(mut self, great_person_type: &str) -> Self {
        self.great_person_type = Some(great_person_type.to_string());
        self
    }

    pub fn with_intercept_range(mut self, intercept_range: i32) -> Self {
        self.intercept_range = intercept_range;
        self
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged_strength > 0
    }

    pub fn is_melee(&self) -> bool {
        !self.is_ranged() && self.strength > 0
    }

    /// Nuclear weapons carry no strength but are never civilians
    pub fn is_military(&self) -> bool {
        self.is_ranged() || self.is_melee() || self.is_nuclear_weapon()
    }

    pub fn is_civilian(&self) -> bool {
        !self.is_military()
    }

    pub fn is_land_unit(&self) -> bool {
        self.domain == UnitDomain::Land
    }

    pub fn is_water_unit(&self) -> bool {
        self.domain == UnitDomain::Water
    }

    pub fn is_air_unit(&self) -> bool {
        self.domain == UnitDomain::Air
    }

    pub fn moves_like_air_units(&self) -> bool {
        self.is_air_unit()
    }

    pub fn is_great_person(&self) -> bool {
        self.great_person_type.is_some()
    }

    pub fn is_nuclear_weapon(&self) -> bool {
        self.has_unique(UniqueType::NuclearWeapon)
    }

    pub fn has_unique(&self, unique_type: UniqueType) -> bool {
        self.uniques.iter().any(|unique| unique.unique_type == unique_type)
    }

    /// Implements the unit-type part of a mapUnitFilter
    pub fn matches_filter(&self, filter: &str) -> bool {
        match filter {
            constants::ALL | "all" => true,
            constants::MILITARY | "military units" => self.is_military(),
            constants::CIVILIAN | "civilians" => self.is_civilian(),
            "Melee" => self.is_melee(),
            "Ranged" => self.is_ranged(),
            constants::LAND | "Land units" => self.is_land_unit(),
            constants::WATER | "Water units" => self.is_water_unit(),
            "Air" | "Air units" => self.is_air_unit(),
            "Nuclear Weapon" => self.is_nuclear_weapon(),
            "Great Person" => self.is_great_person(),
            _ => filter == self.name || filter == self.unit_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_kind_follows_strengths() {
        let warrior = BaseUnit::new("Warrior", "Melee", UnitDomain::Land, 8, 2);
        assert!(warrior.is_melee() && warrior.is_military());
        let archer = BaseUnit::new("Archer", "Archery", UnitDomain::Land, 5, 2).with_ranged(7, 2);
        assert!(archer.is_ranged() && !archer.is_melee());
        let worker = BaseUnit::new("Worker", "Civilian", UnitDomain::Land, 0, 2);
        assert!(worker.is_civilian());
    }

    #[test]
    fn filters_match_names_types_and_categories() {
        let trireme = BaseUnit::new("Trireme", "Melee Water", UnitDomain::Water, 10, 4);
        assert!(trireme.matches_filter("Trireme"));
        assert!(trireme.matches_filter("Melee Water"));
        assert!(trireme.matches_filter("Water"));
        assert!(trireme.matches_filter("Military"));
        assert!(!trireme.matches_filter("Land"));
        assert!(!trireme.matches_filter("Civilian"));
    }
}
