use serde::{Deserialize, Serialize};
use unciv_core::{CivId, UnitId, Vector2};

use crate::models::ruleset::unit::BaseUnit;
use crate::models::ruleset::Ruleset;

/// Standing orders of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitAction {
    Fortify,
    Sleep,
    Guard,
    /// Siege units preparing to fire
    SetUp,
    /// Air units waiting for an air sweep target
    AirSweep,
    Explore,
    MoveTo(Vector2),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitPromotions {
    pub xp: i32,
    /// All xp ever earned, including xp already spent on promotions
    pub total_xp_produced: i32,
    pub promotions: Vec<String>,
}

impl UnitPromotions {
    pub fn add_xp(&mut self, xp: i32) {
        self.xp += xp;
        self.total_xp_produced += xp;
    }
}

/// The mutable game state of an individual unit present on the map.
/// Its ruleset definition is the [BaseUnit] named by `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapUnit {
    pub id: UnitId,
    pub name: String,
    pub owner: CivId,
    /// Civ that created the unit; kept through captures
    pub original_owner: CivId,
    pub current_tile: Vector2,
    pub health: i32,
    pub current_movement: f32,
    pub action: Option<UnitAction>,
    pub turns_fortified: i32,
    pub attacks_this_turn: i32,
    pub attacks_since_turn_start: Vec<Vector2>,
    pub promotions: UnitPromotions,
    /// Destroyed units keep their record so callers holding the id can still inspect it
    pub is_destroyed: bool,
}

impl MapUnit {
    pub fn new(id: UnitId, base_unit: &BaseUnit, owner: CivId, position: Vector2) -> Self {
        Self {
            id,
            name: base_unit.name.clone(),
            owner,
            original_owner: owner,
            current_tile: position,
            health: 100,
            current_movement: base_unit.movement as f32,
            action: None,
            turns_fortified: 0,
            attacks_this_turn: 0,
            attacks_since_turn_start: Vec::new(),
            promotions: UnitPromotions::default(),
            is_destroyed: false,
        }
    }

    pub fn base_unit<'a>(&self, ruleset: &'a Ruleset) -> &'a BaseUnit {
        ruleset
            .get_unit(&self.name)
            .unwrap_or_else(|| panic!("Unit {} has no definition in the ruleset", self.name))
    }

    pub fn is_fortified(&self) -> bool {
        self.action == Some(UnitAction::Fortify)
    }

    pub fn is_sleeping(&self) -> bool {
        self.action == Some(UnitAction::Sleep)
    }

    pub fn is_guarding(&self) -> bool {
        self.action == Some(UnitAction::Guard)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.action, Some(UnitAction::MoveTo(_)))
    }

    pub fn is_set_up_for_siege(&self) -> bool {
        self.action == Some(UnitAction::SetUp)
    }

    pub fn is_preparing_air_sweep(&self) -> bool {
        self.action == Some(UnitAction::AirSweep)
    }

    /// Fortification only counts while the unit is actually fortified or guarding
    pub fn get_fortification_turns(&self) -> i32 {
        if self.is_fortified() || self.is_guarding() {
            self.turns_fortified
        } else {
            0
        }
    }

    pub fn has_movement(&self) -> bool {
        self.current_movement > 0.0
    }

    pub fn use_movement_points(&mut self, amount: f32) {
        self.current_movement = (self.current_movement - amount).max(0.0);
    }

    pub fn heal_by(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, 100);
    }

    pub fn has_promotion(&self, promotion: &str) -> bool {
        self.promotions.promotions.iter().any(|name| name == promotion)
    }
}
