use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unciv_core::CivId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiplomaticStatus {
    Peace,
    War,
    DefensivePact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiplomacyFlags {
    DeclaredWar,
    RecentlyAttacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiplomaticModifiers {
    // Negative
    DeclaredWarOnUs,
    UsedNuclearWeapons,
    CapturedOurCities,

    // Positive
    ReturnedCapturedUnits,
}

impl DiplomaticModifiers {
    pub fn text(&self) -> &'static str {
        match self {
            Self::DeclaredWarOnUs => "You declared war on us!",
            Self::UsedNuclearWeapons => "Your use of nuclear weapons is disgusting!",
            Self::CapturedOurCities => "You have captured our cities!",
            Self::ReturnedCapturedUnits => "You returned captured units to us",
        }
    }
}

/// One civ's side of its relationship with another civ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiplomacyManager {
    pub other_civ: CivId,
    pub diplomatic_status: DiplomaticStatus,
    /// Turns left on a signed peace treaty; while positive neither side may attack
    pub turns_to_peace_treaty: i32,
    pub flags_countdown: HashMap<DiplomacyFlags, i32>,
    /// Opinion modifiers, positive is friendly
    pub diplomatic_modifiers: HashMap<DiplomaticModifiers, f32>,
}

impl DiplomacyManager {
    pub fn new(other_civ: CivId) -> Self {
        Self {
            other_civ,
            diplomatic_status: DiplomaticStatus::Peace,
            turns_to_peace_treaty: 0,
            flags_countdown: HashMap::new(),
            diplomatic_modifiers: HashMap::new(),
        }
    }

    pub fn is_at_war(&self) -> bool {
        self.diplomatic_status == DiplomaticStatus::War
    }

    pub fn can_declare_war(&self) -> bool {
        self.turns_to_peace_treaty == 0 && self.diplomatic_status != DiplomaticStatus::War
    }

    /// Whether an attack is allowed at all, possibly after declaring war
    pub fn can_attack(&self) -> bool {
        self.turns_to_peace_treaty == 0
    }

    pub fn set_flag(&mut self, flag: DiplomacyFlags, amount: i32) {
        self.flags_countdown.insert(flag, amount);
    }

    pub fn add_modifier(&mut self, modifier: DiplomaticModifiers, amount: f32) {
        let current = self.get_modifier(modifier) + amount;
        if current == 0.0 {
            self.diplomatic_modifiers.remove(&modifier);
        } else {
            self.diplomatic_modifiers.insert(modifier, current);
        }
    }

    pub fn set_modifier(&mut self, modifier: DiplomaticModifiers, amount: f32) {
        self.diplomatic_modifiers.insert(modifier, amount);
    }

    pub fn get_modifier(&self, modifier: DiplomaticModifiers) -> f32 {
        self.diplomatic_modifiers.get(&modifier).copied().unwrap_or(0.0)
    }

    pub fn has_modifier(&self, modifier: DiplomaticModifiers) -> bool {
        self.diplomatic_modifiers.contains_key(&modifier)
    }

    /// Sum of all modifiers
    pub fn opinion_of_other_civ(&self) -> f32 {
        self.diplomatic_modifiers.values().sum()
    }
}
