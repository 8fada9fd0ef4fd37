use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::unique::UniqueType;

/// The combat role the holder of a unique is in when it is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    Defend,
    Intercept,
}

/// A `<...>` modifier attached to a unique.
///
/// Conditionals restrict when a unique applies; triggers make it fire once
/// when an event happens instead of applying continuously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conditional {
    /// "<vs [combatantFilter]>"
    VsCombatant(String),
    /// "<vs cities>"
    VsCity,
    /// "<when attacking>"
    WhenAttacking,
    /// "<when defending>"
    WhenDefending,
    /// "<when intercepting>"
    WhenIntercepting,
    /// "<when fighting in [tileFilter] tiles>"
    InTiles(String),
    /// Trigger: "<upon being defeated>"
    UponDefeat,
    /// Trigger: "<upon defeating a [mapUnitFilter] unit>"
    UponDefeatingUnit(String),
}

impl Conditional {
    pub fn is_trigger(&self) -> bool {
        matches!(self, Conditional::UponDefeat | Conditional::UponDefeatingUnit(_))
    }
}

/// One unique ability, as parsed from ruleset text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unique {
    pub unique_type: UniqueType,
    pub params: Vec<String>,
    #[serde(default)]
    pub conditionals: Vec<Conditional>,
    /// Name of the unit, promotion, building or nation that grants it
    #[serde(default)]
    pub source_object_name: String,
}

impl Unique {
    pub fn new(unique_type: UniqueType, params: &[&str]) -> Self {
        Self {
            unique_type,
            params: params.iter().map(|param| param.to_string()).collect(),
            conditionals: Vec::new(),
            source_object_name: String::new(),
        }
    }

    pub fn with_conditional(mut self, conditional: Conditional) -> Self {
        self.conditionals.push(conditional);
        self
    }

    pub fn with_source(mut self, source_object_name: &str) -> Self {
        self.source_object_name = source_object_name.to_string();
        self
    }

    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn try_int_param(&self, index: usize) -> Result<i32> {
        let value = self.param(index);
        value
            .trim_start_matches('+')
            .parse::<i32>()
            .map_err(|_| Error::InvalidUniqueParameter {
                unique_type: self.unique_type,
                index,
                value: value.to_string(),
            })
    }

    /// Numeric param; rulesets are validated upstream so a bad value only logs and counts as 0
    pub fn int_param(&self, index: usize) -> i32 {
        self.try_int_param(index).unwrap_or_else(|err| {
            warn!("{}", err);
            0
        })
    }

    pub fn float_param(&self, index: usize) -> f32 {
        self.int_param(index) as f32
    }

    pub fn is_triggerable(&self) -> bool {
        self.conditionals.iter().any(Conditional::is_trigger)
    }

    /// Label used for this unique in the modifier breakdown
    pub fn modifier_name(&self) -> String {
        if self.source_object_name.is_empty() {
            self.unique_type.to_string()
        } else {
            self.source_object_name.clone()
        }
    }
}
