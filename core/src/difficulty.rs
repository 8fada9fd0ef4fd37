use serde::{Deserialize, Serialize};

/// The parts of a difficulty level that affect combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub name: String,
    /// Bonus vs barbarians, e.g. 0.25 for +25%
    pub barbarian_bonus: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            name: "Prince".to_string(),
            barbarian_bonus: 0.33,
        }
    }
}
