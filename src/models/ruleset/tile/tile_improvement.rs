use serde::{Deserialize, Serialize};
use unciv_core::unique::{Unique, UniqueType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileImprovement {
    pub name: String,
    #[serde(default)]
    pub uniques: Vec<Unique>,
}

impl TileImprovement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            uniques: Vec::new(),
        }
    }

    pub fn with_unique(mut self, unique: Unique) -> Self {
        self.uniques.push(unique.with_source(&self.name));
        self
    }

    pub fn has_unique(&self, unique_type: UniqueType) -> bool {
        self.uniques.iter().any(|unique| unique.unique_type == unique_type)
    }
}
