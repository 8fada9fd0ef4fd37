use serde::{Deserialize, Serialize};
use unciv_core::unique::Unique;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub name: String,
    #[serde(default)]
    pub uniques: Vec<Unique>,
}

impl Promotion {
    pub fn new(name: &str, uniques: Vec<Unique>) -> Self {
        Self {
            name: name.to_string(),
            uniques: uniques.into_iter().map(|unique| unique.with_source(name)).collect(),
        }
    }
}
