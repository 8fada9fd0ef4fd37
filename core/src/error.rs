use thiserror::Error;

use crate::unique::UniqueType;
use crate::vector2::Vector2;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up or loading game data.
///
/// Combat itself never returns these: an illegal attack is a programmer error
/// and an absent unique or interceptor is a normal outcome.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown unit type: {0}")]
    UnknownUnit(String),

    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    #[error("No tile at {0}")]
    NoTileAt(Vector2),

    #[error("Tile {0} has no room for a {1}")]
    TileOccupied(Vector2, String),

    #[error("Parameter {index} of unique {unique_type:?} is not a number: '{value}'")]
    InvalidUniqueParameter {
        unique_type: UniqueType,
        index: usize,
        value: String,
    },

    #[error("Could not parse constants: {0}")]
    InvalidConstants(#[from] serde_json::Error),
}
