pub mod constants;
pub mod counter;
pub mod difficulty;
pub mod error;
pub mod ids;
pub mod mod_constants;
pub mod unique;
pub mod vector2;

pub use counter::Counter;
pub use error::{Error, Result};
pub use ids::{CityId, CivId, CombatantId, UnitId};
pub use vector2::Vector2;
