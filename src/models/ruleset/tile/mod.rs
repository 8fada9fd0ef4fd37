mod terrain;
mod tile_improvement;

pub use terrain::{Terrain, TerrainType};
pub use tile_improvement::TileImprovement;
