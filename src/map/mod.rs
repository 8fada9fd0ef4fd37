pub mod mapunit;
pub mod tile;
pub mod tile_map;
