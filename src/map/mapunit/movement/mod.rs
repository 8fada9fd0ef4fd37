mod unit_movement;

pub use unit_movement::{ParentTileAndTotalMovement, PathsToTilesWithinTurn};
