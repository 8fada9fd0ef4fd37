use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Position of a tile on the hex map, in Unciv's skewed hex coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

/// Offsets of the six neighbors of a hex
const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1)];

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Stable hash of the position, used to seed per-tile randomness.
    /// Must not change between versions or saved games would reroll.
    pub fn hash_code(&self) -> i32 {
        31i32
            .wrapping_mul(31i32.wrapping_add(self.x))
            .wrapping_add(self.y)
    }

    /// Distance in tiles, ignoring terrain
    pub fn aerial_distance_to(self, other: Vector2) -> i32 {
        let relative_x = self.x - other.x;
        let relative_y = self.y - other.y;
        if relative_x * relative_y >= 0 {
            relative_x.abs().max(relative_y.abs())
        } else {
            relative_x.abs() + relative_y.abs()
        }
    }

    pub fn neighbors(self) -> impl Iterator<Item = Vector2> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |(dx, dy)| Vector2::new(self.x + dx, self.y + dy))
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
