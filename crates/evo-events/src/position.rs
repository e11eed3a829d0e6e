//! Grid Positions
//!
//! Integer cell coordinates. Positions are not clamped to the world bounds,
//! so coordinates may be negative or exceed the configured width/height.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the simulation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, `|dx| + |dy|`, saturating at `i64::MAX`
    pub fn manhattan_distance(self, other: Position) -> i64 {
        let total = self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y));
        i64::try_from(total).unwrap_or(i64::MAX)
    }

    /// Straight-line distance to an arbitrary (possibly fractional) point
    pub fn euclidean_distance_to(self, x: f64, y: f64) -> f64 {
        let dx = self.x as f64 - x;
        let dy = self.y as f64 - y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
