//! Integer pixel coordinates on a rendered surface.

use serde::{Deserialize, Serialize};

/// A pixel coordinate. `(-1, -1)` is [`Point::UNSET`]: no position yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const UNSET: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::UNSET
    }
}
