#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// A captured or normalized stroke point in integer canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by (dx, dy), or `None` if it leaves the `i32` range
    pub fn checked_translated(self, dx: i64, dy: i64) -> Option<Self> {
        let x = i32::try_from(i64::from(self.x) + dx).ok()?;
        let y = i32::try_from(i64::from(self.y) + dy).ok()?;
        Some(Self::new(x, y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
