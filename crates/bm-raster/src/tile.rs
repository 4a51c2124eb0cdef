//! Tile addressing.

use std::fmt;

/// One cell of the tile pyramid.
///
/// `x` counts columns eastward and `y` counts rows southward from the
/// north-west corner; both are in `0 .. 2^depth`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId {
    pub depth: u8,
    pub x:     u32,
    pub y:     u32,
}

impl TileId {
    #[inline]
    pub fn new(depth: u8, x: u32, y: u32) -> Self {
        Self { depth, x, y }
    }

    /// Image file name, e.g. `d3_x1_y6.png`.
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}.png", self.depth, self.x, self.y)
    }
}
