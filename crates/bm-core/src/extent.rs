//! Tile pyramid configuration.
//!
//! # Design
//!
//! The map is a quad-tree over a fixed rectangle (the *world extent*).  At
//! depth `d` the extent is split into `2^d × 2^d` equal cells, each rendered
//! as one `tile_size_px`-square image.  Depth 0 is a single tile covering
//! the whole extent.
//!
//! `WorldExtent` is cheap to copy and holds no heap data.  It is passed by
//! value into every component that needs it; nothing reads it from a global.

use crate::{BmError, BmResult, GeoBox};

/// Deepest zoom level the tile pyramid can express.  `2^30` tiles per side
/// keeps column/row indices inside `u32`.
pub const DEPTH_LIMIT: u8 = 30;

/// Geographic bounds and tile geometry of the rendered map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldExtent {
    /// Longitude of the upper-left (north-west) corner.
    pub ul_lon: f64,
    /// Latitude of the upper-left (north-west) corner.
    pub ul_lat: f64,
    /// Longitude of the lower-right (south-east) corner.
    pub lr_lon: f64,
    /// Latitude of the lower-right (south-east) corner.
    pub lr_lat: f64,
    /// Edge length of one tile image in pixels.
    pub tile_size_px: u32,
    /// Deepest depth for which tiles exist.
    pub max_depth: u8,
}

impl WorldExtent {
    /// Berkeley, CA tile set: 256 px tiles, depths 0–7.
    pub const BERKELEY: WorldExtent = WorldExtent {
        ul_lon:       -122.2998046875,
        ul_lat:       37.892195547244356,
        lr_lon:       -122.2119140625,
        lr_lat:       37.82280243352756,
        tile_size_px: 256,
        max_depth:    7,
    };

    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// [`BmError::Config`] if the corners are not north-up
    /// (`ul_lon < lr_lon`, `ul_lat > lr_lat`), a coordinate is not finite,
    /// the tile size is zero, or `max_depth` exceeds [`DEPTH_LIMIT`].
    pub fn new(
        ul_lon: f64,
        ul_lat: f64,
        lr_lon: f64,
        lr_lat: f64,
        tile_size_px: u32,
        max_depth: u8,
    ) -> BmResult<Self> {
        let extent = Self { ul_lon, ul_lat, lr_lon, lr_lat, tile_size_px, max_depth };
        extent.validate()?;
        Ok(extent)
    }

    /// Check the invariants `new` enforces.  Useful after deserializing.
    pub fn validate(&self) -> BmResult<()> {
        let corners = [self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(BmError::Config(format!("non-finite world corner in {corners:?}")));
        }
        if self.ul_lon >= self.lr_lon {
            return Err(BmError::Config(format!(
                "upper-left longitude {} must be west of lower-right longitude {}",
                self.ul_lon, self.lr_lon
            )));
        }
        if self.ul_lat <= self.lr_lat {
            return Err(BmError::Config(format!(
                "upper-left latitude {} must be north of lower-right latitude {}",
                self.ul_lat, self.lr_lat
            )));
        }
        if self.tile_size_px == 0 {
            return Err(BmError::Config("tile size must be positive".into()));
        }
        if self.max_depth > DEPTH_LIMIT {
            return Err(BmError::Config(format!(
                "max depth {} exceeds limit {DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// The extent as a bounding box.
    #[inline]
    pub fn bounds(&self) -> GeoBox {
        GeoBox::new(self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat)
    }

    /// Number of tiles along each axis at `depth`.
    #[inline]
    pub fn tiles_per_side(&self, depth: u8) -> u32 {
        1u32 << depth
    }

    /// Longitude span of one tile at `depth`.
    #[inline]
    pub fn tile_lon_span(&self, depth: u8) -> f64 {
        (self.lr_lon - self.ul_lon) / f64::from(self.tiles_per_side(depth))
    }

    /// Latitude span of one tile at `depth`.
    #[inline]
    pub fn tile_lat_span(&self, depth: u8) -> f64 {
        (self.ul_lat - self.lr_lat) / f64::from(self.tiles_per_side(depth))
    }

    /// Longitude-per-pixel of the tiles at `depth`.
    #[inline]
    pub fn lon_dpp(&self, depth: u8) -> f64 {
        self.tile_lon_span(depth) / f64::from(self.tile_size_px)
    }

    /// Longitude of grid line `k` at `depth` (`0 ..= 2^depth`).
    ///
    /// Interpolates between the world corners, so `k = 0` and `k = 2^depth`
    /// return `ul_lon` and `lr_lon` bit-for-bit.
    #[inline]
    pub fn grid_lon(&self, depth: u8, k: u32) -> f64 {
        let t = f64::from(k) / f64::from(self.tiles_per_side(depth));
        self.ul_lon * (1.0 - t) + self.lr_lon * t
    }

    /// Latitude of grid line `k` at `depth`, counted southward from `ul_lat`.
    #[inline]
    pub fn grid_lat(&self, depth: u8, k: u32) -> f64 {
        let t = f64::from(k) / f64::from(self.tiles_per_side(depth));
        self.ul_lat * (1.0 - t) + self.lr_lat * t
    }
}

impl Default for WorldExtent {
    fn default() -> Self {
        Self::BERKELEY
    }
}
