//! Geographic coordinate types.
//!
//! Coordinates are `f64`.  Tile intervals at depth 7 over a city-sized
//! extent are below `1e-3` degrees, and the longitude-per-pixel comparisons
//! that drive depth selection go down to `1e-6`, which `f32` cannot resolve
//! at longitudes around ±120°.
//!
//! Argument order is always `(lon, lat)`, matching the `x, y` order of the
//! tile grid.

/// A WGS-84 coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Squared planar distance in degree space.
    ///
    /// No geodesic correction: lon/lat are treated as plane coordinates.
    /// Nearest-node snapping relies on exactly this metric.
    #[inline]
    pub fn planar_distance_2(self, other: GeoPoint) -> f64 {
        let dlon = self.lon - other.lon;
        let dlat = self.lat - other.lat;
        dlon * dlon + dlat * dlat
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

// ── GeoBox ────────────────────────────────────────────────────────────────────

/// North-up bounding box given by its upper-left and lower-right corners.
///
/// A well-formed box has `ul_lon <= lr_lon` and `ul_lat >= lr_lat`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBox {
    pub ul_lon: f64,
    pub ul_lat: f64,
    pub lr_lon: f64,
    pub lr_lat: f64,
}

impl GeoBox {
    /// All-zero box, used as the payload of failed queries.
    pub const ZERO: GeoBox = GeoBox { ul_lon: 0.0, ul_lat: 0.0, lr_lon: 0.0, lr_lat: 0.0 };

    #[inline]
    pub fn new(ul_lon: f64, ul_lat: f64, lr_lon: f64, lr_lat: f64) -> Self {
        Self { ul_lon, ul_lat, lr_lon, lr_lat }
    }

    /// Longitude span.
    #[inline]
    pub fn width(&self) -> f64 {
        self.lr_lon - self.ul_lon
    }

    /// Latitude span.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ul_lat - self.lr_lat
    }

    /// `true` if `other` lies entirely inside `self` (edges included).
    pub fn contains_box(&self, other: &GeoBox) -> bool {
        self.ul_lon <= other.ul_lon
            && self.lr_lon >= other.lr_lon
            && self.ul_lat >= other.ul_lat
            && self.lr_lat <= other.lr_lat
    }

    /// `true` if the two boxes share at least one point.
    pub fn intersects(&self, other: &GeoBox) -> bool {
        !(other.ul_lon > self.lr_lon
            || other.ul_lat < self.lr_lat
            || other.lr_lon < self.ul_lon
            || other.lr_lat > self.ul_lat)
    }

    pub fn contains_point(&self, p: GeoPoint) -> bool {
        p.lon >= self.ul_lon && p.lon <= self.lr_lon && p.lat <= self.ul_lat && p.lat >= self.lr_lat
    }
}
