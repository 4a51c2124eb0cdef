//! Viewport → tile grid resolution.
//!
//! # Algorithm
//!
//! 1. **Validate.**  Malformed or fully out-of-extent queries short-circuit
//!    to [`RasterResult::failure`].
//! 2. **Pick a depth.**  The query asks for `desired = (lr_lon - ul_lon) / w`
//!    longitude per pixel.  Depth `d` tiles deliver `largest / 2^d`, where
//!    `largest` is the depth-0 value.  The chosen depth is the shallowest one
//!    with `largest / 2^d <= desired`, i.e. `ceil(log2(largest / desired))`,
//!    clamped to `0 ..= max_depth`.  Rounding down would hand back tiles
//!    coarser than the viewport.
//! 3. **Clip and index.**  Each query edge is clipped to the world extent on
//!    its own side and mapped to a column/row with `floor`, capped at
//!    `2^d - 1`.
//! 4. **Assemble.**  The raster box is rebuilt from the grid lines of the
//!    chosen cells, so it always lands on tile boundaries and covers the
//!    clipped query.
//!
//! The resolver holds only a copy of the [`WorldExtent`]; `resolve` takes
//! `&self` and touches no shared state.

use tracing::debug;

use bm_core::{GeoBox, WorldExtent};

use crate::{QueryRejection, TileId};

// ── ViewportQuery ─────────────────────────────────────────────────────────────

/// A client's visible map box and the pixel size of its viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportQuery {
    #[cfg_attr(feature = "serde", serde(rename = "ullon"))]
    pub ul_lon: f64,
    #[cfg_attr(feature = "serde", serde(rename = "ullat"))]
    pub ul_lat: f64,
    #[cfg_attr(feature = "serde", serde(rename = "lrlon"))]
    pub lr_lon: f64,
    #[cfg_attr(feature = "serde", serde(rename = "lrlat"))]
    pub lr_lat: f64,
    /// Viewport width in pixels.
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    pub width:  f64,
    /// Viewport height in pixels.
    #[cfg_attr(feature = "serde", serde(rename = "h"))]
    pub height: f64,
}

impl ViewportQuery {
    pub fn new(ul_lon: f64, ul_lat: f64, lr_lon: f64, lr_lat: f64, width: f64, height: f64) -> Self {
        Self { ul_lon, ul_lat, lr_lon, lr_lat, width, height }
    }

    /// The query box.
    #[inline]
    pub fn bbox(&self) -> GeoBox {
        GeoBox::new(self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat)
    }

    /// Longitude per pixel the viewport asks for.
    #[inline]
    pub fn lon_dpp(&self) -> f64 {
        (self.lr_lon - self.ul_lon) / self.width
    }
}

// ── RasterResult ──────────────────────────────────────────────────────────────

/// Outcome of resolving one [`ViewportQuery`].
///
/// On failure `success` is `false`, `depth` is 0, `grid` is empty and `bbox`
/// is [`GeoBox::ZERO`].
#[derive(Clone, Debug, PartialEq)]
pub struct RasterResult {
    pub depth:   u8,
    /// Tiles in row-major order: `grid[row][col]`, north row first.
    pub grid:    Vec<Vec<TileId>>,
    /// Exact extent of the tiles in `grid`.
    pub bbox:    GeoBox,
    pub success: bool,
}

impl RasterResult {
    pub fn failure() -> Self {
        Self { depth: 0, grid: Vec::new(), bbox: GeoBox::ZERO, success: false }
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.grid.iter().flatten().copied()
    }

    /// Convert to the wire-level response shape.
    pub fn into_response(self) -> RasterResponse {
        if !self.success {
            return RasterResponse::failure();
        }
        let render_grid = self
            .grid
            .iter()
            .map(|row| row.iter().map(TileId::file_name).collect())
            .collect();
        RasterResponse {
            render_grid:   Some(render_grid),
            raster_ul_lon: self.bbox.ul_lon,
            raster_ul_lat: self.bbox.ul_lat,
            raster_lr_lon: self.bbox.lr_lon,
            raster_lr_lat: self.bbox.lr_lat,
            depth:         self.depth,
            query_success: true,
        }
    }
}

/// Response body for a raster request, field names as the map client
/// expects them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterResponse {
    pub render_grid:   Option<Vec<Vec<String>>>,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
    pub depth:         u8,
    pub query_success: bool,
}

impl RasterResponse {
    pub fn failure() -> Self {
        Self {
            render_grid:   None,
            raster_ul_lon: 0.0,
            raster_ul_lat: 0.0,
            raster_lr_lon: 0.0,
            raster_lr_lat: 0.0,
            depth:         0,
            query_success: false,
        }
    }
}

// ── TileResolver ──────────────────────────────────────────────────────────────

/// Stateless viewport resolver bound to one [`WorldExtent`].
#[derive(Clone, Copy, Debug)]
pub struct TileResolver {
    extent: WorldExtent,
}

impl TileResolver {
    pub fn new(extent: WorldExtent) -> Self {
        Self { extent }
    }

    pub fn extent(&self) -> &WorldExtent {
        &self.extent
    }

    /// Resolve `query` into a tile grid.  Never panics; invalid queries come
    /// back as [`RasterResult::failure`].
    pub fn resolve(&self, query: &ViewportQuery) -> RasterResult {
        if let Err(reason) = self.check(query) {
            debug!(?query, %reason, "raster query rejected");
            return RasterResult::failure();
        }

        let depth = self.depth_for(query.lon_dpp());
        let n = self.extent.tiles_per_side(depth);
        let lon_span = self.extent.tile_lon_span(depth);
        let lat_span = self.extent.tile_lat_span(depth);
        let w = &self.extent;

        // ── Clip each edge against its own side of the world ─────────────
        let ul_col = if query.ul_lon <= w.ul_lon {
            0
        } else {
            cell(query.ul_lon - w.ul_lon, lon_span, n)
        };
        let lr_col = if query.lr_lon >= w.lr_lon {
            n - 1
        } else {
            cell(query.lr_lon - w.ul_lon, lon_span, n)
        };
        let ul_row = if query.ul_lat >= w.ul_lat {
            0
        } else {
            cell(w.ul_lat - query.ul_lat, lat_span, n)
        };
        let lr_row = if query.lr_lat <= w.lr_lat {
            n - 1
        } else {
            cell(w.ul_lat - query.lr_lat, lat_span, n)
        };
        debug_assert!(ul_col <= lr_col && ul_row <= lr_row);

        // ── Assemble ──────────────────────────────────────────────────────
        let bbox = GeoBox::new(
            w.grid_lon(depth, ul_col),
            w.grid_lat(depth, ul_row),
            w.grid_lon(depth, lr_col + 1),
            w.grid_lat(depth, lr_row + 1),
        );
        let grid: Vec<Vec<TileId>> = (ul_row..=lr_row)
            .map(|y| (ul_col..=lr_col).map(|x| TileId::new(depth, x, y)).collect())
            .collect();

        debug!(depth, rows = grid.len(), cols = lr_col - ul_col + 1, "raster query resolved");

        RasterResult { depth, grid, bbox, success: true }
    }

    /// Resolve a batch of queries, in input order.
    ///
    /// With the `parallel` Cargo feature the batch runs on Rayon's thread
    /// pool.
    pub fn resolve_all(&self, queries: &[ViewportQuery]) -> Vec<RasterResult> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            queries.par_iter().map(|q| self.resolve(q)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            queries.iter().map(|q| self.resolve(q)).collect()
        }
    }

    /// Classify `query` without resolving it.
    pub fn check(&self, query: &ViewportQuery) -> Result<(), QueryRejection> {
        let fields = [
            query.ul_lon, query.ul_lat, query.lr_lon, query.lr_lat, query.width, query.height,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(QueryRejection::NonFinite);
        }
        if query.width <= 0.0 || query.height <= 0.0 {
            return Err(QueryRejection::EmptyViewport);
        }
        if query.ul_lon > query.lr_lon || query.ul_lat < query.lr_lat {
            return Err(QueryRejection::Inverted);
        }
        if !self.extent.bounds().intersects(&query.bbox()) {
            return Err(QueryRejection::OutOfBounds);
        }
        Ok(())
    }

    /// Shallowest depth whose tiles resolve at least `lon_dpp` longitude per
    /// pixel, clamped to the pyramid.
    pub fn depth_for(&self, lon_dpp: f64) -> u8 {
        let max = self.extent.max_depth;
        let largest = self.extent.lon_dpp(0);
        let smallest = largest / f64::from(self.extent.tiles_per_side(max));

        if lon_dpp >= largest {
            0
        } else if lon_dpp <= smallest {
            max
        } else {
            let depth = (largest / lon_dpp).log2().ceil();
            (depth as u8).min(max)
        }
    }
}

/// Cell containing `offset` along an axis cut into `n` cells of `span`.
#[inline]
fn cell(offset: f64, span: f64, n: u32) -> u32 {
    ((offset / span).floor() as u32).min(n - 1)
}
