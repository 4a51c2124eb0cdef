//! Raster composition planning.
//!
//! The composer decides *where* everything goes on the output canvas: the
//! pixel offset of each tile image and the pixel polyline of an optional
//! route.  Reading tile images, drawing, and PNG encoding belong to the
//! caller.

use std::path::PathBuf;

use bm_core::{GeoBox, GeoPoint, NodeId};
use bm_search::LocationIndex;
use bm_spatial::PointIndex;

use crate::{RasterResult, TileId};

/// Where tile images live and how routes are stroked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComposerConfig {
    /// Directory holding `d{depth}_x{x}_y{y}.png` files.
    pub img_root:           PathBuf,
    /// Edge length of one tile image in pixels.
    pub tile_size_px:       u32,
    pub route_stroke_px:    f32,
    /// RGBA.
    pub route_stroke_color: [u8; 4],
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            img_root:           PathBuf::from("data/tiles"),
            tile_size_px:       256,
            route_stroke_px:    5.0,
            route_stroke_color: [108, 181, 230, 200],
        }
    }
}

/// One tile image and its top-left corner on the canvas.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePlacement {
    pub tile: TileId,
    pub path: PathBuf,
    pub x:    u32,
    pub y:    u32,
}

/// Canvas pixel coordinate.  May fall outside the canvas for route nodes
/// beyond the raster box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Everything needed to paint one raster response.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositionPlan {
    pub width:              u32,
    pub height:             u32,
    pub bbox:               GeoBox,
    /// Row-major, matching the raster grid.
    pub tiles:              Vec<TilePlacement>,
    /// Route polyline in canvas pixels; empty when there is no route.
    pub route:              Vec<PixelPoint>,
    pub route_stroke_px:    f32,
    pub route_stroke_color: [u8; 4],
}

impl CompositionPlan {
    /// Project a coordinate onto the canvas.
    ///
    /// Linear in lon and lat (no map projection), truncated toward zero.
    pub fn project(&self, p: GeoPoint) -> PixelPoint {
        let wdpp = self.bbox.width() / f64::from(self.width);
        let hdpp = self.bbox.height() / f64::from(self.height);
        PixelPoint {
            x: ((p.lon - self.bbox.ul_lon) / wdpp) as i64,
            y: ((self.bbox.ul_lat - p.lat) / hdpp) as i64,
        }
    }
}

/// Builds [`CompositionPlan`]s for resolved rasters.
#[derive(Clone, Debug, Default)]
pub struct TileComposer {
    config: ComposerConfig,
}

impl TileComposer {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Lay out `raster` and project `route` onto it.
    ///
    /// Returns `None` for an unsuccessful raster.  Route nodes the index has
    /// no position for are skipped.
    pub fn plan<I: PointIndex>(
        &self,
        raster: &RasterResult,
        route: &[NodeId],
        locations: &LocationIndex<I>,
    ) -> Option<CompositionPlan> {
        if !raster.success || raster.grid.is_empty() {
            return None;
        }
        let tile = self.config.tile_size_px;

        let tiles = raster
            .grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(c, &id)| TilePlacement {
                    tile: id,
                    path: self.config.img_root.join(id.file_name()),
                    x:    c as u32 * tile,
                    y:    r as u32 * tile,
                })
            })
            .collect();

        let mut plan = CompositionPlan {
            width:              raster.cols() as u32 * tile,
            height:             raster.rows() as u32 * tile,
            bbox:               raster.bbox,
            tiles,
            route:              Vec::new(),
            route_stroke_px:    self.config.route_stroke_px,
            route_stroke_color: self.config.route_stroke_color,
        };

        let polyline: Vec<PixelPoint> = route
            .iter()
            .filter_map(|&id| locations.position(id))
            .map(|p| plan.project(p))
            .collect();
        plan.route = polyline;

        Some(plan)
    }
}
