//! Outline to occupancy grid.
//!
//! Lays the stitch grid over the outline's bounding box and marks a cell
//! `Knit` when its centre falls inside the outline.

use log::{debug, warn};

use crate::gauge::{Gauge, whole_steps};
use crate::geometry::Polygon;
use crate::grid::{StitchGrid, Symbol};
use crate::outline::Outline;

/// Configuration for rasterizing an outline.
#[derive(Debug, Clone, Copy)]
pub struct RasterConfig {
    /// Points sampled along each segment, both endpoints included
    pub samples_per_segment: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { samples_per_segment: 101 }
    }
}

/// Rasterize with the default sampling density.
pub fn rasterize(outline: &Outline, gauge: &Gauge) -> StitchGrid {
    rasterize_configured(outline, gauge, &RasterConfig::default())
}

/// Rasterize with full configuration.
///
/// The grid is `floor(height / stitch_height)` rows by
/// `floor(width / stitch_width)` columns; a partial stitch at the far edge is
/// dropped. An outline that is open or encloses no area yields an all-empty
/// grid of that size rather than an error.
pub fn rasterize_configured(outline: &Outline, gauge: &Gauge, config: &RasterConfig) -> StitchGrid {
    let Some(bounds) = outline.bounding_box() else {
        warn!("outline has no segments; nothing to rasterize");
        return StitchGrid::new(0, 0);
    };

    let (sw, sh) = (gauge.stitch_width(), gauge.stitch_height());
    let rows = whole_steps(bounds.height(), sh);
    let cols = whole_steps(bounds.width(), sw);
    let mut grid = StitchGrid::new(rows, cols);
    debug!("rasterizing {:.3} x {:.3} outline into {rows} x {cols} stitches", bounds.width(), bounds.height());

    if !outline.is_closed() {
        warn!("outline is not closed; leaving the {rows} x {cols} grid empty");
        return grid;
    }
    let Some(polygon) = Polygon::from_samples(outline.sample_points(config.samples_per_segment)) else {
        warn!("outline collapses to a degenerate polygon; leaving the {rows} x {cols} grid empty");
        return grid;
    };

    for r in 0..rows {
        let y = bounds.min_y + r as f64 * sh + sh / 2.0;
        for c in 0..cols {
            let x = bounds.min_x + c as f64 * sw + sw / 2.0;
            if polygon.contains(x, y) {
                grid.set(r, c, Symbol::Knit);
            }
        }
    }
    grid
}
