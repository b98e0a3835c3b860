//! # knit-chart
//!
//! Knitting chart generation from garment measurements.
//!
//! The pipeline for each garment piece:
//! - snap the measurements onto the stitch grid ([`Dimensions::snap`])
//! - draw the piece outline ([`pieces`])
//! - rasterize it into a stitch occupancy grid ([`rasterize`])
//! - derive bind-offs, decreases and increases ([`derive_symbols`])
//! - rib the bottom edge and export ([`export`])
//!
//! [`generate_charts`] runs all of it for the front, back and sleeve.

pub mod chart;
pub mod dimensions;
pub mod error;
pub mod export;
pub mod gauge;
pub mod geometry;
pub mod grid;
pub mod outline;
pub mod pattern;
pub mod pieces;
pub mod pipeline;
pub mod raster;
pub mod symbols;

// Re-export common types at crate root for convenience.
pub use chart::{Chart, MirrorSource};
pub use dimensions::{Dimensions, GarmentType, RawDimensions};
pub use error::{ChartError, Result};
pub use export::{SvgStyle, chart_to_csv, outline_to_svg, workbook_to_buffer, write_csv, write_workbook};
pub use gauge::{Gauge, Unit};
pub use geometry::{Point, Polygon};
pub use grid::{StitchGrid, Symbol};
pub use outline::{Bounds, Outline, OutlineBuilder, Segment};
pub use pattern::{Stamp, Template, replace, replace_all};
pub use pipeline::{GarmentCharts, GarmentPiece, generate_charts, generate_piece};
pub use raster::{RasterConfig, rasterize, rasterize_configured};
pub use symbols::derive_symbols;
