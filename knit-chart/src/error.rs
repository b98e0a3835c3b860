//! Error type shared by every stage of the chart pipeline.

use thiserror::Error;

/// Errors raised while building outlines, charts or export files.
///
/// A degenerate outline is *not* an error: the rasterizer logs a warning and
/// hands back a blank grid instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChartError {
    #[error("invalid gauge: {0}")]
    InvalidGauge(String),

    #[error("measurement `{field}` must be a positive number, got {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("inconsistent dimensions: {0}")]
    InconsistentDimensions(String),

    #[error("invalid path data: {0}")]
    PathData(String),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("row stride must be at least 1")]
    InvalidStride,

    #[error("template of {template_rows}x{template_cols} does not fit a {grid_rows}x{grid_cols} grid")]
    TemplateDoesNotFit {
        template_rows: usize,
        template_cols: usize,
        grid_rows: usize,
        grid_cols: usize,
    },

    #[error("grid of {rows}x{cols} is too small for symbol derivation (needs at least 2x2)")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("region rows {rows:?} cols {cols:?} is outside a {grid_rows}x{grid_cols} grid")]
    InvalidRegion {
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        grid_rows: usize,
        grid_cols: usize,
    },

    #[error("unknown symbol code {0}")]
    UnknownSymbolCode(i64),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, found: usize },

    #[error("transient marker {0} cannot appear in a finished chart")]
    TransientSymbol(&'static str),

    #[error("outline for {0} did not cover any stitch")]
    EmptyOutline(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
