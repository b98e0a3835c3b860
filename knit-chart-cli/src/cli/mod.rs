//! CLI command implementations.
//!
//! - `chart` - generate charts for every (or one) garment piece
//! - `outline` - export a piece outline as SVG
//! - `symbols` - list the chart symbol legend

pub mod chart;
pub mod common;
pub mod outline;
pub mod symbols;

pub use chart::cmd_chart;
pub use outline::cmd_outline;
pub use symbols::cmd_symbols;
