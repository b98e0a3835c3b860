//! Common utilities shared across CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use knit_chart::{Dimensions, GarmentPiece, RawDimensions};

/// Read a measurements JSON file and snap it onto the stitch grid.
pub fn load_dimensions(path: &Path) -> Result<Dimensions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read measurements from {}", path.display()))?;
    let raw: RawDimensions = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid measurements file", path.display()))?;
    Dimensions::snap(&raw).with_context(|| format!("measurements in {} do not fit together", path.display()))
}

/// Resolve a piece name given on the command line.
pub fn parse_piece(name: &str) -> Result<GarmentPiece> {
    GarmentPiece::from_name(name).ok_or_else(|| {
        let known: Vec<_> = GarmentPiece::all().iter().map(|p| p.name()).collect();
        anyhow!("unknown piece '{name}' (expected one of: {})", known.join(", "))
    })
}
