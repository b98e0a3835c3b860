//! Outline command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use knit_chart::{SvgStyle, outline_to_svg};

use super::common::{load_dimensions, parse_piece};

/// Execute the outline command.
pub fn cmd_outline(dims_path: &Path, piece: &str, output: Option<&Path>) -> Result<()> {
    let dims = load_dimensions(dims_path)?;
    let piece = parse_piece(piece)?;
    let svg = outline_to_svg(&piece.outline(&dims), &SvgStyle::default());

    match output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("failed to write {}", path.display()))?;
            info!("{piece} outline -> {}", path.display());
        }
        None => io::stdout().write_all(svg.as_bytes()).context("failed to write to stdout")?,
    }
    Ok(())
}
