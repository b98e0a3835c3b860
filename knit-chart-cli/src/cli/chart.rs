//! Chart command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use knit_chart::{RasterConfig, generate_charts, generate_piece, write_csv, write_workbook};

use super::common::{load_dimensions, parse_piece};

/// Execute the chart command.
pub fn cmd_chart(dims_path: &Path, output_dir: &Path, xlsx: Option<&Path>, piece: Option<&str>) -> Result<()> {
    let dims = load_dimensions(dims_path)?;

    if let Some(workbook_path) = xlsx {
        let charts = generate_charts(&dims)?;
        write_workbook(&charts, workbook_path)
            .with_context(|| format!("failed to write workbook {}", workbook_path.display()))?;
        info!("wrote {} charts to {}", charts.len(), workbook_path.display());
        return Ok(());
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let charts = match piece {
        Some(name) => {
            let piece = parse_piece(name)?;
            vec![(piece, generate_piece(&dims, piece, &RasterConfig::default())?)]
        }
        None => generate_charts(&dims)?.iter().map(|(piece, chart)| (piece, chart.clone())).collect(),
    };

    for (piece, chart) in &charts {
        let path = output_dir.join(format!("{}.csv", piece.name()));
        write_csv(chart, &path).with_context(|| format!("failed to write {}", path.display()))?;
        info!("{piece}: {} x {} -> {}", chart.rows(), chart.cols(), path.display());
    }
    Ok(())
}
