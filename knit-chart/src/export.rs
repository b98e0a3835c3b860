//! Writing charts and outlines to files.
//!
//! Charts go out as raw symbol codes, either one CSV per piece or one
//! spreadsheet with a sheet per piece. Outlines go out as a standalone SVG.
//! Neither format carries the gauge or a legend.

use std::fs;
use std::path::Path;

use log::debug;
use rust_xlsxwriter::Workbook;

use crate::chart::Chart;
use crate::error::Result;
use crate::outline::Outline;
use crate::pipeline::GarmentCharts;

/// One line per chart row, codes separated by commas.
pub fn chart_to_csv(chart: &Chart) -> String {
    let mut csv = String::new();
    for row in chart.grid().iter_rows() {
        let line: Vec<String> = row.iter().map(|s| s.code().to_string()).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }
    csv
}

pub fn write_csv(chart: &Chart, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, chart_to_csv(chart))?;
    debug!("wrote {} x {} chart to {}", chart.rows(), chart.cols(), path.display());
    Ok(())
}

fn build_workbook(charts: &GarmentCharts) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    for (piece, chart) in charts.iter() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(piece.name())?;
        for (r, row) in chart.grid().iter_rows().enumerate() {
            // Indices past the sheet limits are rejected by the writer.
            let r = u32::try_from(r).unwrap_or(u32::MAX);
            for (c, symbol) in row.iter().enumerate() {
                let c = u16::try_from(c).unwrap_or(u16::MAX);
                sheet.write_number(r, c, f64::from(symbol.code()))?;
            }
        }
    }
    Ok(workbook)
}

/// Save every chart into one `.xlsx` file, one sheet per piece.
pub fn write_workbook(charts: &GarmentCharts, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    build_workbook(charts)?.save(path)?;
    debug!("wrote {} sheets to {}", charts.len(), path.display());
    Ok(())
}

/// The same workbook as [`write_workbook`], in memory.
pub fn workbook_to_buffer(charts: &GarmentCharts) -> Result<Vec<u8>> {
    Ok(build_workbook(charts)?.save_to_buffer()?)
}

/// Presentation attributes for [`outline_to_svg`].
#[derive(Debug, Clone)]
pub struct SvgStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            fill: "none".to_string(),
            stroke: "black".to_string(),
            stroke_width: 1.0,
        }
    }
}

/// Render an outline as a standalone SVG document whose view box is the
/// outline's bounding box.
pub fn outline_to_svg(outline: &Outline, style: &SvgStyle) -> String {
    let (x, y, w, h) = outline
        .bounding_box()
        .map_or((0.0, 0.0, 0.0, 0.0), |b| (b.min_x, b.min_y, b.width(), b.height()));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">
"#
    ));
    svg.push_str(&format!(
        "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        outline.to_path_data(),
        escape_attr(&style.fill),
        escape_attr(&style.stroke),
        style.stroke_width
    ));
    svg.push_str("</svg>\n");
    svg
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}
