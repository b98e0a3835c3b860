//! Measurements in, finished charts out.

use std::fmt;

use log::{debug, info};

use crate::chart::Chart;
use crate::dimensions::Dimensions;
use crate::error::{ChartError, Result};
use crate::grid::Symbol;
use crate::outline::Outline;
use crate::pieces;
use crate::raster::{RasterConfig, rasterize_configured};
use crate::symbols::derive_symbols;

/// The pieces a sweater is knitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarmentPiece {
    FrontBody,
    BackBody,
    Sleeve,
}

impl GarmentPiece {
    /// All pieces, in the order charts are generated and exported.
    pub fn all() -> &'static [GarmentPiece] {
        &[GarmentPiece::FrontBody, GarmentPiece::BackBody, GarmentPiece::Sleeve]
    }

    pub fn name(&self) -> &'static str {
        match self {
            GarmentPiece::FrontBody => "front_body",
            GarmentPiece::BackBody => "back_body",
            GarmentPiece::Sleeve => "sleeve",
        }
    }

    /// Parse a piece name. Accepts `front_body`, `front-body`, any case.
    pub fn from_name(name: &str) -> Option<GarmentPiece> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        GarmentPiece::all().iter().copied().find(|p| p.name() == normalized)
    }

    pub fn outline(&self, dims: &Dimensions) -> Outline {
        match self {
            GarmentPiece::FrontBody => pieces::front_body(dims),
            GarmentPiece::BackBody => pieces::back_body(dims),
            GarmentPiece::Sleeve => pieces::sleeve(dims),
        }
    }

    /// Rows of 1x1 rib at the bottom edge: the hem for bodies, the cuff for
    /// sleeves.
    pub fn ribbing_rows(&self, dims: &Dimensions) -> usize {
        match self {
            GarmentPiece::FrontBody | GarmentPiece::BackBody => dims.rows_of_ribbed_hem(),
            GarmentPiece::Sleeve => dims.rows_of_ribbed_cuff(),
        }
    }
}

impl fmt::Display for GarmentPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the finished chart for one piece.
pub fn generate_piece(dims: &Dimensions, piece: GarmentPiece, config: &RasterConfig) -> Result<Chart> {
    let outline = piece.outline(dims);
    let occupancy = rasterize_configured(&outline, &dims.gauge, config);
    if occupancy.is_blank() {
        return Err(ChartError::EmptyOutline(piece.name()));
    }
    debug!("{piece}: {} x {} occupancy grid", occupancy.rows(), occupancy.cols());

    let mut chart = derive_symbols(occupancy)?;

    let ribbing = piece.ribbing_rows(dims);
    let rib_start = chart.rows().saturating_sub(ribbing);
    chart.replace_vertical_stripes_below(rib_start, Symbol::Knit, Symbol::Purl)?;

    info!("{piece}: {} rows x {} stitches, {ribbing} rows of rib", chart.rows(), chart.cols());
    Ok(chart)
}

/// Charts for every piece, in [`GarmentPiece::all`] order.
#[derive(Debug, Clone)]
pub struct GarmentCharts {
    charts: Vec<(GarmentPiece, Chart)>,
}

impl GarmentCharts {
    pub fn iter(&self) -> impl Iterator<Item = (GarmentPiece, &Chart)> {
        self.charts.iter().map(|(piece, chart)| (*piece, chart))
    }

    pub fn get(&self, piece: GarmentPiece) -> Option<&Chart> {
        self.charts.iter().find(|(p, _)| *p == piece).map(|(_, chart)| chart)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Generate every piece with the default raster settings.
pub fn generate_charts(dims: &Dimensions) -> Result<GarmentCharts> {
    let config = RasterConfig::default();
    let charts = GarmentPiece::all()
        .iter()
        .map(|&piece| generate_piece(dims, piece, &config).map(|chart| (piece, chart)))
        .collect::<Result<Vec<_>>>()?;
    Ok(GarmentCharts { charts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::tests::sample_raw;

    #[test]
    fn piece_names_round_trip() {
        for piece in GarmentPiece::all() {
            assert_eq!(GarmentPiece::from_name(piece.name()), Some(*piece));
        }
        assert_eq!(GarmentPiece::from_name("Front-Body"), Some(GarmentPiece::FrontBody));
        assert_eq!(GarmentPiece::from_name("collar"), None);
    }

    #[test]
    fn ribbing_comes_from_hem_or_cuff() {
        let mut raw = sample_raw();
        raw.length_of_ribbed_cuff = 3.0;
        let dims = Dimensions::snap(&raw).unwrap();
        assert_eq!(GarmentPiece::BackBody.ribbing_rows(&dims), 10);
        assert_eq!(GarmentPiece::Sleeve.ribbing_rows(&dims), 6);
    }

    #[test]
    fn body_chart_has_bound_off_top_and_rib_bottom() {
        let dims = Dimensions::snap(&sample_raw()).unwrap();
        let chart = generate_piece(&dims, GarmentPiece::BackBody, &RasterConfig::default()).unwrap();

        // one extra row on top for the bind-off pass
        assert_eq!(chart.rows(), dims.rows_of_body() + 1);
        assert_eq!(chart.cols(), dims.cols_of_body());
        assert!(chart.grid().row(0).iter().all(|s| *s == Symbol::Empty));

        let bottom = chart.grid().row(chart.rows() - 1);
        assert_eq!(bottom[0], Symbol::Knit);
        assert_eq!(bottom[1], Symbol::Purl);
        assert!(chart.grid().count(Symbol::BindOff) > 0);
    }

    #[test]
    fn generates_every_piece_in_order() {
        let dims = Dimensions::snap(&sample_raw()).unwrap();
        let charts = generate_charts(&dims).unwrap();
        assert_eq!(charts.len(), 3);
        let order: Vec<_> = charts.iter().map(|(piece, _)| piece).collect();
        assert_eq!(order, GarmentPiece::all());
        assert!(charts.get(GarmentPiece::Sleeve).is_some());
    }
}
