//! Garment measurements snapped to the stitch grid.
//!
//! Raw measurements arrive as JSON (see [`RawDimensions`]). [`Dimensions::snap`]
//! validates them, rounds every length down to a whole number of stitches or
//! rows, and exposes the derived lengths the outline builder needs. Everything
//! downstream treats a [`Dimensions`] value as an immutable, grid-aligned record.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::gauge::{Gauge, whole_steps};

/// Garment silhouette requested by the user.
///
/// Every type currently shares the body/sleeve outlines; the tag is carried
/// through so exports can label the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GarmentType {
    #[serde(rename = "crew-neck-sweater")]
    CrewNeckSweater,
    #[serde(rename = "v-neck-sweater")]
    VNeckSweater,
    #[serde(rename = "box-sweater")]
    BoxSweater,
    #[serde(rename = "turtleneck")]
    Turtleneck,
    #[serde(rename = "crew-neck-cardigan")]
    CrewNeckCardigan,
    #[serde(rename = "v-neck-cardigan")]
    VNeckCardigan,
    #[serde(rename = "box-cardigan")]
    BoxCardigan,
    #[serde(rename = "crew-neck-vest")]
    CrewNeckVest,
    #[serde(rename = "v-neck-vest")]
    VNeckVest,
    #[serde(rename = "box-vest")]
    BoxVest,
    #[serde(rename = "po-crew-neck-vest")]
    PulloverCrewNeckVest,
    #[serde(rename = "po-v-neck-vest")]
    PulloverVNeckVest,
    #[serde(rename = "po-box-vest")]
    PulloverBoxVest,
}

/// Measurements exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDimensions {
    pub gauge: Gauge,

    pub length_of_body: f64,
    pub length_of_shoulder_drop: f64,
    pub length_of_ribbed_hem: f64,

    pub length_of_front_neck_drop: f64,
    pub length_of_back_neck_drop: f64,

    pub width_of_body: f64,
    pub width_of_neck: f64,

    pub length_of_sleeve: f64,
    pub length_of_ribbed_cuff: f64,

    /// Half of the sleeve width at the underarm.
    pub width_of_sleeve: f64,
    /// Half of the cuff width.
    pub width_of_cuff: f64,

    #[serde(rename = "type")]
    pub garment_type: GarmentType,

    /// Prefer an odd number of stitches across each piece.
    #[serde(default)]
    pub is_odd: bool,
}

/// Grid-aligned measurements.
///
/// Vertical lengths are whole multiples of the stitch height, horizontal
/// lengths whole multiples of the stitch width (with the parity chosen by
/// `is_odd`). Only [`Dimensions::snap`] builds one outside this crate.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Dimensions {
    pub gauge: Gauge,

    pub length_of_body: f64,
    pub length_of_shoulder_drop: f64,
    pub length_of_ribbed_hem: f64,
    pub length_of_front_neck_drop: f64,
    pub length_of_back_neck_drop: f64,

    pub width_of_body: f64,
    pub width_of_neck: f64,

    pub length_of_sleeve: f64,
    pub length_of_ribbed_cuff: f64,
    pub width_of_sleeve: f64,
    pub width_of_cuff: f64,

    pub garment_type: GarmentType,
    pub is_odd: bool,
}

impl Dimensions {
    /// Validate raw measurements and snap them onto the stitch grid.
    pub fn snap(raw: &RawDimensions) -> Result<Self> {
        raw.gauge.validate()?;

        let measurements = [
            ("length_of_body", raw.length_of_body),
            ("length_of_shoulder_drop", raw.length_of_shoulder_drop),
            ("length_of_ribbed_hem", raw.length_of_ribbed_hem),
            ("length_of_front_neck_drop", raw.length_of_front_neck_drop),
            ("length_of_back_neck_drop", raw.length_of_back_neck_drop),
            ("width_of_body", raw.width_of_body),
            ("width_of_neck", raw.width_of_neck),
            ("length_of_sleeve", raw.length_of_sleeve),
            ("length_of_ribbed_cuff", raw.length_of_ribbed_cuff),
            ("width_of_sleeve", raw.width_of_sleeve),
            ("width_of_cuff", raw.width_of_cuff),
        ];
        for (field, value) in measurements {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidMeasurement { field, value });
            }
        }

        let snapper = Snapper { gauge: raw.gauge, is_odd: raw.is_odd };
        let dims = Self {
            gauge: raw.gauge,
            length_of_body: snapper.rows(raw.length_of_body),
            length_of_shoulder_drop: snapper.rows(raw.length_of_shoulder_drop),
            length_of_ribbed_hem: snapper.rows(raw.length_of_ribbed_hem),
            length_of_front_neck_drop: snapper.rows(raw.length_of_front_neck_drop),
            length_of_back_neck_drop: snapper.rows(raw.length_of_back_neck_drop),
            width_of_body: snapper.stitches_with_parity(raw.width_of_body),
            width_of_neck: snapper.stitches_with_parity(raw.width_of_neck),
            length_of_sleeve: snapper.rows(raw.length_of_sleeve),
            length_of_ribbed_cuff: snapper.rows(raw.length_of_ribbed_cuff),
            width_of_sleeve: snapper.half_width(raw.width_of_sleeve),
            width_of_cuff: snapper.half_width(raw.width_of_cuff),
            garment_type: raw.garment_type,
            is_odd: raw.is_odd,
        };

        dims.check_consistency()?;
        debug!("dimensions snapped to the stitch grid\n{dims}");
        Ok(dims)
    }

    fn check_consistency(&self) -> Result<()> {
        let snapped = [
            ("length_of_body", self.length_of_body),
            ("length_of_shoulder_drop", self.length_of_shoulder_drop),
            ("length_of_ribbed_hem", self.length_of_ribbed_hem),
            ("length_of_front_neck_drop", self.length_of_front_neck_drop),
            ("length_of_back_neck_drop", self.length_of_back_neck_drop),
            ("width_of_body", self.width_of_body),
            ("width_of_neck", self.width_of_neck),
            ("length_of_sleeve", self.length_of_sleeve),
            ("length_of_ribbed_cuff", self.length_of_ribbed_cuff),
            ("width_of_sleeve", self.width_of_sleeve),
            ("width_of_cuff", self.width_of_cuff),
        ];
        if let Some((field, _)) = snapped.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ChartError::InconsistentDimensions(format!(
                "{field} is shorter than one stitch at this gauge"
            )));
        }

        let derived = [
            ("shoulder width", self.width_of_shoulder()),
            ("body side", self.length_of_body_side()),
            ("sleeve side", self.length_of_sleeve_side()),
        ];
        if let Some((name, value)) = derived.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ChartError::InconsistentDimensions(format!(
                "{name} works out to {value:.3}; check the body, neck and sleeve measurements"
            )));
        }

        let below_hem = self.length_of_body - self.length_of_ribbed_hem;
        let necks = [
            ("length_of_front_neck_drop", self.length_of_front_neck_drop),
            ("length_of_back_neck_drop", self.length_of_back_neck_drop),
        ];
        if let Some((field, value)) = necks.iter().find(|(_, value)| *value >= below_hem) {
            return Err(ChartError::InconsistentDimensions(format!(
                "{field} of {value:.3} reaches the ribbed hem, which starts {below_hem:.3} below the shoulders"
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn stitch_width(&self) -> f64 {
        self.gauge.stitch_width()
    }

    #[inline]
    pub fn stitch_height(&self) -> f64 {
        self.gauge.stitch_height()
    }

    /// Underarm to the top of the ribbed hem.
    pub fn length_of_body_side(&self) -> f64 {
        self.length_of_body
            - self.length_of_shoulder_drop
            - self.length_of_vertical_armhole()
            - self.length_of_ribbed_hem
    }

    /// Height of the armhole; matches the sleeve half-width so the cap fits.
    pub fn length_of_vertical_armhole(&self) -> f64 {
        whole_steps(self.width_of_sleeve, self.stitch_height()) as f64 * self.stitch_height()
    }

    /// Depth of the armhole cut-in, one tenth of the body width.
    pub fn width_of_horizontal_armhole(&self) -> f64 {
        whole_steps(self.width_of_body * 0.1, self.stitch_width()) as f64 * self.stitch_width()
    }

    /// One shoulder, from armhole to neckline.
    pub fn width_of_shoulder(&self) -> f64 {
        (self.width_of_body - self.width_of_horizontal_armhole() * 2.0 - self.width_of_neck) / 2.0
    }

    /// Sleeve cap height, twice the armhole cut-in.
    pub fn length_of_sleeve_cap(&self) -> f64 {
        whole_steps(self.width_of_horizontal_armhole() * 2.0, self.stitch_height()) as f64
            * self.stitch_height()
    }

    /// Cap bottom to the top of the ribbed cuff.
    pub fn length_of_sleeve_side(&self) -> f64 {
        self.length_of_sleeve - self.length_of_sleeve_cap() - self.length_of_ribbed_cuff
    }

    pub fn rows_of_body(&self) -> usize {
        self.rows(self.length_of_body)
    }

    pub fn rows_of_shoulder_drop(&self) -> usize {
        self.rows(self.length_of_shoulder_drop)
    }

    pub fn rows_of_ribbed_hem(&self) -> usize {
        self.rows(self.length_of_ribbed_hem)
    }

    pub fn rows_of_sleeve(&self) -> usize {
        self.rows(self.length_of_sleeve)
    }

    pub fn rows_of_ribbed_cuff(&self) -> usize {
        self.rows(self.length_of_ribbed_cuff)
    }

    pub fn cols_of_body(&self) -> usize {
        self.cols(self.width_of_body)
    }

    pub fn cols_of_neck(&self) -> usize {
        self.cols(self.width_of_neck)
    }

    pub fn cols_of_shoulder(&self) -> usize {
        self.cols(self.width_of_shoulder())
    }

    fn rows(&self, length: f64) -> usize {
        whole_steps(length, self.stitch_height())
    }

    fn cols(&self, width: f64) -> usize {
        whole_steps(width, self.stitch_width())
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "gauge: {} x {} per {:?} swatch", self.gauge.horizontal, self.gauge.vertical, self.gauge.unit)?;
        writeln!(f, "stitch: {:.4} x {:.4}", self.stitch_width(), self.stitch_height())?;
        writeln!(f, "body: {:.3} long ({} rows), {:.3} wide ({} sts)",
            self.length_of_body, self.rows_of_body(), self.width_of_body, self.cols_of_body())?;
        writeln!(f, "shoulder drop: {:.3} ({} rows), shoulder: {:.3} ({} sts)",
            self.length_of_shoulder_drop, self.rows_of_shoulder_drop(),
            self.width_of_shoulder(), self.cols_of_shoulder())?;
        writeln!(f, "neck: {:.3} wide ({} sts), front drop {:.3}, back drop {:.3}",
            self.width_of_neck, self.cols_of_neck(),
            self.length_of_front_neck_drop, self.length_of_back_neck_drop)?;
        writeln!(f, "armhole: {:.3} deep, {:.3} tall; body side {:.3}; hem rib {:.3} ({} rows)",
            self.width_of_horizontal_armhole(), self.length_of_vertical_armhole(),
            self.length_of_body_side(), self.length_of_ribbed_hem, self.rows_of_ribbed_hem())?;
        write!(f, "sleeve: {:.3} long ({} rows), half-width {:.3}, cuff {:.3}, cap {:.3}, side {:.3}, cuff rib {:.3} ({} rows)",
            self.length_of_sleeve, self.rows_of_sleeve(), self.width_of_sleeve, self.width_of_cuff,
            self.length_of_sleeve_cap(), self.length_of_sleeve_side(),
            self.length_of_ribbed_cuff, self.rows_of_ribbed_cuff())
    }
}

/// Rounds lengths down onto the stitch grid.
struct Snapper {
    gauge: Gauge,
    is_odd: bool,
}

impl Snapper {
    /// Whole number of rows.
    fn rows(&self, length: f64) -> f64 {
        let sh = self.gauge.stitch_height();
        whole_steps(length, sh) as f64 * sh
    }

    /// Even number of stitches, or even + 1 when `is_odd`.
    fn stitches_with_parity(&self, width: f64) -> f64 {
        let sw = self.gauge.stitch_width();
        let pairs = whole_steps(width, sw * 2.0) as f64;
        let extra = if self.is_odd { 1.0 } else { 0.0 };
        (pairs * 2.0 + extra) * sw
    }

    /// Half-widths: whole stitches, plus half a stitch when `is_odd` so the
    /// full width ends up odd.
    fn half_width(&self, width: f64) -> f64 {
        let sw = self.gauge.stitch_width();
        let whole = whole_steps(width, sw) as f64 * sw;
        if self.is_odd { whole + sw / 2.0 } else { whole }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gauge::Unit;

    /// 20 sts x 20 rows per 10 cm: every stitch is 0.5 x 0.5 cm.
    pub(crate) fn sample_raw() -> RawDimensions {
        RawDimensions {
            gauge: Gauge::new(Unit::Cm, 20.0, 20.0).unwrap(),
            length_of_body: 60.2,
            length_of_shoulder_drop: 2.0,
            length_of_ribbed_hem: 5.0,
            length_of_front_neck_drop: 7.0,
            length_of_back_neck_drop: 2.0,
            width_of_body: 50.3,
            width_of_neck: 18.0,
            length_of_sleeve: 50.0,
            length_of_ribbed_cuff: 5.0,
            width_of_sleeve: 18.2,
            width_of_cuff: 9.0,
            garment_type: GarmentType::CrewNeckSweater,
            is_odd: false,
        }
    }

    #[test]
    fn snaps_lengths_down_to_rows() {
        let dims = Dimensions::snap(&sample_raw()).unwrap();
        assert!((dims.length_of_body - 60.0).abs() < 1e-9);
        assert_eq!(dims.rows_of_body(), 120);
    }

    #[test]
    fn snaps_widths_to_even_stitches() {
        let dims = Dimensions::snap(&sample_raw()).unwrap();
        // 50.3 cm = 100.6 sts -> 100 sts
        assert!((dims.width_of_body - 50.0).abs() < 1e-9);
        assert_eq!(dims.cols_of_body() % 2, 0);
        // half-widths keep whole stitches
        assert!((dims.width_of_sleeve - 18.0).abs() < 1e-9);
    }

    #[test]
    fn odd_preference_adds_a_stitch() {
        let mut raw = sample_raw();
        raw.is_odd = true;
        let dims = Dimensions::snap(&raw).unwrap();
        assert_eq!(dims.cols_of_body(), 101);
        assert_eq!(dims.cols_of_body() % 2, 1);
        // sleeve half-width gets half a stitch: full sleeve is 73 sts
        assert!((dims.width_of_sleeve * 2.0 / dims.stitch_width() - 73.0).abs() < 1e-9);
    }

    #[test]
    fn derived_lengths() {
        let dims = Dimensions::snap(&sample_raw()).unwrap();
        assert!((dims.width_of_horizontal_armhole() - 5.0).abs() < 1e-9);
        assert!((dims.length_of_vertical_armhole() - 18.0).abs() < 1e-9);
        assert!((dims.width_of_shoulder() - 11.0).abs() < 1e-9);
        assert!((dims.length_of_body_side() - 35.0).abs() < 1e-9);
        assert!((dims.length_of_sleeve_cap() - 10.0).abs() < 1e-9);
        assert!((dims.length_of_sleeve_side() - 35.0).abs() < 1e-9);
        assert_eq!(dims.cols_of_shoulder(), 22);
        assert_eq!(dims.rows_of_shoulder_drop(), 4);
    }

    #[test]
    fn rejects_non_positive_measurement() {
        let mut raw = sample_raw();
        raw.width_of_neck = 0.0;
        let err = Dimensions::snap(&raw).unwrap_err();
        assert!(matches!(err, ChartError::InvalidMeasurement { field: "width_of_neck", .. }));
    }

    #[test]
    fn rejects_neck_wider_than_body() {
        let mut raw = sample_raw();
        raw.width_of_neck = 45.0;
        assert!(matches!(Dimensions::snap(&raw), Err(ChartError::InconsistentDimensions(_))));
    }

    #[test]
    fn rejects_neck_drop_past_the_hem() {
        let mut raw = sample_raw();
        raw.length_of_front_neck_drop = 64.0;
        assert!(matches!(Dimensions::snap(&raw), Err(ChartError::InconsistentDimensions(_))));

        // body 60 less a 5 hem leaves 55 for the back neck to stay above
        let mut raw = sample_raw();
        raw.length_of_back_neck_drop = 55.0;
        assert!(matches!(Dimensions::snap(&raw), Err(ChartError::InconsistentDimensions(_))));
        raw.length_of_back_neck_drop = 54.5;
        assert!(Dimensions::snap(&raw).is_ok());
    }

    #[test]
    fn rejects_measurement_below_one_stitch() {
        let mut raw = sample_raw();
        raw.width_of_neck = 0.6; // less than two stitches rounds to zero pairs
        assert!(matches!(Dimensions::snap(&raw), Err(ChartError::InconsistentDimensions(_))));
    }

    #[test]
    fn deserializes_request_body() {
        let json = r#"{
            "gauge": {"metric": "cm", "vertical": 20, "horizontal": 20},
            "length_of_body": 60, "length_of_shoulder_drop": 2, "length_of_ribbed_hem": 5,
            "length_of_front_neck_drop": 7, "length_of_back_neck_drop": 2,
            "width_of_body": 50, "width_of_neck": 18,
            "length_of_sleeve": 50, "length_of_ribbed_cuff": 5,
            "width_of_sleeve": 18, "width_of_cuff": 9,
            "type": "v-neck-cardigan"
        }"#;
        let raw: RawDimensions = serde_json::from_str(json).unwrap();
        assert_eq!(raw.garment_type, GarmentType::VNeckCardigan);
        assert!(!raw.is_odd);
        assert!(Dimensions::snap(&raw).is_ok());
    }
}
