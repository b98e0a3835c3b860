//! Knitting gauge and the size of a single stitch.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Unit the measurements (and the gauge swatch) are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Cm,
    Inch,
}

impl Unit {
    /// Side of the gauge swatch in this unit.
    ///
    /// Imperial gauge is counted over 4 inches, which is 10.16 cm.
    pub fn swatch_size(&self) -> f64 {
        match self {
            Unit::Cm => 10.0,
            Unit::Inch => 10.16,
        }
    }
}

/// Stitches and rows counted over one gauge swatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Unit of the swatch and of every measurement.
    #[serde(default, rename = "metric")]
    pub unit: Unit,
    /// Rows per swatch.
    pub vertical: f64,
    /// Stitches per swatch.
    pub horizontal: f64,
}

impl Gauge {
    /// Create a gauge, rejecting counts that would give a zero or infinite stitch.
    pub fn new(unit: Unit, horizontal: f64, vertical: f64) -> Result<Self> {
        let gauge = Self { unit, vertical, horizontal };
        gauge.validate()?;
        Ok(gauge)
    }

    /// Gauge whose stitches measure exactly `stitch_width` by `stitch_height` cm.
    pub fn from_stitch_size(stitch_width: f64, stitch_height: f64) -> Result<Self> {
        if !(stitch_width > 0.0 && stitch_height > 0.0) {
            return Err(ChartError::InvalidGauge(format!(
                "stitch size must be positive, got {stitch_width}x{stitch_height}"
            )));
        }
        Self::new(Unit::Cm, 10.0 / stitch_width, 10.0 / stitch_height)
    }

    /// Check the invariant for a gauge that came in through deserialization.
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [("horizontal", self.horizontal), ("vertical", self.vertical)] {
            if !count.is_finite() || count <= 0.0 {
                return Err(ChartError::InvalidGauge(format!(
                    "{name} count must be a positive number, got {count}"
                )));
            }
        }
        Ok(())
    }

    /// Real-world width of one stitch.
    #[inline]
    pub fn stitch_width(&self) -> f64 {
        self.unit.swatch_size() / self.horizontal
    }

    /// Real-world height of one stitch (one row).
    #[inline]
    pub fn stitch_height(&self) -> f64 {
        self.unit.swatch_size() / self.vertical
    }
}

/// Number of whole `step`s in `length`.
///
/// Lengths in this crate are snapped to stitch multiples with floating point
/// arithmetic, so `length / step` can land a hair below an integer. A small
/// relative tolerance keeps such values from losing a stitch.
pub fn whole_steps(length: f64, step: f64) -> usize {
    let ratio = length / step;
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    (ratio + 1e-9 * ratio.max(1.0)).floor() as usize
}
