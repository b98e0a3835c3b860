//! Garment piece outlines drawn from snapped measurements.
//!
//! Each piece is traced clockwise on screen from the underarm, in the same
//! relative moves a hand-drafted pattern would use. The curves are cubic
//! Béziers whose control points sit on the bounding corners of each curve,
//! which gives the rounded armholes, neckline and sleeve cap.

use crate::dimensions::Dimensions;
use crate::outline::{Outline, OutlineBuilder};

/// Width of the stepped part of one shoulder slope.
///
/// The slope drops `rows_of_shoulder_drop` rows over the shoulder stitches;
/// the last step is knitted flat, so the horizontal run at the neck end
/// is half a step wide, rounded to whole stitches.
pub fn width_of_shoulder_line(dims: &Dimensions) -> f64 {
    let drop_rows = dims.rows_of_shoulder_drop();
    if drop_rows == 0 {
        return 0.0;
    }
    let stitches_per_step = dims.cols_of_shoulder() / drop_rows;
    (stitches_per_step / 2) as f64 * dims.stitch_width()
}

/// Front body, with the deeper front neck drop.
pub fn front_body(dims: &Dimensions) -> Outline {
    body(dims, dims.length_of_front_neck_drop)
}

/// Back body, with the shallow back neck drop.
pub fn back_body(dims: &Dimensions) -> Outline {
    body(dims, dims.length_of_back_neck_drop)
}

fn body(dims: &Dimensions, neck_drop: f64) -> Outline {
    let ha = dims.width_of_horizontal_armhole();
    let va = dims.length_of_vertical_armhole();
    let sd = dims.length_of_shoulder_drop;
    let sw = dims.width_of_shoulder();
    let hs = width_of_shoulder_line(dims);
    let half_neck = dims.width_of_neck / 2.0;
    let nd = neck_drop;

    OutlineBuilder::new(0.0, sd + va)
        // left armhole
        .cubic_by((ha, 0.0), (ha, -va / 2.0), (ha, -va / 2.0))
        .vertical_by(-va / 2.0)
        // left shoulder
        .line_by(sw - hs, -sd)
        .horizontal_by(hs)
        // neckline
        .cubic_by((0.0, nd), (half_neck, nd), (half_neck, nd))
        .cubic_by((half_neck, 0.0), (half_neck, -nd), (half_neck, -nd))
        // right shoulder
        .horizontal_by(hs)
        .line_by(sw - hs, sd)
        // right armhole
        .vertical_by(va / 2.0)
        .cubic_by((0.0, va / 2.0), (ha, va / 2.0), (ha, va / 2.0))
        // side seam, hem
        .vertical_by(dims.length_of_body_side() + dims.length_of_ribbed_hem)
        .horizontal_by(-dims.width_of_body)
        .close()
}

/// Sleeve, cap on top and cuff at the bottom.
pub fn sleeve(dims: &Dimensions) -> Outline {
    let ws = dims.width_of_sleeve;
    let wc = dims.width_of_cuff;
    let cap = dims.length_of_sleeve_cap();
    let cuff = dims.length_of_ribbed_cuff;

    OutlineBuilder::new(0.0, cap)
        .cubic_by((ws / 2.0, 0.0), (ws / 2.0, -cap), (ws, -cap))
        .cubic_by((ws / 2.0, 0.0), (ws / 2.0, cap), (ws, cap))
        .line_by(wc - ws, dims.length_of_sleeve_side())
        .vertical_by(cuff)
        .horizontal_by(-2.0 * wc)
        .vertical_by(-cuff)
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::tests::sample_raw;
    use crate::outline::Segment;

    fn dims() -> Dimensions {
        Dimensions::snap(&sample_raw()).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn shoulder_line_width() {
        // 22 shoulder sts over 4 drop rows: 5 per step, half of that is 2 sts
        assert_close(width_of_shoulder_line(&dims()), 1.0);

        // a drop steeper than one stitch per row leaves no flat run
        let mut raw = sample_raw();
        raw.length_of_shoulder_drop = 12.0;
        let steep = Dimensions::snap(&raw).unwrap();
        assert_eq!(steep.rows_of_shoulder_drop(), 24);
        assert_close(width_of_shoulder_line(&steep), 0.0);
    }

    #[test]
    fn body_spans_full_width_and_length() {
        let dims = dims();
        for outline in [front_body(&dims), back_body(&dims)] {
            assert!(outline.is_closed());
            let bounds = outline.bounding_box().unwrap();
            assert_close(bounds.min_x, 0.0);
            assert_close(bounds.min_y, 0.0);
            assert_close(bounds.width(), dims.width_of_body);
            assert_close(bounds.height(), dims.length_of_body);
        }
    }

    #[test]
    fn body_closes_along_the_side_seam() {
        let outline = front_body(&dims());
        let Some(Segment::Line(last)) = outline.segments().last() else {
            panic!("expected a closing line");
        };
        assert_close(last.from.x, 0.0);
        assert_close(last.from.y, 60.0);
        assert_close(last.to.y, 2.0 + 18.0);
    }

    #[test]
    fn front_neck_is_deeper_than_back() {
        let dims = dims();
        let lowest_neck_point = |outline: &Outline| {
            outline
                .segments()
                .iter()
                .filter_map(|s| match s {
                    Segment::Cubic(c) if c.from.y == 0.0 => Some(c.to.y),
                    _ => None,
                })
                .fold(f64::NEG_INFINITY, f64::max)
        };
        assert_close(lowest_neck_point(&front_body(&dims)), 7.0);
        assert_close(lowest_neck_point(&back_body(&dims)), 2.0);
    }

    #[test]
    fn sleeve_spans_both_halves() {
        let dims = dims();
        let outline = sleeve(&dims);
        assert!(outline.is_closed());
        let bounds = outline.bounding_box().unwrap();
        assert_close(bounds.width(), 2.0 * dims.width_of_sleeve);
        assert_close(bounds.height(), dims.length_of_sleeve);
        // cuff is centred under the cap
        let cuff_left = outline.segments()[4].end_point();
        assert_close(cuff_left.x, dims.width_of_sleeve - dims.width_of_cuff);
    }
}
