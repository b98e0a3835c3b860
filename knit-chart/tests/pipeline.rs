//! End-to-end chart generation over realistic measurements.

use knit_chart::{
    Chart, Dimensions, GarmentPiece, Gauge, OutlineBuilder, RawDimensions, Symbol, derive_symbols,
    generate_charts, rasterize, workbook_to_buffer,
};

fn measurements() -> RawDimensions {
    serde_json::from_str(
        r#"{
            "gauge": {"metric": "cm", "vertical": 28, "horizontal": 22},
            "length_of_body": 62, "length_of_shoulder_drop": 2.5, "length_of_ribbed_hem": 6,
            "length_of_front_neck_drop": 8, "length_of_back_neck_drop": 2,
            "width_of_body": 52, "width_of_neck": 19,
            "length_of_sleeve": 48, "length_of_ribbed_cuff": 6,
            "width_of_sleeve": 17, "width_of_cuff": 10,
            "type": "crew-neck-sweater"
        }"#,
    )
    .unwrap()
}

fn widths(chart: &Chart) -> Vec<usize> {
    chart
        .grid()
        .iter_rows()
        .map(|row| row.iter().filter(|s| **s != Symbol::Empty).count())
        .collect()
}

#[test]
fn frozen_rectangle_chart() {
    let outline = OutlineBuilder::new(0.0, 0.0).horizontal_by(40.0).vertical_by(20.0).horizontal_by(-40.0).close();
    let gauge = Gauge::from_stitch_size(10.0, 10.0).unwrap();

    let occupancy = rasterize(&outline, &gauge);
    assert_eq!(occupancy.to_codes(), vec![vec![1, 1, 1, 1], vec![1, 1, 1, 1]]);

    let chart = derive_symbols(occupancy).unwrap();
    assert_eq!(chart.to_codes(), vec![vec![0, 0, 0, 0], vec![60, 60, 60, 60], vec![1, 1, 1, 1]]);
}

#[test]
fn every_piece_is_a_valid_chart() {
    let dims = Dimensions::snap(&measurements()).unwrap();
    let charts = generate_charts(&dims).unwrap();

    for (piece, chart) in charts.iter() {
        assert!(!chart.grid().contains_transient(), "{piece} still has markers");
        assert!(chart.grid().row(0).iter().all(|s| *s == Symbol::Empty), "{piece} top row");
        assert!(chart.grid().count(Symbol::BindOff) > 0, "{piece} is never bound off");

        // rib alternates across the full bottom row
        let bottom = chart.grid().row(chart.rows() - 1);
        let knitted: Vec<_> = bottom.iter().filter(|s| **s != Symbol::Empty).collect();
        assert!(knitted.iter().all(|s| s.is_plain()), "{piece} bottom row is not rib");
        assert!(bottom.contains(&Symbol::Purl));
    }
}

#[test]
fn body_is_full_width_below_the_armholes() {
    let dims = Dimensions::snap(&measurements()).unwrap();
    let charts = generate_charts(&dims).unwrap();
    let front = charts.get(GarmentPiece::FrontBody).unwrap();

    assert_eq!(front.cols(), dims.cols_of_body());
    let widths = widths(front);
    let below_armhole = widths.len() - dims.rows_of_ribbed_hem() - 1;
    assert_eq!(widths[below_armhole], dims.cols_of_body());
    // armholes and neck make the top narrower than the hem
    assert!(widths[2] < widths[widths.len() - 1]);
}

#[test]
fn front_neck_is_lower_than_back_neck() {
    let dims = Dimensions::snap(&measurements()).unwrap();
    let charts = generate_charts(&dims).unwrap();
    let centre = dims.cols_of_body() / 2;

    let first_stitch_in_centre = |piece| {
        let chart = charts.get(piece).unwrap();
        (0..chart.rows()).find(|&r| chart.get(r, centre) != Symbol::Empty).unwrap()
    };
    assert!(first_stitch_in_centre(GarmentPiece::FrontBody) > first_stitch_in_centre(GarmentPiece::BackBody));
}

#[test]
fn sleeve_tapers_toward_the_cuff() {
    let dims = Dimensions::snap(&measurements()).unwrap();
    let charts = generate_charts(&dims).unwrap();
    let sleeve = charts.get(GarmentPiece::Sleeve).unwrap();

    let widths = widths(sleeve);
    let cap_bottom = (dims.length_of_sleeve_cap() / dims.stitch_height()).round() as usize + 2;
    let cuff = widths[widths.len() - 1];
    assert!(widths[cap_bottom] > cuff);
    assert!(sleeve.grid().count(Symbol::K2tog) + sleeve.grid().count(Symbol::Ssk) > 0);
}

#[test]
fn workbook_has_a_sheet_per_piece() {
    let dims = Dimensions::snap(&measurements()).unwrap();
    let charts = generate_charts(&dims).unwrap();
    let bytes = workbook_to_buffer(&charts).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    assert!(bytes.len() > 1000);
}
