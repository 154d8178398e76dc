use super::*;

fn decode_chart(png: &[u8]) -> RgbImage {
    image::load_from_memory(png).expect("decode chart png").to_rgb8()
}

// Mid-height row inside the bar band, chosen where the dashed threshold
// marker leaves gaps so bar pixels can be counted unobstructed.
const SAMPLE_ROW: u32 = 30;

fn count_in_row(chart: &RgbImage, row: u32, color: Rgb<u8>) -> u32 {
    (0..chart.width())
        .filter(|&x| chart.get_pixel(x, row) == &color)
        .count() as u32
}

#[test]
fn test_chart_is_png_with_expected_dimensions() {
    let png = render_confidence_chart(72.0, 0.65).expect("render");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let chart = decode_chart(&png);
    assert_eq!(chart.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
}

#[test]
fn test_bar_color_above_threshold() {
    let png = render_confidence_chart(80.0, 0.65).expect("render");
    let chart = decode_chart(&png);

    assert!(count_in_row(&chart, SAMPLE_ROW, Rgb([0, 0, 255])) > 0);
    assert_eq!(count_in_row(&chart, SAMPLE_ROW, Rgb([255, 0, 0])), 0);
}

#[test]
fn test_bar_color_below_threshold() {
    let png = render_confidence_chart(40.0, 0.65).expect("render");
    let chart = decode_chart(&png);

    assert!(count_in_row(&chart, SAMPLE_ROW, Rgb([255, 0, 0])) > 0);
    assert_eq!(count_in_row(&chart, SAMPLE_ROW, Rgb([0, 0, 255])), 0);
}

#[test]
fn test_bar_color_at_exact_threshold_matches_classifier() {
    // confidence/100 == threshold is NOT above, same strict rule as the
    // classifier.
    let png = render_confidence_chart(65.0, 0.65).expect("render");
    let chart = decode_chart(&png);

    assert!(count_in_row(&chart, SAMPLE_ROW, Rgb([255, 0, 0])) > 0);
    assert_eq!(count_in_row(&chart, SAMPLE_ROW, Rgb([0, 0, 255])), 0);
}

#[test]
fn test_bar_length_proportional_to_confidence() {
    let png_half = render_confidence_chart(50.0, 0.65).expect("render");
    let png_quarter = render_confidence_chart(25.0, 0.65).expect("render");

    let half = count_in_row(&decode_chart(&png_half), SAMPLE_ROW, Rgb([255, 0, 0]));
    let quarter = count_in_row(&decode_chart(&png_quarter), SAMPLE_ROW, Rgb([255, 0, 0]));

    assert!(half > 0);
    let ratio = half as f32 / quarter as f32;
    assert!(
        (ratio - 2.0).abs() < 0.1,
        "50% bar should be twice the 25% bar, got ratio {}",
        ratio
    );
}

#[test]
fn test_zero_confidence_draws_no_bar() {
    let png = render_confidence_chart(0.0, 0.65).expect("render");
    let chart = decode_chart(&png);

    assert_eq!(count_in_row(&chart, SAMPLE_ROW, Rgb([255, 0, 0])), 0);
    assert_eq!(count_in_row(&chart, SAMPLE_ROW, Rgb([0, 0, 255])), 0);
}

#[test]
fn test_overflowing_confidence_clamps_drawing() {
    // Values past the axis end are drawn clamped; they must not panic or
    // exceed the 100% bar length.
    let png_full = render_confidence_chart(100.0, 0.65).expect("render");
    let png_over = render_confidence_chart(130.0, 0.65).expect("render");

    let full = count_in_row(&decode_chart(&png_full), SAMPLE_ROW, Rgb([0, 0, 255]));
    let over = count_in_row(&decode_chart(&png_over), SAMPLE_ROW, Rgb([0, 0, 255]));
    assert_eq!(full, over);
}

#[test]
fn test_threshold_marker_is_drawn() {
    let png = render_confidence_chart(40.0, 0.65).expect("render");
    let chart = decode_chart(&png);

    let green = chart
        .pixels()
        .filter(|p| **p == Rgb([0, 128, 0]))
        .count();
    assert!(green > 0, "Threshold marker should be visible");
}

#[test]
fn test_base64_round_trip() {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    let png = render_confidence_chart(55.0, 0.65).expect("render");
    let encoded = encode_chart_base64(&png);
    let decoded = STANDARD.decode(encoded).expect("decode base64");
    assert_eq!(decoded, png);
}
