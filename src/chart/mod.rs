//! Confidence bar rendering.
//!
//! Produces the small horizontal-bar PNG embedded in analysis responses. The
//! bar color uses the SAME strict threshold comparison as the classifier, so
//! the visual verdict can never disagree with `is_authentic`.

mod error;

#[cfg(test)]
mod tests;

pub use error::ChartError;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{Rgb, RgbImage};

/// Rendered chart width in pixels.
pub const CHART_WIDTH: u32 = 500;
/// Rendered chart height in pixels.
pub const CHART_HEIGHT: u32 = 70;

const MARGIN_LEFT: u32 = 12;
const MARGIN_RIGHT: u32 = 12;
const MARGIN_TOP: u32 = 10;
const MARGIN_BOTTOM: u32 = 16;
const BAR_PADDING: u32 = 6;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BAR_ABOVE: Rgb<u8> = Rgb([0, 0, 255]);
const BAR_BELOW: Rgb<u8> = Rgb([255, 0, 0]);
const THRESHOLD_MARKER: Rgb<u8> = Rgb([0, 128, 0]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const AXIS: Rgb<u8> = Rgb([90, 90, 90]);

/// Renders a horizontal confidence bar as a PNG.
///
/// `confidence` is a 0–100 percentage; values beyond the axis are drawn
/// clamped while the reported number stays untouched. The bar is blue when
/// `confidence / 100 > threshold`, red otherwise, with a dashed green marker
/// at the threshold position.
pub fn render_confidence_chart(confidence: f32, threshold: f32) -> Result<Vec<u8>, ChartError> {
    let mut canvas = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    let plot_left = MARGIN_LEFT;
    let plot_right = CHART_WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = CHART_HEIGHT - MARGIN_BOTTOM;
    let plot_width = (plot_right - plot_left) as f32;

    // Gridlines every 20 percentage points.
    for tick in (0..=100u32).step_by(20) {
        let x = plot_left + ((tick as f32 / 100.0) * plot_width) as u32;
        draw_vline(&mut canvas, x, plot_top, plot_bottom, GRID, None);
    }

    let fraction = (confidence / 100.0).clamp(0.0, 1.0);
    let bar_color = if confidence / 100.0 > threshold {
        BAR_ABOVE
    } else {
        BAR_BELOW
    };

    let bar_end = plot_left + (fraction * plot_width).round() as u32;
    fill_rect(
        &mut canvas,
        plot_left,
        plot_top + BAR_PADDING,
        bar_end,
        plot_bottom - BAR_PADDING,
        bar_color,
    );

    // Dashed threshold marker.
    let marker_x = plot_left + ((threshold.clamp(0.0, 1.0)) * plot_width).round() as u32;
    draw_vline(
        &mut canvas,
        marker_x.min(plot_right),
        plot_top,
        plot_bottom,
        THRESHOLD_MARKER,
        Some(4),
    );

    // Baseline axis.
    for x in plot_left..=plot_right {
        canvas.put_pixel(x, plot_bottom, AXIS);
    }

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;

    Ok(bytes)
}

/// Encodes a rendered chart for embedding in a JSON payload.
pub fn encode_chart_base64(png: &[u8]) -> String {
    STANDARD.encode(png)
}

fn fill_rect(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn draw_vline(
    canvas: &mut RgbImage,
    x: u32,
    y0: u32,
    y1: u32,
    color: Rgb<u8>,
    dash: Option<u32>,
) {
    for y in y0..=y1 {
        let draw = match dash {
            Some(period) => (y / period) % 2 == 0,
            None => true,
        };
        if draw {
            canvas.put_pixel(x, y, color);
        }
    }
}
