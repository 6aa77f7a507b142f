use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const AXIS: Rgba<u8> = Rgba([100, 100, 100, 255]);
const SERIES: Rgba<u8> = Rgba([0, 200, 120, 255]);

const MARGIN: u32 = 20;

/// Line chart of one value per sample index. The y axis starts at zero and
/// is scaled to the series maximum.
pub fn line_chart(series: &[f64], width: u32, height: u32) -> RgbaImage {
    let width = width.max(2 * MARGIN + 2);
    let height = height.max(2 * MARGIN + 2);

    let mut image = RgbaImage::new(width, height);
    for pixel in image.pixels_mut() {
        *pixel = BACKGROUND;
    }

    let left = MARGIN;
    let top = MARGIN;
    let right = width - MARGIN;
    let bottom = height - MARGIN;

    // Axes
    draw_line_segment_mut(
        &mut image,
        (left as f32, top as f32),
        (left as f32, bottom as f32),
        AXIS,
    );
    draw_line_segment_mut(
        &mut image,
        (left as f32, bottom as f32),
        (right as f32, bottom as f32),
        AXIS,
    );

    if series.is_empty() {
        return image;
    }

    let max = series.iter().cloned().fold(f64::MIN, f64::max).max(1e-9);
    let plot_width = (right - left) as f64;
    let plot_height = (bottom - top) as f64;
    let step = if series.len() > 1 {
        plot_width / (series.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<(f32, f32)> = series
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = left as f64 + step * i as f64;
            let y = bottom as f64 - (value / max) * plot_height;
            (x as f32, y as f32)
        })
        .collect();

    for pair in points.windows(2) {
        draw_line_segment_mut(&mut image, pair[0], pair[1], SERIES);
    }

    // Point markers so single samples and flat series stay visible
    for &(x, y) in &points {
        draw_filled_rect_mut(
            &mut image,
            Rect::at(x as i32 - 1, y as i32 - 1).of_size(3, 3),
            SERIES,
        );
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_pixels(image: &RgbaImage) -> usize {
        image.pixels().filter(|pixel| **pixel == SERIES).count()
    }

    #[test]
    fn test_dimensions() {
        let image = line_chart(&[1.0, 2.0, 3.0], 800, 480);
        assert_eq!(image.dimensions(), (800, 480));
    }

    #[test]
    fn test_empty_series_renders_axes_only() {
        let image = line_chart(&[], 200, 100);
        assert_eq!(series_pixels(&image), 0);
    }

    #[test]
    fn test_single_point_gets_a_marker() {
        let image = line_chart(&[1.5], 200, 100);
        assert!(series_pixels(&image) > 0);
    }

    #[test]
    fn test_line_is_drawn() {
        let image = line_chart(&[1.0, 2.0, 1.5, 3.0, 2.5], 400, 200);
        // Polyline plus markers should cover clearly more than the markers alone
        assert!(series_pixels(&image) > 5 * 9);
    }

    #[test]
    fn test_tiny_dimensions_are_clamped() {
        let image = line_chart(&[1.0], 1, 1);
        assert_eq!(image.dimensions(), (2 * MARGIN + 2, 2 * MARGIN + 2));
    }
}
