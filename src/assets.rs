//! Background and marker images for the renderer.
//!
//! Images are either decoded from disk and resized to the requested size, or
//! drawn procedurally when no file is configured.

use std::path::Path;

use image::imageops::FilterType;
use image::{GenericImageView, Rgba, RgbaImage};
use log::{debug, warn};

use crate::errors::{Result, SimulationError};
use crate::rendering_system::canvas::Canvas;

const SKY_TOP: [u8; 3] = [35, 90, 170];
const SKY_BOTTOM: [u8; 3] = [170, 215, 250];
const CANOPY: Rgba<u8> = Rgba([230, 80, 40, 255]);
const CANOPY_STRIPE: Rgba<u8> = Rgba([250, 240, 230, 255]);
const RIGGING: Rgba<u8> = Rgba([40, 40, 40, 255]);
const JUMPER: Rgba<u8> = Rgba([30, 30, 60, 255]);

/// Decodes `path` and resizes it to exactly `width`x`height`.
pub fn load_image(path: &Path, width: u32, height: u32) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| {
        SimulationError::RenderFailure(format!("cannot load {}: {}", path.display(), e))
    })?;

    if image.width() != width || image.height() != height {
        debug!(
            "Resizing {} from {}x{} to {}x{}",
            path.display(),
            image.width(),
            image.height(),
            width,
            height
        );
    }

    Ok(image.resize_exact(width, height, FilterType::Triangle).to_rgba8())
}

/// Vertical sky gradient, darker at the top.
pub fn sky_background(width: u32, height: u32) -> RgbaImage {
    let span = height.saturating_sub(1).max(1) as f64;
    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f64 / span;
        let channel = |i: usize| {
            (SKY_TOP[i] as f64 + (SKY_BOTTOM[i] as f64 - SKY_TOP[i] as f64) * t).round() as u8
        };
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}

/// A striped canopy over a small jumper on a transparent field.
pub fn parachute_sprite(width: u32, height: u32) -> RgbaImage {
    let mut sprite = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let w = width as f64;
    let h = height as f64;

    let center_x = w / 2.0;
    let canopy_base = h * 0.45;
    let radius_x = w / 2.0;
    let radius_y = h * 0.45;
    let body_top = h * 0.72;
    let body_half_width = (w * 0.08).max(1.0);

    for (x, y, pixel) in sprite.enumerate_pixels_mut() {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;

        if py <= canopy_base {
            let dx = (px - center_x) / radius_x;
            let dy = (canopy_base - py) / radius_y;
            if dx * dx + dy * dy <= 1.0 {
                let stripe = ((dx + 1.0) * 3.0).floor() as i64 % 2 == 1;
                *pixel = if stripe { CANOPY_STRIPE } else { CANOPY };
            }
        } else if py < body_top {
            // Two lines from the canopy edges down to the jumper's shoulders.
            let t = (py - canopy_base) / (body_top - canopy_base);
            let left = (1.0 - t) * (center_x - radius_x + 1.0) + t * (center_x - body_half_width);
            let right = (1.0 - t) * (center_x + radius_x - 1.0) + t * (center_x + body_half_width);
            if (px - left).abs() < 0.75 || (px - right).abs() < 0.75 {
                *pixel = RIGGING;
            }
        } else if (px - center_x).abs() <= body_half_width {
            *pixel = JUMPER;
        }
    }

    sprite
}

/// Builds the canvas from optional image files, falling back to the
/// procedural images for any path that is not given.
pub fn build_canvas(
    background: Option<&Path>,
    marker: Option<&Path>,
    canvas_size: (u32, u32),
    marker_size: (u32, u32),
) -> Result<Canvas> {
    let (width, height) = canvas_size;
    let (marker_width, marker_height) = marker_size;

    let background = match background {
        Some(path) => load_image(path, width, height)?,
        None => {
            warn!("No background image configured, using generated sky");
            sky_background(width, height)
        }
    };
    let marker = match marker {
        Some(path) => load_image(path, marker_width, marker_height)?,
        None => {
            warn!("No marker image configured, using generated parachute");
            parachute_sprite(marker_width, marker_height)
        }
    };

    Canvas::new(background, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_gradient_gets_lighter_downward() {
        let sky = sky_background(10, 100);
        assert_eq!(sky.dimensions(), (10, 100));
        assert_eq!(*sky.get_pixel(0, 0), Rgba([35, 90, 170, 255]));
        assert_eq!(*sky.get_pixel(9, 99), Rgba([170, 215, 250, 255]));
        assert!(sky.get_pixel(5, 50)[2] > sky.get_pixel(5, 10)[2]);
    }

    #[test]
    fn test_single_row_sky_does_not_divide_by_zero() {
        let sky = sky_background(3, 1);
        assert_eq!(*sky.get_pixel(0, 0), Rgba([35, 90, 170, 255]));
    }

    #[test]
    fn test_parachute_sprite_has_canopy_and_transparency() {
        let sprite = parachute_sprite(50, 50);
        assert_eq!(sprite.dimensions(), (50, 50));

        // Crown of the canopy
        assert_eq!(sprite.get_pixel(25, 2)[3], 255);
        // Corner stays transparent
        assert_eq!(sprite.get_pixel(0, 0)[3], 0);
        // Jumper under the canopy
        assert_eq!(*sprite.get_pixel(25, 45), JUMPER);
    }

    #[test]
    fn test_build_canvas_without_files() {
        let canvas = build_canvas(None, None, (300, 800), (50, 50)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (300, 800));
        assert_eq!((canvas.marker_width(), canvas.marker_height()), (50, 50));
    }

    #[test]
    fn test_missing_file_is_render_failure() {
        let result = build_canvas(
            Some(Path::new("/nonexistent/sky_background.jpg")),
            None,
            (300, 800),
            (50, 50),
        );
        assert!(matches!(result, Err(SimulationError::RenderFailure(_))));
    }

    #[test]
    fn test_oversized_marker_is_render_failure() {
        let result = build_canvas(None, None, (30, 80), (50, 50));
        assert!(matches!(result, Err(SimulationError::RenderFailure(_))));
    }
}
