use std::fmt;

use image::{Pixel, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::errors::{Result, SimulationError};

/// Sizes above this are drawn at this size.
pub const MAX_FONT_SIZE: f32 = 512.0;

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Rasterizes label text straight into an RGBA image.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFont")
    }
}

impl LabelFont {
    /// The monospace font shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_bytes(BUNDLED_FONT)
    }

    pub fn from_bytes(data: &'static [u8]) -> Result<Self> {
        let font = Font::try_from_bytes(data).ok_or_else(|| {
            SimulationError::RenderFailure("label font data is not a valid TrueType font".to_string())
        })?;
        Ok(LabelFont { font })
    }

    /// Advance width of `text` in whole pixels.
    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        let scale = match checked_scale(size) {
            Some(scale) => scale,
            None => return 0,
        };

        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| {
                let advance = glyph.unpositioned().h_metrics().advance_width;
                (glyph.position().x + advance).ceil().max(0.0) as u32
            })
            .unwrap_or(0)
    }

    /// Height of one line from ascender to descender.
    pub fn text_height(&self, size: f32) -> u32 {
        match checked_scale(size) {
            Some(scale) => {
                let metrics = self.font.v_metrics(scale);
                (metrics.ascent - metrics.descent).ceil().max(0.0) as u32
            }
            None => 0,
        }
    }

    /// Draws `text` with its top-left corner at (`x`, `y`). Anything outside
    /// the image is clipped.
    pub fn draw_text(
        &self,
        image: &mut RgbaImage,
        x: u32,
        y: u32,
        text: &str,
        color: Rgba<u8>,
        size: f32,
    ) {
        let scale = match checked_scale(size) {
            Some(scale) => scale,
            None => return,
        };
        if x >= image.width() || y >= image.height() {
            return;
        }

        let width = image.width() as i64;
        let height = image.height() as i64;
        let ascent = self.font.v_metrics(scale).ascent;

        // Laid out at the origin; the offset is applied in integer space.
        for glyph in self.font.layout(text, scale, point(0.0, ascent)) {
            let bounds = match glyph.pixel_bounding_box() {
                Some(bounds) => bounds,
                None => continue,
            };
            let left = x as i64 + bounds.min.x as i64;
            let top = y as i64 + bounds.min.y as i64;
            if left >= width {
                break;
            }

            glyph.draw(|gx, gy, coverage| {
                let px = left + gx as i64;
                let py = top + gy as i64;
                if coverage <= 0.0 || px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }

                let mut ink = color;
                ink[3] = (color[3] as f32 * coverage.min(1.0)).round() as u8;
                image.get_pixel_mut(px as u32, py as u32).blend(&ink);
            });
        }
    }
}

fn checked_scale(size: f32) -> Option<Scale> {
    if size.is_finite() && size > 0.0 {
        Some(Scale::uniform(size.min(MAX_FONT_SIZE)))
    } else {
        None
    }
}

/// Alpha-blends `color` over the rectangle, clipped to the image.
pub fn fill_rect(
    image: &mut RgbaImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgba<u8>,
) {
    let x_end = x.saturating_add(width).min(image.width());
    let y_end = y.saturating_add(height).min(image.height());

    for py in y..y_end {
        for px in x..x_end {
            image.get_pixel_mut(px, py).blend(&color);
        }
    }
}
