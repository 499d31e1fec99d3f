use image::{imageops, Rgba};

use crate::constants::{LABEL_FONT_SIZE, LABEL_MARGIN};
use crate::errors::{Result, SimulationError};
use crate::trajectory_system::sample::Sample;

use super::{
    canvas::Canvas,
    frame::Frame,
    text::{fill_rect, LabelFont},
};

/// Where and how the velocity annotation is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub x: u32,
    pub y: u32,
    pub font_size: f32,
    pub padding: u32,
    pub text_color: Rgba<u8>,
    pub backing_color: Rgba<u8>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle {
            x: LABEL_MARGIN,
            y: LABEL_MARGIN,
            font_size: LABEL_FONT_SIZE,
            padding: 3,
            text_color: Rgba([255, 255, 255, 255]),
            backing_color: Rgba([0, 0, 0, 128]),
        }
    }
}

/// Turns samples into frames. Position grows downward: a position of zero
/// puts the marker's top edge on the first pixel row and `max_position`
/// puts its bottom edge on the last one.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    label: Option<(LabelStyle, LabelFont)>,
}

impl FrameRenderer {
    /// Renderer with the default velocity label in the bundled font.
    pub fn new() -> Result<Self> {
        Self::with_label(LabelStyle::default())
    }

    pub fn without_label() -> Self {
        FrameRenderer { label: None }
    }

    pub fn with_label(style: LabelStyle) -> Result<Self> {
        let font = LabelFont::bundled()?;
        Ok(FrameRenderer {
            label: Some((style, font)),
        })
    }

    pub fn label_style(&self) -> Option<&LabelStyle> {
        self.label.as_ref().map(|(style, _)| style)
    }

    pub fn render(&self, sample: &Sample, canvas: &Canvas, max_position: f64) -> Frame {
        let mut image = canvas.background().clone();

        let marker_x = marker_pixel_x(canvas.width(), canvas.marker_width());
        let marker_y = marker_pixel_y(
            sample.position,
            max_position,
            canvas.height(),
            canvas.marker_height(),
        );
        imageops::overlay(&mut image, canvas.marker(), marker_x as i64, marker_y as i64);

        let label = self.label.as_ref().map(|(style, font)| {
            let text = velocity_label(sample.velocity);
            let padding = style.padding;
            let box_width = font
                .text_width(&text, style.font_size)
                .saturating_add(padding.saturating_mul(2));
            let box_height = font
                .text_height(style.font_size)
                .saturating_add(padding.saturating_mul(2));
            fill_rect(
                &mut image,
                style.x.saturating_sub(padding),
                style.y.saturating_sub(padding),
                box_width,
                box_height,
                style.backing_color,
            );
            font.draw_text(&mut image, style.x, style.y, &text, style.text_color, style.font_size);
            text
        });

        Frame {
            image,
            sample: *sample,
            marker_x,
            marker_y,
            label,
        }
    }

    pub fn render_all<'a, I>(
        &self,
        samples: I,
        canvas: &Canvas,
        max_position: f64,
    ) -> Result<Vec<Frame>>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let frames: Vec<Frame> = samples
            .into_iter()
            .map(|sample| self.render(sample, canvas, max_position))
            .collect();

        if frames.is_empty() {
            return Err(SimulationError::EmptyFrameSequence(
                "no samples to render".to_string(),
            ));
        }

        Ok(frames)
    }
}

/// Row of the marker's top edge: `position / max_position` of the travel
/// `canvas_height − marker_height`, clamped to it. NaN positions and a
/// non-positive or non-finite `max_position` map to row 0.
pub fn marker_pixel_y(
    position: f64,
    max_position: f64,
    canvas_height: u32,
    marker_height: u32,
) -> u32 {
    let travel = canvas_height.saturating_sub(marker_height);
    if position.is_nan() || !max_position.is_finite() || max_position <= 0.0 {
        return 0;
    }

    let row = (position / max_position * travel as f64).round();
    row.clamp(0.0, travel as f64) as u32
}

/// Column of the marker's left edge, centred horizontally.
pub fn marker_pixel_x(canvas_width: u32, marker_width: u32) -> u32 {
    canvas_width.saturating_sub(marker_width) / 2
}

pub fn velocity_label(velocity: f64) -> String {
    format!("Velocity: {:.2} m/s", velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const SKY: Rgba<u8> = Rgba([120, 180, 240, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn test_canvas() -> Canvas {
        Canvas::new(
            RgbaImage::from_pixel(300, 800, SKY),
            RgbaImage::from_pixel(50, 50, RED),
        )
        .unwrap()
    }

    #[test]
    fn test_position_zero_is_top_row() {
        assert_eq!(marker_pixel_y(0.0, 100.0, 800, 50), 0);

        let frame = FrameRenderer::without_label().render(
            &Sample::new(0.0, 0.0, 0.0),
            &test_canvas(),
            100.0,
        );
        assert_eq!(frame.marker_position(), (125, 0));
        assert_eq!(*frame.image().get_pixel(125, 0), RED);
        assert_eq!(*frame.image().get_pixel(125, 50), SKY);
    }

    #[test]
    fn test_position_past_max_clamps_to_bottom() {
        assert_eq!(marker_pixel_y(250.0, 100.0, 800, 50), 750);
        assert_eq!(marker_pixel_y(f64::INFINITY, 100.0, 800, 50), 750);

        let frame = FrameRenderer::without_label().render(
            &Sample::new(3.0, 1e9, 20.0),
            &test_canvas(),
            100.0,
        );
        assert_eq!(frame.marker_position(), (125, 750));
        assert_eq!(*frame.image().get_pixel(150, 799), RED);
    }

    #[test]
    fn test_linear_mapping() {
        assert_eq!(marker_pixel_y(50.0, 100.0, 800, 50), 375);
        assert_eq!(marker_pixel_y(100.0, 100.0, 800, 50), 750);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        assert_eq!(marker_pixel_y(-5.0, 100.0, 800, 50), 0);
        assert_eq!(marker_pixel_y(f64::NAN, 100.0, 800, 50), 0);
        assert_eq!(marker_pixel_y(10.0, 0.0, 800, 50), 0);
        assert_eq!(marker_pixel_y(10.0, f64::NAN, 800, 50), 0);
        assert_eq!(marker_pixel_y(10.0, 100.0, 40, 50), 0);
    }

    #[test]
    fn test_marker_is_centred() {
        assert_eq!(marker_pixel_x(300, 50), 125);
        assert_eq!(marker_pixel_x(301, 50), 125);
        assert_eq!(marker_pixel_x(50, 50), 0);
    }

    #[test]
    fn test_background_is_not_mutated() {
        let canvas = test_canvas();
        let before = canvas.background().clone();

        let renderer = FrameRenderer::new().unwrap();
        let first = renderer.render(&Sample::new(0.0, 0.0, 0.0), &canvas, 10.0);
        let second = renderer.render(&Sample::new(1.0, 10.0, 9.0), &canvas, 10.0);

        assert_eq!(canvas.background(), &before);
        assert_eq!(*first.image().get_pixel(125, 790), SKY);
        assert_eq!(*second.image().get_pixel(125, 790), RED);
    }

    #[test]
    fn test_label_shows_velocity_with_two_decimals() {
        let frame =
            FrameRenderer::new().unwrap().render(&Sample::new(1.0, 5.0, 12.3456), &test_canvas(), 100.0);

        assert_eq!(frame.label(), Some("Velocity: 12.35 m/s"));
        // Backing box darkens the sky behind the text.
        let pixel = frame.image().get_pixel(LABEL_MARGIN, LABEL_MARGIN + 1);
        assert_ne!(*pixel, SKY);
    }

    #[test]
    fn test_no_label_leaves_corner_untouched() {
        let frame = FrameRenderer::without_label().render(
            &Sample::new(1.0, 500.0, 12.0),
            &test_canvas(),
            1000.0,
        );
        assert_eq!(frame.label(), None);
        assert_eq!(*frame.image().get_pixel(LABEL_MARGIN, LABEL_MARGIN), SKY);
    }

    #[test]
    fn test_off_canvas_label_does_not_panic() {
        let canvas = test_canvas();
        let sample = Sample::new(1.0, 5.0, 12.3456);

        let far_right = FrameRenderer::with_label(LabelStyle {
            x: u32::MAX - 5,
            ..LabelStyle::default()
        })
        .unwrap()
        .render(&sample, &canvas, 100.0);
        assert_eq!(far_right.label(), Some("Velocity: 12.35 m/s"));
        assert_eq!(far_right.image(), &canvas_with_marker_only(&canvas, &sample));

        let huge = FrameRenderer::with_label(LabelStyle {
            y: u32::MAX,
            font_size: 1e9,
            padding: u32::MAX,
            ..LabelStyle::default()
        })
        .unwrap()
        .render(&sample, &canvas, 100.0);
        assert_eq!(huge.dimensions(), (300, 800));
    }

    fn canvas_with_marker_only(canvas: &Canvas, sample: &Sample) -> RgbaImage {
        FrameRenderer::without_label()
            .render(sample, canvas, 100.0)
            .into_image()
    }

    #[test]
    fn test_default_renderer_draws_label_text() {
        let renderer = FrameRenderer::new().unwrap();
        assert_eq!(renderer.label_style(), Some(&LabelStyle::default()));

        let frame = renderer.render(&Sample::new(1.0, 500.0, 8.0), &test_canvas(), 1000.0);
        // Some pixel in the label box is close to the white text colour.
        let bright = frame
            .image()
            .enumerate_pixels()
            .filter(|(x, y, _)| *x < 200 && *y < 30)
            .any(|(_, _, pixel)| pixel[0] > 200 && pixel[1] > 200 && pixel[2] > 200);
        assert!(bright);
    }

    #[test]
    fn test_render_all_keeps_order_and_size() {
        let samples = vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(0.1, 0.05, 1.0),
            Sample::new(0.2, 0.2, 2.0),
        ];

        let frames = FrameRenderer::new()
            .unwrap()
            .render_all(&samples, &test_canvas(), 0.2)
            .unwrap();

        assert_eq!(frames.len(), 3);
        for (frame, sample) in frames.iter().zip(&samples) {
            assert_eq!(frame.sample(), sample);
            assert_eq!(frame.dimensions(), (300, 800));
        }
        assert_eq!(frames[2].marker_position().1, 750);
    }

    #[test]
    fn test_render_all_rejects_empty_input() {
        let samples: Vec<Sample> = Vec::new();
        let result = FrameRenderer::new().unwrap().render_all(&samples, &test_canvas(), 1.0);
        assert!(matches!(result, Err(SimulationError::EmptyFrameSequence(_))));
    }
}
