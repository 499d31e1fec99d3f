use image::RgbaImage;

use crate::errors::{Result, SimulationError};

/// Background and marker sprite shared by every frame of a run. Neither
/// image is modified by rendering.
#[derive(Debug, Clone)]
pub struct Canvas {
    background: RgbaImage,
    marker: RgbaImage,
}

impl Canvas {
    pub fn new(background: RgbaImage, marker: RgbaImage) -> Result<Self> {
        if background.width() == 0 || background.height() == 0 {
            return Err(SimulationError::RenderFailure(
                "background image is empty".to_string(),
            ));
        }
        if marker.width() == 0 || marker.height() == 0 {
            return Err(SimulationError::RenderFailure(
                "marker image is empty".to_string(),
            ));
        }
        if marker.width() > background.width() || marker.height() > background.height() {
            return Err(SimulationError::RenderFailure(format!(
                "marker {}x{} does not fit on background {}x{}",
                marker.width(),
                marker.height(),
                background.width(),
                background.height()
            )));
        }

        Ok(Canvas { background, marker })
    }

    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    pub fn marker(&self) -> &RgbaImage {
        &self.marker
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    pub fn marker_width(&self) -> u32 {
        self.marker.width()
    }

    pub fn marker_height(&self) -> u32 {
        self.marker.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_valid_canvas() {
        let canvas = Canvas::new(solid(300, 800), solid(50, 50)).unwrap();
        assert_eq!(canvas.width(), 300);
        assert_eq!(canvas.height(), 800);
        assert_eq!(canvas.marker_width(), 50);
        assert_eq!(canvas.marker_height(), 50);
    }

    #[test]
    fn test_marker_as_large_as_background_is_allowed() {
        assert!(Canvas::new(solid(50, 50), solid(50, 50)).is_ok());
    }

    #[test]
    fn test_oversized_marker_is_rejected() {
        let result = Canvas::new(solid(40, 800), solid(50, 50));
        assert!(matches!(result, Err(SimulationError::RenderFailure(_))));
    }

    #[test]
    fn test_empty_images_are_rejected() {
        let no_background = Canvas::new(RgbaImage::new(0, 0), solid(1, 1));
        let no_marker = Canvas::new(solid(10, 10), RgbaImage::new(0, 5));
        assert!(matches!(no_background, Err(SimulationError::RenderFailure(_))));
        assert!(matches!(no_marker, Err(SimulationError::RenderFailure(_))));
    }
}
