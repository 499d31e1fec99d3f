use image::RgbaImage;

use crate::trajectory_system::sample::Sample;

/// One rendered picture and the sample it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub(crate) image: RgbaImage,
    pub(crate) sample: Sample,
    pub(crate) marker_x: u32,
    pub(crate) marker_y: u32,
    pub(crate) label: Option<String>,
}

impl Frame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Top-left corner of the marker, in pixels from the top-left of the frame.
    pub fn marker_position(&self) -> (u32, u32) {
        (self.marker_x, self.marker_y)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
