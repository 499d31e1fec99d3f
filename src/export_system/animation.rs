use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::Delay;
use log::{debug, info};

use crate::errors::{Result, SimulationError};
use crate::rendering_system::frame::Frame;

/// Packages an ordered frame sequence into an animation.
pub trait AnimationEncoder {
    fn encode(&mut self, frames: &[Frame], frame_delay_ms: u32) -> Result<()>;
}

/// Looping GIF writer.
pub struct GifExporter<W: Write> {
    writer: Option<W>,
}

impl<W: Write> GifExporter<W> {
    pub fn new(writer: W) -> Self {
        GifExporter {
            writer: Some(writer),
        }
    }
}

/// Looping GIF written to a file. The file is only created once the frames
/// have been accepted, so a rejected sequence leaves nothing on disk.
#[derive(Debug, Clone)]
pub struct GifFileExporter {
    path: PathBuf,
}

impl GifFileExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GifFileExporter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnimationEncoder for GifFileExporter {
    fn encode(&mut self, frames: &[Frame], frame_delay_ms: u32) -> Result<()> {
        validate_frames(frames)?;
        check_delay(frame_delay_ms)?;

        let file = File::create(&self.path).map_err(|e| {
            SimulationError::EncodingError(format!("cannot create {}: {}", self.path.display(), e))
        })?;
        info!("Writing animation to {}", self.path.display());

        GifExporter::new(BufWriter::new(file)).encode(frames, frame_delay_ms)
    }
}

impl<W: Write> AnimationEncoder for GifExporter<W> {
    fn encode(&mut self, frames: &[Frame], frame_delay_ms: u32) -> Result<()> {
        validate_frames(frames)?;
        check_delay(frame_delay_ms)?;

        let writer = self.writer.take().ok_or_else(|| {
            SimulationError::EncodingError("encoder has already been used".to_string())
        })?;

        let mut encoder = GifEncoder::new(writer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SimulationError::EncodingError(e.to_string()))?;

        let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let gif_frames = frames
            .iter()
            .map(|frame| image::Frame::from_parts(frame.image().clone(), 0, 0, delay));
        encoder
            .encode_frames(gif_frames)
            .map_err(|e| SimulationError::EncodingError(e.to_string()))?;

        debug!("Encoded {} frames at {} ms each", frames.len(), frame_delay_ms);
        Ok(())
    }
}

fn check_delay(frame_delay_ms: u32) -> Result<()> {
    if frame_delay_ms == 0 {
        return Err(SimulationError::EncodingError(
            "frame delay must be at least 1 ms".to_string(),
        ));
    }
    Ok(())
}

/// Non-empty and every frame the same size as the first.
pub fn validate_frames(frames: &[Frame]) -> Result<()> {
    let first = frames.first().ok_or_else(|| {
        SimulationError::EmptyFrameSequence("nothing to encode".to_string())
    })?;

    let expected = first.dimensions();
    if let Some((index, frame)) = frames
        .iter()
        .enumerate()
        .find(|(_, frame)| frame.dimensions() != expected)
    {
        let (width, height) = frame.dimensions();
        return Err(SimulationError::EncodingError(format!(
            "frame {} is {}x{}, expected {}x{}",
            index, width, height, expected.0, expected.1
        )));
    }

    Ok(())
}
