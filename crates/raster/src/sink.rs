//! Image sinks for finished canvases

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::EncodeError;

/// Consumer of a finished canvas (row-major, top-to-bottom, 8-bit RGBA)
pub trait ImageSink {
    fn encode(&mut self, canvas: &Canvas) -> Result<(), EncodeError>;
}

/// Writes the canvas as a PNG to any byte sink
pub struct PngSink<W: Write> {
    writer: W,
}

impl<W: Write> PngSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ImageSink for PngSink<W> {
    fn encode(&mut self, canvas: &Canvas) -> Result<(), EncodeError> {
        PngEncoder::new(&mut self.writer).write_image(
            canvas.as_bytes(),
            canvas.width,
            canvas.height,
            ExtendedColorType::Rgba8,
        )?;
        self.writer.flush()?;
        debug!("PngSink: encoded {}x{} canvas", canvas.width, canvas.height);
        Ok(())
    }
}
