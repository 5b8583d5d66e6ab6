//! Complete render session
//!
//! This module connects the pieces of the pipeline:
//! - Canvas creation (background fill and guidelines)
//! - Layout driver (outline source -> rasterizer)
//! - Gamma painter (coverage -> canvas pixels)
//! - Image sink (finished canvas -> encoded bytes)
//!
//! A session either produces a complete canvas or an error; the sink is only
//! handed a canvas after every line rendered successfully.

use lettering_config::RenderConfig;
use tracing::info;

use crate::canvas::Canvas;
use crate::color::ColorPair;
use crate::error::RenderError;
use crate::layout::{LayoutDriver, PenState};
use crate::painter::GammaPainter;
use crate::sink::ImageSink;
use crate::source::OutlineSource;

/// One render of a document with a fixed configuration and font
pub struct RenderSession<'a, S: OutlineSource + ?Sized> {
    config: &'a RenderConfig,
    source: &'a S,
    colors: ColorPair,
}

impl<'a, S: OutlineSource + ?Sized> RenderSession<'a, S> {
    /// Validate `config` and pick the color pair it selects
    pub fn new(config: &'a RenderConfig, source: &'a S) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            colors: ColorPair::select(config.white_on_black),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    pub fn colors(&self) -> ColorPair {
        self.colors
    }

    /// Blank canvas: background fill plus guidelines from the origin
    pub fn prepare_canvas(&self) -> Canvas {
        let mut canvas = Canvas::new(self.config.width, self.config.height, self.colors.background);
        if self.config.guide_length > 0 {
            canvas.draw_guidelines(self.config.origin, self.config.guide_length, self.colors.guideline);
        }
        canvas
    }

    /// Render `lines` onto a fresh canvas
    pub fn render<L: AsRef<str>>(&self, lines: &[L]) -> Result<Canvas, RenderError> {
        info!(
            "RenderSession: {} lines on {}x{} canvas, {}pt at {}dpi, spacing {}, gamma {}",
            lines.len(),
            self.config.width,
            self.config.height,
            self.config.font_size,
            self.config.dpi,
            self.config.line_spacing,
            self.config.gamma
        );

        let mut canvas = self.prepare_canvas();
        let mut driver = LayoutDriver::new(self.source, self.config);
        let mut painter = GammaPainter::new(&mut canvas, self.colors.foreground, self.config.gamma);
        let (x, y) = self.config.origin;
        driver.draw_document(&mut painter, PenState::from_pixels(x, y), lines)?;

        Ok(canvas)
    }

    /// Render `lines` and hand the finished canvas to `sink`
    pub fn render_to<L, K>(&self, lines: &[L], sink: &mut K) -> Result<Canvas, RenderError>
    where
        L: AsRef<str>,
        K: ImageSink + ?Sized,
    {
        let canvas = self.render(lines)?;
        sink.encode(&canvas)?;
        info!("RenderSession: canvas encoded");
        Ok(canvas)
    }
}
