//! Text layout driver
//!
//! Walks a document line by line and glyph by glyph:
//! 1. x resets to the line start, then each glyph is resolved, rasterized at
//!    the pen and the pen moves right by its advance
//! 2. after every line (blank ones included) y moves down by the line advance
//!
//! All pen arithmetic is [`Fix32`], so the same document always lands on the
//! same pixels. The first fault stops the render.

use lettering_config::RenderConfig;
use tracing::{debug, trace, warn};

use crate::error::RenderError;
use crate::fixed::Fix32;
use crate::painter::Painter;
use crate::rasterizer::Rasterizer;
use crate::source::OutlineSource;

/// Progress of a layout driver. `Done` and `Faulted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering {
        line: usize,
        column: usize,
    },
    Done,
    Faulted,
}

impl RenderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderState::Done | RenderState::Faulted)
    }
}

/// Pen position on the current baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenState {
    pub x: Fix32,
    pub y: Fix32,
    /// x every line starts from
    pub line_start: Fix32,
}

impl PenState {
    pub fn new(x: Fix32, y: Fix32) -> Self {
        Self { x, y, line_start: x }
    }

    pub fn from_pixels(x: i32, y: i32) -> Self {
        Self::new(Fix32::from_int(x), Fix32::from_int(y))
    }

    /// Move right past a glyph
    pub fn advance(&mut self, width: Fix32) {
        self.x += width;
    }

    /// Return to the line start and drop one baseline
    pub fn next_line(&mut self, line_advance: Fix32) {
        self.x = self.line_start;
        self.y += line_advance;
    }
}

/// Sizes the driver works with, already converted to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Font size (em height) in pixels
    pub size_px: Fix32,
    /// Baseline-to-baseline distance
    pub line_advance: Fix32,
}

impl LayoutMetrics {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            size_px: Fix32::from_points(config.font_size, config.dpi),
            line_advance: Fix32::from_points(config.font_size * config.line_spacing, config.dpi),
        }
    }
}

/// Drives outline source -> rasterizer -> painter over a document
pub struct LayoutDriver<'s, S: OutlineSource + ?Sized> {
    source: &'s S,
    metrics: LayoutMetrics,
    rasterizer: Rasterizer,
    state: RenderState,
}

impl<'s, S: OutlineSource + ?Sized> LayoutDriver<'s, S> {
    /// Driver for a `config.width` x `config.height` canvas
    pub fn new(source: &'s S, config: &RenderConfig) -> Self {
        Self::with_metrics(
            source,
            LayoutMetrics::from_config(config),
            Rasterizer::new(config.width, config.height),
        )
    }

    pub fn with_metrics(source: &'s S, metrics: LayoutMetrics, rasterizer: Rasterizer) -> Self {
        Self {
            source,
            metrics,
            rasterizer,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Render every line starting from `pen`; returns the pen after the last line.
    ///
    /// A driver renders one document; calling this again after it finished
    /// or faulted returns [`RenderError::SessionFinished`].
    pub fn draw_document<P, L>(
        &mut self,
        painter: &mut P,
        pen: PenState,
        lines: &[L],
    ) -> Result<PenState, RenderError>
    where
        P: Painter + ?Sized,
        L: AsRef<str>,
    {
        if self.state.is_terminal() {
            return Err(RenderError::SessionFinished);
        }

        let mut pen = pen;
        for (index, line) in lines.iter().enumerate() {
            if let Err(err) = self.draw_line(painter, &mut pen, index, line.as_ref()) {
                warn!("LayoutDriver: render aborted: {}", err);
                self.state = RenderState::Faulted;
                return Err(err);
            }
            pen.next_line(self.metrics.line_advance);
        }

        self.state = RenderState::Done;
        debug!("LayoutDriver: {} lines done, pen at ({}, {})", lines.len(), pen.x, pen.y);
        Ok(pen)
    }

    fn draw_line<P: Painter + ?Sized>(
        &mut self,
        painter: &mut P,
        pen: &mut PenState,
        line: usize,
        text: &str,
    ) -> Result<(), RenderError> {
        pen.x = pen.line_start;
        self.state = RenderState::Rendering { line, column: 0 };
        debug!("LayoutDriver: line {} at y={} ({} bytes)", line, pen.y, text.len());

        let size_px = self.metrics.size_px.to_f32();
        for (column, ch) in text.chars().enumerate() {
            self.state = RenderState::Rendering { line, column };

            let glyph = self
                .source
                .resolve_glyph(ch, size_px)
                .map_err(|reason| RenderError::GlyphResolution {
                    line,
                    column,
                    ch,
                    reason,
                })?;

            trace!("LayoutDriver: {:?} at ({}, {}), advance {}", ch, pen.x, pen.y, glyph.advance);
            self.rasterizer
                .rasterize(&glyph.outline, pen.x.to_f32(), pen.y.to_f32(), painter)
                .map_err(|source| RenderError::MalformedGlyph {
                    line,
                    column,
                    ch,
                    source,
                })?;

            pen.advance(glyph.advance);
        }
        Ok(())
    }
}
