//! Outline sources
//!
//! The layout driver asks an [`OutlineSource`] for each character's outline
//! and advance at the active pixel size. [`TtfOutlineSource`] reads
//! TrueType / OpenType data through `ttf-parser`; tests plug in synthetic
//! sources.

use tracing::{debug, info};
use ttf_parser::{Face, OutlineBuilder};

use crate::error::{GlyphFault, RenderError};
use crate::fixed::Fix32;
use crate::outline::{Outline, Point};

/// A glyph ready for the rasterizer
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Outline in pixels, y down, relative to the pen on the baseline
    pub outline: Outline,
    /// Horizontal pen advance
    pub advance: Fix32,
}

/// Provider of glyph outlines and advance widths
pub trait OutlineSource {
    fn resolve_glyph(&self, ch: char, size_px: f32) -> Result<Glyph, GlyphFault>;
}

impl<T: OutlineSource + ?Sized> OutlineSource for &T {
    fn resolve_glyph(&self, ch: char, size_px: f32) -> Result<Glyph, GlyphFault> {
        (**self).resolve_glyph(ch, size_px)
    }
}

/// Outline source backed by a parsed TrueType / OpenType face
pub struct TtfOutlineSource<'a> {
    face: Face<'a>,
}

impl<'a> TtfOutlineSource<'a> {
    /// Parse the first face in `data`
    pub fn parse(data: &'a [u8]) -> Result<Self, RenderError> {
        let face = Face::parse(data, 0)?;
        info!(
            "Parsed font: {} glyphs, {} units per em",
            face.number_of_glyphs(),
            face.units_per_em()
        );
        Ok(Self { face })
    }
}

impl OutlineSource for TtfOutlineSource<'_> {
    fn resolve_glyph(&self, ch: char, size_px: f32) -> Result<Glyph, GlyphFault> {
        let id = self.face.glyph_index(ch).ok_or(GlyphFault::Missing)?;
        let units_per_em = self.face.units_per_em();
        if units_per_em == 0 {
            return Err(GlyphFault::Corrupt("units per em is zero".to_string()));
        }
        let advance_units = self.face.glyph_hor_advance(id).ok_or(GlyphFault::NoMetrics)?;

        let scale = size_px / units_per_em as f32;
        let mut builder = ScaledOutline {
            outline: Outline::new(),
            scale,
        };
        if self.face.outline_glyph(id, &mut builder).is_none() && !builder.outline.is_empty() {
            return Err(GlyphFault::Corrupt(format!("glyph {} outline is truncated", id.0)));
        }

        let advance = Fix32::from_f64(advance_units as f64 * size_px as f64 / units_per_em as f64);
        debug!(
            "TtfOutlineSource: {:?} -> glyph {}, {} contours, advance {}",
            ch,
            id.0,
            builder.outline.contours().len(),
            advance
        );
        Ok(Glyph {
            outline: builder.outline,
            advance,
        })
    }
}

/// Collects ttf-parser outline callbacks into an [`Outline`], scaling font
/// units to pixels and flipping y to point down.
struct ScaledOutline {
    outline: Outline,
    scale: f32,
}

impl ScaledOutline {
    #[inline]
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(x * self.scale, -y * self.scale)
    }
}

impl OutlineBuilder for ScaledOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.outline.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.outline.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.point(x1, y1), self.point(x, y));
        self.outline.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.outline.cubic_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.outline.close();
    }
}
