use thiserror::Error;

use crate::constants::{MAX_COORDINATE, MAX_GLYPH_EXTENT};

/// Outline data the rasterizer refuses to scan convert
#[derive(Debug, Error, PartialEq)]
pub enum RasterError {
    #[error("contour {contour} is not closed")]
    OpenContour { contour: usize },
    #[error("contour {contour} has a non-finite coordinate")]
    NonFiniteCoordinate { contour: usize },
    #[error("contour {contour} has a coordinate beyond +/-{}", MAX_COORDINATE)]
    CoordinateOverflow { contour: usize },
    #[error("glyph box {width}x{height} exceeds {}px", MAX_GLYPH_EXTENT)]
    GlyphTooLarge { width: u64, height: u64 },
}

/// Reasons an outline source cannot produce a glyph
#[derive(Debug, Error, PartialEq)]
pub enum GlyphFault {
    #[error("no glyph for this character")]
    Missing,
    #[error("glyph has no horizontal metrics")]
    NoMetrics,
    #[error("corrupt glyph data: {0}")]
    Corrupt(String),
}

/// Failures while serializing a finished canvas
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image encoder failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to write image bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level render fault. Every variant is fatal for the session.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    Config(#[from] lettering_config::ConfigError),
    #[error("failed to parse font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),
    #[error("cannot resolve {ch:?} (line {line}, column {column}): {reason}")]
    GlyphResolution {
        line: usize,
        column: usize,
        ch: char,
        reason: GlyphFault,
    },
    #[error("cannot rasterize {ch:?} (line {line}, column {column}): {source}")]
    MalformedGlyph {
        line: usize,
        column: usize,
        ch: char,
        source: RasterError,
    },
    #[error("failed to encode image: {0}")]
    Encoding(#[from] EncodeError),
    #[error("render session already finished")]
    SessionFinished,
}
