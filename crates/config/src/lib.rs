//! Shared render configuration for Lettering
//!
//! This crate provides the single source of truth for the settings a render
//! session consumes: output resolution, font size and line spacing, the gamma
//! curve and the color scheme. A [`RenderConfig`] is built once at startup
//! (from defaults, a JSON file or command-line flags), validated, and then
//! passed by reference through the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default screen resolution in dots per inch
pub const DEFAULT_DPI: u32 = 72;

/// Default font size in points
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Default line spacing multiplier (2.0 = double spaced)
pub const DEFAULT_LINE_SPACING: f64 = 1.5;

/// Default gamma exponent (1.0 = linear blending)
pub const DEFAULT_GAMMA: f32 = 1.0;

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 640;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 480;

/// Default pen origin (first baseline) in pixels
pub const DEFAULT_ORIGIN: (i32, i32) = (10, 10);

/// Default guideline length in pixels
pub const DEFAULT_GUIDE_LENGTH: u32 = 200;

/// Largest line advance, in pixels, a configuration may ask for.
///
/// Keeps every pen coordinate well inside the range of 24.8 fixed point.
pub const MAX_PIXEL_SIZE: f64 = 65_536.0;

/// Largest font size (em height) in pixels.
///
/// The rasterizer accepts glyph boxes up to 16,384px, so any glyph that stays
/// within four ems of its origin fits.
pub const MAX_FONT_SIZE_PX: f64 = 4_096.0;

/// Largest canvas edge in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid dpi: {0} (must be greater than zero)")]
    InvalidDpi(u32),
    #[error("Invalid font size: {0} (must be a finite value greater than zero)")]
    InvalidFontSize(f64),
    #[error("Invalid line spacing: {0} (must be a finite value greater than zero)")]
    InvalidLineSpacing(f64),
    #[error("Invalid gamma: {0} (must be a finite value greater than zero)")]
    InvalidGamma(f32),
    #[error("Invalid canvas size: {width}x{height} (each side must be 1..={max})", max = MAX_CANVAS_SIZE)]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Scaled size {size:.1}px exceeds the {max}px ceiling")]
    SizeOverflow { size: f64, max: f64 },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Render configuration for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Screen resolution in dots per inch
    pub dpi: u32,
    /// Font size in points
    pub font_size: f64,
    /// Line spacing as a multiple of the font size
    pub line_spacing: f64,
    /// Gamma exponent applied to coverage before blending
    pub gamma: f32,
    /// White text on a black background instead of black on white
    pub white_on_black: bool,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Pen position of the first baseline, in pixels
    pub origin: (i32, i32),
    /// Length of the guideline rulers drawn from the origin (0 disables them)
    pub guide_length: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            gamma: DEFAULT_GAMMA,
            white_on_black: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            origin: DEFAULT_ORIGIN,
            guide_length: DEFAULT_GUIDE_LENGTH,
        }
    }
}

impl RenderConfig {
    /// Create a config with the given canvas dimensions and default text settings
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Font size converted from points to pixels at the configured dpi
    pub fn font_size_px(&self) -> f64 {
        self.font_size * self.dpi as f64 / 72.0
    }

    /// Baseline-to-baseline distance in pixels
    pub fn line_advance_px(&self) -> f64 {
        self.font_size_px() * self.line_spacing
    }

    /// Check every value against its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 {
            return Err(ConfigError::InvalidDpi(self.dpi));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::InvalidFontSize(self.font_size));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(ConfigError::InvalidLineSpacing(self.line_spacing));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        if self.width == 0
            || self.height == 0
            || self.width > MAX_CANVAS_SIZE
            || self.height > MAX_CANVAS_SIZE
        {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.width,
                height: self.height,
            });
        }

        let size_px = self.font_size_px();
        if size_px > MAX_FONT_SIZE_PX {
            return Err(ConfigError::SizeOverflow {
                size: size_px,
                max: MAX_FONT_SIZE_PX,
            });
        }
        let advance_px = self.line_advance_px();
        if advance_px > MAX_PIXEL_SIZE {
            return Err(ConfigError::SizeOverflow {
                size: advance_px,
                max: MAX_PIXEL_SIZE,
            });
        }

        Ok(())
    }
}
