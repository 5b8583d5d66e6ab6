//! Lettering raster pipeline - text to anti-aliased pixels
//!
//! This crate provides the core of the renderer:
//! - [`fixed::Fix32`] - 24.8 fixed-point pen coordinates
//! - [`outline`] - Glyph outlines in pixel space, with validation
//! - [`rasterizer`] - Signed-area scan converter producing coverage spans
//! - [`painter`] - Gamma-corrected span painter
//! - [`canvas`] - 8-bit RGBA canvas with guideline marks
//! - [`layout`] - Line and glyph layout driver
//! - [`source`] - Outline sources (TrueType via ttf-parser)
//! - [`sink`] - Image sinks (PNG via the image crate)
//! - [`pipeline`] - Complete render session

pub mod canvas;
pub mod color;
pub mod constants;
pub mod error;
pub mod fixed;
pub mod layout;
pub mod outline;
pub mod painter;
pub mod pipeline;
pub mod rasterizer;
pub mod sink;
pub mod source;

pub use canvas::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use fixed::*;
pub use layout::*;
pub use outline::*;
pub use painter::*;
pub use pipeline::*;
pub use rasterizer::*;
pub use sink::*;
pub use source::*;
