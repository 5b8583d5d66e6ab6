/// Fractional bits of [`crate::Fix32`] (24.8 fixed point).
pub const FIX_SHIFT: u32 = 8;

/// One pixel in fixed-point units.
pub const FIX_ONE: i32 = 1 << FIX_SHIFT;

/// Number of entries in the painter's gamma lookup table.
pub const COVERAGE_LEVELS: usize = 256;

/// Maximum distance (pixels) between a curve and its flattened polyline.
pub const FLATTEN_TOLERANCE: f32 = 0.1;

/// Recursion limit for curve subdivision (2^10 segments per curve at most).
pub const MAX_FLATTEN_DEPTH: u32 = 10;

/// Largest absolute outline coordinate accepted by the rasterizer, in pixels.
pub const MAX_COORDINATE: f32 = 8_388_607.0;

/// Largest glyph bounding box side, in pixels.
pub const MAX_GLYPH_EXTENT: u32 = 16_384;

/// Points per inch, used for point to pixel conversion.
pub const POINTS_PER_INCH: f64 = 72.0;
