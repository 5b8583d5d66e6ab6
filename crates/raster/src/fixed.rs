//! 24.8 fixed-point coordinates for pen positions
//!
//! Every pen movement (glyph advances, line advances) is accumulated as an
//! integer count of 1/256 pixel, so a run of any length lands on exactly the
//! same pixel every time. Conversions from reals round to nearest and
//! saturate at the `i32` range; additions saturate instead of wrapping.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::constants::{FIX_ONE, FIX_SHIFT, POINTS_PER_INCH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fix32(pub i32);

impl Fix32 {
    pub const ZERO: Fix32 = Fix32(0);
    pub const ONE: Fix32 = Fix32(FIX_ONE);
    pub const MAX: Fix32 = Fix32(i32::MAX);
    pub const MIN: Fix32 = Fix32(i32::MIN);

    /// Whole pixels to fixed point
    pub const fn from_int(pixels: i32) -> Self {
        Fix32(pixels.saturating_mul(FIX_ONE))
    }

    /// Real pixels to fixed point, rounded to the nearest 1/256
    pub fn from_f64(pixels: f64) -> Self {
        let raw = (pixels * FIX_ONE as f64).round();
        if raw.is_nan() {
            return Fix32::ZERO;
        }
        // `as` saturates at the i32 bounds
        Fix32(raw as i32)
    }

    /// Length in points at the given resolution, converted to pixels
    pub fn from_points(points: f64, dpi: u32) -> Self {
        Self::from_f64(points * dpi as f64 / POINTS_PER_INCH)
    }

    /// Raw 1/256 pixel units
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Largest whole pixel not greater than this value
    pub const fn floor(self) -> i32 {
        self.0 >> FIX_SHIFT
    }

    /// Nearest whole pixel, halves rounding up
    pub const fn round(self) -> i32 {
        ((self.0 as i64 + (FIX_ONE as i64 / 2)) >> FIX_SHIFT) as i32
    }

    /// Whole pixel part, rounding toward zero
    pub const fn trunc(self) -> i32 {
        self.0 / FIX_ONE
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / FIX_ONE as f32
    }
}

impl Add for Fix32 {
    type Output = Fix32;

    fn add(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fix32 {
    fn add_assign(&mut self, rhs: Fix32) {
        *self = *self + rhs;
    }
}

impl Sub for Fix32 {
    type Output = Fix32;

    fn sub(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fix32 {
    fn sub_assign(&mut self, rhs: Fix32) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Fix32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:03}", self.0 >> FIX_SHIFT, self.0 & (FIX_ONE - 1))
    }
}
