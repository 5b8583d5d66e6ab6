//! In-memory 8-bit RGBA canvas

use crate::color::Rgba8;

/// An 8-bit RGBA canvas, row-major, top-to-bottom
pub struct Canvas {
    /// Canvas dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<Rgba8>,
}

impl Canvas {
    /// Create a canvas with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![fill; pixel_count],
        }
    }

    /// Set every pixel to a solid color
    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Move a pixel toward `color` by `weight` (0 = unchanged, 1 = replaced).
    /// Formula per channel: out = dst + (src - dst) * weight
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba8, weight: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[i].to_array();
        let src = color.to_array();
        let mut out = [0u8; 4];
        for c in 0..4 {
            let (d, s) = (dst[c] as f32, src[c] as f32);
            out[c] = (d + (s - d) * weight).round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i] = Rgba8::from_array(out);
    }

    /// Draw a horizontal and a vertical ruler of `length` pixels starting at
    /// `origin`, clipped to the canvas.
    pub fn draw_guidelines(&mut self, origin: (i32, i32), length: u32, color: Rgba8) {
        let (ox, oy) = (origin.0 as i64, origin.1 as i64);
        for i in 0..length as i64 {
            self.set_pixel_signed(ox, oy + i, color);
            self.set_pixel_signed(ox + i, oy, color);
        }
    }

    fn set_pixel_signed(&mut self, x: i64, y: i64, color: Rgba8) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            self.set_pixel(x, y, color);
        }
    }

    /// Raw RGBA bytes for an image encoder
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }
}
