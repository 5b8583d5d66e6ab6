//! Span painters
//!
//! A [`Painter`] receives the coverage spans of one glyph from the
//! [`crate::Rasterizer`]. [`GammaPainter`] blends a solid color onto the
//! canvas through a gamma lookup table; [`CoverageRecorder`] keeps the raw
//! coverage for inspection.

use crate::canvas::Canvas;
use crate::color::Rgba8;
use crate::constants::COVERAGE_LEVELS;
use crate::rasterizer::Span;

/// Consumer of rasterizer output
pub trait Painter {
    /// Paint one glyph's spans. Spans are sorted by row, then by x.
    fn paint(&mut self, spans: &[Span]);
}

/// Quantize a coverage fraction to a lookup table index
#[inline]
pub fn coverage_index(coverage: f32) -> usize {
    let max = (COVERAGE_LEVELS - 1) as f32;
    (coverage.clamp(0.0, 1.0) * max).round() as usize
}

/// Build the coverage-to-weight table for `gamma`.
///
/// `f(c) = c` for gamma 1.0, otherwise `f(c) = c^(1/gamma)`. For coverage in
/// (0, 1) a larger gamma gives a larger weight, pulling edges toward the
/// foreground.
pub fn gamma_table(gamma: f32) -> [f32; COVERAGE_LEVELS] {
    let max = (COVERAGE_LEVELS - 1) as f32;
    let mut table = [0.0; COVERAGE_LEVELS];
    for (i, weight) in table.iter_mut().enumerate() {
        let c = i as f32 / max;
        *weight = if gamma == 1.0 { c } else { c.powf(gamma.recip()) };
    }
    table
}

/// Blends a solid color onto a canvas with gamma-corrected coverage
pub struct GammaPainter<'a> {
    canvas: &'a mut Canvas,
    color: Rgba8,
    table: [f32; COVERAGE_LEVELS],
}

impl<'a> GammaPainter<'a> {
    /// `gamma` must be finite and greater than zero (checked by config validation)
    pub fn new(canvas: &'a mut Canvas, color: Rgba8, gamma: f32) -> Self {
        Self {
            canvas,
            color,
            table: gamma_table(gamma),
        }
    }
}

impl Painter for GammaPainter<'_> {
    fn paint(&mut self, spans: &[Span]) {
        for span in spans {
            let index = coverage_index(span.coverage);
            if index == 0 || span.y < 0 {
                continue;
            }
            let weight = self.table[index];
            let y = span.y as u32;
            for x in span.x0.max(0)..span.x1 {
                self.canvas.blend_pixel(x as u32, y, self.color, weight);
            }
        }
    }
}

/// Records raw coverage per pixel instead of painting.
///
/// Later spans overwrite earlier ones; pixels never reported stay at 0.
pub struct CoverageRecorder {
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; width as usize * height as usize],
        }
    }

    /// Coverage at a pixel, 0 outside the recorder
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// Row-major coverage values
    pub fn coverage(&self) -> &[f32] {
        &self.coverage
    }

    /// Sum of coverage over all pixels, i.e. the painted area in square pixels
    pub fn total(&self) -> f32 {
        self.coverage.iter().sum()
    }

    /// Number of pixels with nonzero coverage
    pub fn painted(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0.0).count()
    }
}

impl Painter for CoverageRecorder {
    fn paint(&mut self, spans: &[Span]) {
        for span in spans {
            if span.y < 0 || span.y as u32 >= self.height {
                continue;
            }
            let row = span.y as usize * self.width as usize;
            for x in span.x0.max(0)..span.x1.min(self.width as i32) {
                self.coverage[row + x as usize] = span.coverage;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(coverage: f32) -> [Span; 1] {
        [Span {
            y: 0,
            x0: 0,
            x1: 1,
            coverage,
        }]
    }

    fn paint_one(background: Rgba8, foreground: Rgba8, gamma: f32, coverage: f32) -> Rgba8 {
        let mut canvas = Canvas::new(1, 1, background);
        GammaPainter::new(&mut canvas, foreground, gamma).paint(&single(coverage));
        canvas.get_pixel(0, 0).unwrap()
    }

    fn linear(dst: u8, src: u8, c: f32) -> u8 {
        (dst as f32 + (src as f32 - dst as f32) * c).round().clamp(0.0, 255.0) as u8
    }

    #[test]
    fn test_gamma_table_endpoints() {
        for gamma in [0.5, 1.0, 1.8, 2.2] {
            let table = gamma_table(gamma);
            assert_eq!(table[0], 0.0);
            assert!((table[COVERAGE_LEVELS - 1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unit_gamma_is_linear_blending() {
        let background = Rgba8::opaque(250, 120, 7);
        let foreground = Rgba8::new(3, 200, 90, 255);
        for level in 0..COVERAGE_LEVELS {
            let c = level as f32 / 255.0;
            let out = paint_one(background, foreground, 1.0, c);
            assert_eq!(out.r, linear(background.r, foreground.r, c), "coverage {c}");
            assert_eq!(out.g, linear(background.g, foreground.g, c), "coverage {c}");
            assert_eq!(out.b, linear(background.b, foreground.b, c), "coverage {c}");
            assert_eq!(out.a, 255);
        }
    }

    #[test]
    fn test_unit_gamma_matches_linear_for_arbitrary_coverage() {
        // Off-grid coverage is quantized to 1/255 steps, so the result is
        // within one level of exact linear blending.
        for step in 0..=1000 {
            let c = step as f32 / 1000.0;
            let out = paint_one(Rgba8::WHITE, Rgba8::BLACK, 1.0, c);
            let exact = 255.0 * (1.0 - c);
            assert!((out.r as f32 - exact).abs() <= 1.0, "coverage {c}: {} vs {exact}", out.r);
        }
    }

    #[test]
    fn test_result_moves_toward_foreground_as_gamma_grows() {
        let gammas = [0.25, 0.5, 1.0, 1.5, 2.2, 4.0];
        for c in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let values: Vec<u8> = gammas
                .iter()
                .map(|&g| paint_one(Rgba8::WHITE, Rgba8::BLACK, g, c).r)
                .collect();
            for pair in values.windows(2) {
                assert!(pair[0] >= pair[1], "coverage {c}: {values:?}");
            }
            assert!(values[0] > values[values.len() - 1]);
        }
    }

    #[test]
    fn test_full_and_zero_coverage() {
        for gamma in [0.5, 1.0, 2.2] {
            assert_eq!(paint_one(Rgba8::WHITE, Rgba8::BLACK, gamma, 1.0), Rgba8::BLACK);
            assert_eq!(paint_one(Rgba8::WHITE, Rgba8::BLACK, gamma, 0.0), Rgba8::WHITE);
        }
    }

    #[test]
    fn test_only_span_pixels_change() {
        let mut canvas = Canvas::new(8, 4, Rgba8::WHITE);
        let spans = [
            Span { y: 1, x0: 2, x1: 5, coverage: 1.0 },
            Span { y: 2, x0: 6, x1: 7, coverage: 0.5 },
        ];
        GammaPainter::new(&mut canvas, Rgba8::BLACK, 1.0).paint(&spans);

        for y in 0..4 {
            for x in 0..8 {
                let p = canvas.get_pixel(x, y).unwrap();
                let painted = (y == 1 && (2..5).contains(&x)) || (y == 2 && x == 6);
                assert_eq!(p != Rgba8::WHITE, painted, "pixel ({x}, {y})");
            }
        }
        assert_eq!(canvas.get_pixel(6, 2).unwrap().r, 127);
    }

    #[test]
    fn test_later_glyphs_blend_onto_earlier() {
        let mut canvas = Canvas::new(1, 1, Rgba8::WHITE);
        let mut painter = GammaPainter::new(&mut canvas, Rgba8::BLACK, 1.0);
        painter.paint(&single(0.5));
        painter.paint(&single(0.5));
        // 255 -> 127 -> 63
        assert_eq!(canvas.get_pixel(0, 0).unwrap().r, 63);
    }

    #[test]
    fn test_recorder() {
        let mut recorder = CoverageRecorder::new(4, 4);
        recorder.paint(&[
            Span { y: 0, x0: -2, x1: 2, coverage: 0.5 },
            Span { y: 3, x0: 3, x1: 9, coverage: 1.0 },
            Span { y: 7, x0: 0, x1: 4, coverage: 1.0 },
        ]);
        assert_eq!(recorder.painted(), 3);
        assert_eq!(recorder.total(), 2.0);
        assert_eq!(recorder.get(1, 0), 0.5);
        assert_eq!(recorder.get(3, 3), 1.0);
        assert_eq!(recorder.get(9, 9), 0.0);
    }
}
