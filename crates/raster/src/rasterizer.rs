//! Anti-aliasing scan converter
//!
//! Converts a glyph outline to coverage spans using signed-area accumulation:
//! - Curves are flattened to line segments at [`FLATTEN_TOLERANCE`]
//! - Each line deposits the exact area it sweeps into the pixel cells it
//!   crosses, plus the cover carried to the cells on its right
//! - A running sum along each row gives the winding-weighted coverage
//!
//! Fill rule is nonzero: coverage is `min(|accumulated|, 1)`, so overlapping
//! contours of the same direction do not double up, opposite directions cut
//! holes, and both lobes of a self-intersecting contour are filled.

use tracing::trace;

use crate::constants::{FLATTEN_TOLERANCE, MAX_GLYPH_EXTENT};
use crate::error::RasterError;
use crate::outline::{Outline, Point};
use crate::painter::Painter;

/// Coverage below this is treated as empty (float noise from cancelling edges)
const COVERAGE_EPSILON: f32 = 1.0 / 4096.0;

/// A horizontal run of pixels `[x0, x1)` on row `y` sharing one coverage value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
    /// Fraction of each pixel covered, in (0, 1]
    pub coverage: f32,
}

/// Pixel-aligned glyph box and the rows of it that fall inside the clip
#[derive(Debug, Clone, Copy)]
struct CellBox {
    x_min: i32,
    width: usize,
    row_min: i32,
    rows: usize,
}

impl CellBox {
    /// Accumulation row stride; two spare cells take spill-over at the right edge
    fn stride(&self) -> usize {
        self.width + 2
    }
}

/// Scan converter with a reusable accumulation buffer.
///
/// `width` and `height` are the clip bounds; no span is ever reported outside
/// `0..width` x `0..height`.
pub struct Rasterizer {
    width: u32,
    height: u32,
    lines: Vec<(Point, Point)>,
    accumulation: Vec<f32>,
    spans: Vec<Span>,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
            accumulation: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Scan convert `outline` placed at `(dx, dy)` and hand its spans to `painter`.
    ///
    /// The painter is called at most once per glyph and only with pixels that
    /// lie in both the glyph's bounding box and the clip.
    pub fn rasterize<P: Painter + ?Sized>(
        &mut self,
        outline: &Outline,
        dx: f32,
        dy: f32,
        painter: &mut P,
    ) -> Result<(), RasterError> {
        outline.validate()?;

        self.lines.clear();
        outline.flatten(dx, dy, FLATTEN_TOLERANCE, &mut self.lines);

        let Some(cells) = self.cell_box()? else {
            return Ok(());
        };

        self.accumulation.clear();
        self.accumulation.resize(cells.rows * cells.stride(), 0.0);

        let lines = std::mem::take(&mut self.lines);
        for &(from, to) in &lines {
            self.accumulate_line(&cells, from, to);
        }
        self.lines = lines;

        self.collect_spans(&cells);
        trace!(
            "Rasterizer: {} lines, box {}x{} at ({}, {}), {} spans",
            self.lines.len(),
            cells.width,
            cells.rows,
            cells.x_min,
            cells.row_min,
            self.spans.len()
        );

        if !self.spans.is_empty() {
            painter.paint(&self.spans);
        }
        Ok(())
    }

    /// Box around the flattened lines, rows clipped to the canvas.
    /// `None` when nothing of the glyph can land on the canvas.
    fn cell_box(&self) -> Result<Option<CellBox>, RasterError> {
        let Some(&(first, _)) = self.lines.first() else {
            return Ok(None);
        };
        let (mut lo, mut hi) = (first, first);
        for &(a, b) in &self.lines {
            for p in [a, b] {
                lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
                hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
            }
        }

        let x_min = lo.x.floor() as i64;
        let x_max = hi.x.ceil() as i64;
        let y_min = lo.y.floor() as i64;
        let y_max = hi.y.ceil() as i64;

        let width = (x_max - x_min) as u64;
        let height = (y_max - y_min) as u64;
        let row_min = y_min.max(0);
        let row_max = y_max.min(self.height as i64);
        let visible_x = x_max > 0 && x_min < self.width as i64;
        if width == 0 || row_min >= row_max || !visible_x {
            return Ok(None);
        }

        if width > MAX_GLYPH_EXTENT as u64 || height > MAX_GLYPH_EXTENT as u64 {
            return Err(RasterError::GlyphTooLarge { width, height });
        }

        Ok(Some(CellBox {
            x_min: x_min as i32,
            width: width as usize,
            row_min: row_min as i32,
            rows: (row_max - row_min) as usize,
        }))
    }

    /// Deposit the signed area of one line segment into the accumulation buffer.
    ///
    /// Rows are walked top to bottom; within a row the segment spans either
    /// one cell (trapezoid split between that cell and its right neighbour)
    /// or several (area ramps up across the crossed cells).
    fn accumulate_line(&mut self, cells: &CellBox, from: Point, to: Point) {
        if from.y == to.y {
            return;
        }
        let (dir, p0, p1) = if from.y < to.y {
            (1.0f32, from, to)
        } else {
            (-1.0f32, to, from)
        };

        // Box-local coordinates; rows start at the first visible row
        let ox = cells.x_min as f32;
        let oy = cells.row_min as f32;
        let p0 = Point::new(p0.x - ox, p0.y - oy);
        let p1 = Point::new(p1.x - ox, p1.y - oy);
        let limit = cells.width as f32;

        let dxdy = (p1.x - p0.x) / (p1.y - p0.y);
        let mut x = p0.x;
        if p0.y < 0.0 {
            x -= p0.y * dxdy;
        }

        let first_row = p0.y.max(0.0) as usize;
        let last_row = (p1.y.ceil().max(0.0) as usize).min(cells.rows);
        let stride = cells.stride();

        for row in first_row..last_row {
            let line_start = row * stride;
            let dy = ((row + 1) as f32).min(p1.y) - (row as f32).max(p0.y);
            let x_next = x + dxdy * dy;
            let d = dy * dir;

            let (x0, x1) = if x < x_next { (x, x_next) } else { (x_next, x) };
            let x0 = x0.clamp(0.0, limit);
            let x1 = x1.clamp(0.0, limit);
            let x0_floor = x0.floor();
            let x0i = x0_floor as usize;
            let x1_ceil = x1.ceil();
            let x1i = x1_ceil as usize;
            let acc = &mut self.accumulation[line_start..line_start + stride];

            if x1i <= x0i + 1 {
                let x_mid = 0.5 * (x0 + x1) - x0_floor;
                acc[x0i] += d - d * x_mid;
                acc[x0i + 1] += d * x_mid;
            } else {
                let s = (x1 - x0).recip();
                let x0f = x0 - x0_floor;
                let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
                let x1f = x1 - x1_ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;
                acc[x0i] += d * a0;
                if x1i == x0i + 2 {
                    acc[x0i + 1] += d * (1.0 - a0 - am);
                } else {
                    let a1 = s * (1.5 - x0f);
                    acc[x0i + 1] += d * (a1 - a0);
                    for cell in &mut acc[x0i + 2..x1i - 1] {
                        *cell += d * s;
                    }
                    let a2 = a1 + (x1i - x0i - 3) as f32 * s;
                    acc[x1i - 1] += d * (1.0 - a2 - am);
                }
                acc[x1i] += d * am;
            }

            x = x_next;
        }
    }

    /// Prefix-sum every row and emit spans for visible pixels
    fn collect_spans(&mut self, cells: &CellBox) {
        self.spans.clear();
        let stride = cells.stride();
        let clip_width = self.width as i32;

        for row in 0..cells.rows {
            let y = cells.row_min + row as i32;
            let acc = &self.accumulation[row * stride..row * stride + cells.width];
            let mut sum = 0.0f32;
            let mut run: Option<Span> = None;

            for (col, delta) in acc.iter().enumerate() {
                sum += delta;
                let x = cells.x_min + col as i32;
                let coverage = sum.abs().min(1.0);
                if x < 0 || x >= clip_width || coverage < COVERAGE_EPSILON {
                    if let Some(span) = run.take() {
                        self.spans.push(span);
                    }
                    continue;
                }
                match run.as_mut() {
                    Some(span) if span.coverage == coverage && span.x1 == x => span.x1 = x + 1,
                    _ => {
                        if let Some(span) = run.replace(Span {
                            y,
                            x0: x,
                            x1: x + 1,
                            coverage,
                        }) {
                            self.spans.push(span);
                        }
                    }
                }
            }
            if let Some(span) = run {
                self.spans.push(span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::CoverageRecorder;

    fn render(outline: &Outline, dx: f32, dy: f32, size: u32) -> CoverageRecorder {
        let mut rasterizer = Rasterizer::new(size, size);
        let mut recorder = CoverageRecorder::new(size, size);
        rasterizer.rasterize(outline, dx, dy, &mut recorder).unwrap();
        recorder
    }

    fn square(x: f32, y: f32, side: f32) -> Vec<(f32, f32)> {
        vec![(x, y), (x + side, y), (x + side, y + side), (x, y + side)]
    }

    #[test]
    fn test_pixel_aligned_square() {
        let outline = Outline::from_polygons(&[&square(2.0, 3.0, 4.0)]);
        let recorder = render(&outline, 0.0, 0.0, 16);

        for y in 0..16 {
            for x in 0..16 {
                let inside = (2..6).contains(&x) && (3..7).contains(&y);
                let expected = if inside { 1.0 } else { 0.0 };
                assert!(
                    (recorder.get(x, y) - expected).abs() < 1e-5,
                    "pixel ({x}, {y}) = {}",
                    recorder.get(x, y)
                );
            }
        }
    }

    #[test]
    fn test_fractional_square_area() {
        let outline = Outline::from_polygons(&[&square(2.3, 3.7, 10.0)]);
        let recorder = render(&outline, 0.0, 0.0, 32);
        assert!((recorder.total() - 100.0).abs() < 1e-3, "total {}", recorder.total());

        // Left edge column is 70% covered, top edge row 30%
        assert!((recorder.get(2, 8) - 0.7).abs() < 1e-4);
        assert!((recorder.get(6, 3) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_triangle_area() {
        let outline = Outline::from_polygons(&[&[(1.5, 1.0), (20.25, 3.5), (7.0, 17.75)]]);
        let recorder = render(&outline, 0.0, 0.0, 32);
        // Shoelace formula
        let expected: f32 = 0.5
            * ((1.5f32 * 3.5 - 20.25 * 1.0) + (20.25 * 17.75 - 7.0 * 3.5) + (7.0 * 1.0 - 1.5 * 17.75)).abs();
        assert!((recorder.total() - expected).abs() < 1e-2, "{} vs {expected}", recorder.total());
    }

    #[test]
    fn test_curved_area() {
        // Rounded blob from four quadratic arcs; compare against the area of
        // its own flattened polygon.
        let (cx, cy, r) = (16.0f32, 16.0f32, 10.0f32);
        let mut outline = Outline::new();
        outline.move_to(Point::new(cx + r, cy));
        let corners = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
        let ends = [(0.0, r), (-r, 0.0), (0.0, -r), (r, 0.0)];
        for (i, (sx, sy)) in corners.iter().enumerate() {
            let mid = Point::new(cx + sx * r, cy + sy * r);
            let (ex, ey) = ends[i];
            outline.quad_to(mid, Point::new(cx + ex, cy + ey));
        }
        outline.close();

        let recorder = render(&outline, 0.0, 0.0, 32);
        let mut exact = Vec::new();
        outline.flatten(0.0, 0.0, FLATTEN_TOLERANCE, &mut exact);
        let polygon_area = 0.5
            * exact
                .iter()
                .map(|(a, b)| a.x * b.y - b.x * a.y)
                .sum::<f32>()
                .abs();
        assert!((recorder.total() - polygon_area).abs() < 1e-2);
    }

    #[test]
    fn test_winding_direction_does_not_matter() {
        let cw = Outline::from_polygons(&[&[(2.0, 2.0), (9.5, 2.0), (9.5, 9.5), (2.0, 9.5)]]);
        let ccw = Outline::from_polygons(&[&[(2.0, 2.0), (2.0, 9.5), (9.5, 9.5), (9.5, 2.0)]]);
        let a = render(&cw, 0.0, 0.0, 16);
        let b = render(&ccw, 0.0, 0.0, 16);
        assert_eq!(a.coverage(), b.coverage());
    }

    #[test]
    fn test_nonzero_overlapping_contours() {
        // Two squares with the same winding overlap by a 2x4 region; the
        // overlap is covered once, not twice.
        let outline = Outline::from_polygons(&[&square(2.0, 2.0, 4.0), &square(4.0, 2.0, 4.0)]);
        let recorder = render(&outline, 0.0, 0.0, 16);
        assert!((recorder.get(4, 3) - 1.0).abs() < 1e-5);
        assert!((recorder.total() - 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_opposite_winding_cuts_hole() {
        let outer: Vec<(f32, f32)> = square(2.0, 2.0, 10.0);
        let inner: Vec<(f32, f32)> = square(5.0, 5.0, 4.0).into_iter().rev().collect();
        let outline = Outline::from_polygons(&[&outer, &inner]);
        let recorder = render(&outline, 0.0, 0.0, 16);

        assert_eq!(recorder.get(6, 6), 0.0);
        assert!((recorder.get(3, 3) - 1.0).abs() < 1e-5);
        assert!((recorder.total() - 84.0).abs() < 1e-3);
    }

    #[test]
    fn test_self_intersecting_bow_tie() {
        // Crosses itself at (6, 6): a left and a right triangle of opposite
        // winding, each of area 16. Nonzero fills both.
        let outline = Outline::from_polygons(&[&[(2.0, 2.0), (10.0, 10.0), (10.0, 2.0), (2.0, 10.0)]]);
        let recorder = render(&outline, 0.0, 0.0, 16);
        assert!((recorder.total() - 32.0).abs() < 1e-2, "total {}", recorder.total());
        assert!(recorder.get(3, 6) > 0.99);
        assert!(recorder.get(8, 6) > 0.99);
        assert!(recorder.get(6, 3) < 1e-4);
    }

    #[test]
    fn test_degenerate_contour_paints_nothing() {
        // Zero-area contour: out along a diagonal and straight back
        let outline = Outline::from_polygons(&[&[(1.0, 1.0), (9.3, 7.1), (1.0, 1.0)]]);
        let recorder = render(&outline, 0.0, 0.0, 16);
        assert_eq!(recorder.painted(), 0);

        let flat = Outline::from_polygons(&[&[(1.0, 4.0), (12.0, 4.0)]]);
        let recorder = render(&flat, 0.0, 0.0, 16);
        assert_eq!(recorder.painted(), 0);
    }

    #[test]
    fn test_translation() {
        let outline = Outline::from_polygons(&[&square(0.0, -4.0, 4.0)]);
        let recorder = render(&outline, 5.0, 10.0, 16);
        assert!((recorder.get(5, 6) - 1.0).abs() < 1e-5);
        assert!((recorder.get(8, 9) - 1.0).abs() < 1e-5);
        assert_eq!(recorder.get(5, 10), 0.0);
        assert!((recorder.total() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_clipped_to_canvas() {
        // Square hanging off the top-left corner; only the visible quarter
        // is reported and it keeps full coverage.
        let outline = Outline::from_polygons(&[&square(-3.5, -3.5, 7.0)]);
        let recorder = render(&outline, 0.0, 0.0, 8);
        assert!((recorder.total() - 12.25).abs() < 1e-3);
        assert!((recorder.get(0, 0) - 1.0).abs() < 1e-5);
        assert!((recorder.get(3, 3) - 0.25).abs() < 1e-4);

        let offscreen = Outline::from_polygons(&[&square(20.0, 20.0, 4.0)]);
        let recorder = render(&offscreen, 0.0, 0.0, 8);
        assert_eq!(recorder.painted(), 0);
    }

    #[test]
    fn test_spans_stay_inside_glyph_box() {
        struct Collect(Vec<Span>);
        impl Painter for Collect {
            fn paint(&mut self, spans: &[Span]) {
                self.0.extend_from_slice(spans);
            }
        }

        let outline = Outline::from_polygons(&[&[(3.2, 4.5), (9.9, 5.1), (6.0, 11.6)]]);
        let mut rasterizer = Rasterizer::new(32, 32);
        let mut collect = Collect(Vec::new());
        rasterizer.rasterize(&outline, 0.0, 0.0, &mut collect).unwrap();

        assert!(!collect.0.is_empty());
        for span in &collect.0 {
            assert!(span.x0 >= 3 && span.x1 <= 10, "{span:?}");
            assert!(span.y >= 4 && span.y < 12, "{span:?}");
            assert!(span.coverage > 0.0 && span.coverage <= 1.0);
            assert!(span.x0 < span.x1);
        }
    }

    #[test]
    fn test_malformed_outline_is_reported() {
        let mut outline = Outline::new();
        outline.move_to(Point::new(1.0, 1.0));
        outline.line_to(Point::new(5.0, 1.0));
        outline.line_to(Point::new(5.0, 5.0));

        let mut rasterizer = Rasterizer::new(8, 8);
        let mut recorder = CoverageRecorder::new(8, 8);
        assert_eq!(
            rasterizer.rasterize(&outline, 0.0, 0.0, &mut recorder),
            Err(RasterError::OpenContour { contour: 0 })
        );
        assert_eq!(recorder.painted(), 0);

        let huge = Outline::from_polygons(&[&square(0.0, 0.0, 40_000.0)]);
        assert!(matches!(
            rasterizer.rasterize(&huge, 0.0, 0.0, &mut recorder),
            Err(RasterError::GlyphTooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_glyph_off_canvas_is_skipped() {
        let mut rasterizer = Rasterizer::new(8, 8);
        let mut recorder = CoverageRecorder::new(8, 8);
        let huge = Outline::from_polygons(&[&square(0.0, 0.0, 40_000.0)]);

        rasterizer.rasterize(&huge, -50_000.0, 0.0, &mut recorder).unwrap();
        rasterizer.rasterize(&huge, 100.0, 0.0, &mut recorder).unwrap();
        rasterizer.rasterize(&huge, 0.0, -45_000.0, &mut recorder).unwrap();
        assert_eq!(recorder.painted(), 0);
    }

    #[test]
    fn test_glyph_at_extent_limit() {
        let mut rasterizer = Rasterizer::new(8, 8);
        let mut recorder = CoverageRecorder::new(8, 8);
        let side = MAX_GLYPH_EXTENT as f32;

        let largest = Outline::from_polygons(&[&square(0.0, 0.0, side)]);
        rasterizer.rasterize(&largest, -4.0, -4.0, &mut recorder).unwrap();
        assert_eq!(recorder.painted(), 64);

        let too_large = Outline::from_polygons(&[&square(0.0, 0.0, side + 2.0)]);
        assert!(matches!(
            rasterizer.rasterize(&too_large, -4.0, -4.0, &mut recorder),
            Err(RasterError::GlyphTooLarge { .. })
        ));
    }

    #[test]
    fn test_empty_outline() {
        let mut rasterizer = Rasterizer::new(8, 8);
        let mut recorder = CoverageRecorder::new(8, 8);
        rasterizer.rasterize(&Outline::new(), 3.0, 3.0, &mut recorder).unwrap();
        assert_eq!(recorder.painted(), 0);
    }
}
