//! Glyph outlines in pixel space
//!
//! An [`Outline`] is a list of contours, each a start point followed by line,
//! quadratic and cubic segments. Coordinates are pixels with the y axis
//! pointing down, relative to the glyph's pen position on the baseline.
//! Outline sources build them through the `move_to` / `line_to` / `quad_to` /
//! `cubic_to` / `close` calls; the rasterizer validates and flattens them.

use crate::constants::{MAX_COORDINATE, MAX_FLATTEN_DEPTH};
use crate::error::RasterError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[inline]
    fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// One outline segment; the start point is the previous segment's end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line(p) | Segment::Quad(_, p) | Segment::Cubic(_, _, p) => p,
        }
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        let (a, b, c, n) = match *self {
            Segment::Line(p) => (p, p, p, 1),
            Segment::Quad(c, p) => (c, p, p, 2),
            Segment::Cubic(c1, c2, p) => (c1, c2, p, 3),
        };
        [a, b, c].into_iter().take(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub start: Point,
    pub segments: Vec<Segment>,
    /// Set by [`Outline::close`]; open contours are rejected by validation
    pub closed: bool,
}

impl Contour {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    /// Point the contour currently ends at
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().flat_map(Segment::points))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    contours: Vec<Contour>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon outline, one contour per point list
    pub fn from_polygons(polygons: &[&[(f32, f32)]]) -> Self {
        let mut outline = Self::new();
        for polygon in polygons {
            let mut points = polygon.iter().map(|&(x, y)| Point::new(x, y));
            let Some(first) = points.next() else {
                continue;
            };
            outline.move_to(first);
            for p in points {
                outline.line_to(p);
            }
            outline.close();
        }
        outline
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Start a new contour
    pub fn move_to(&mut self, p: Point) {
        self.contours.push(Contour::new(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.current().segments.push(Segment::Line(p));
    }

    pub fn quad_to(&mut self, control: Point, p: Point) {
        self.current().segments.push(Segment::Quad(control, p));
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.current().segments.push(Segment::Cubic(c1, c2, p));
    }

    /// Close the current contour with a straight line back to its start
    pub fn close(&mut self) {
        if let Some(contour) = self.contours.last_mut() {
            if contour.end() != contour.start {
                let start = contour.start;
                contour.segments.push(Segment::Line(start));
            }
            contour.closed = true;
        }
    }

    /// Drawing without a `move_to` starts a contour at the origin
    fn current(&mut self) -> &mut Contour {
        if self.contours.is_empty() {
            self.contours.push(Contour::new(Point::default()));
        }
        let last = self.contours.len() - 1;
        &mut self.contours[last]
    }

    /// Control-point bounding box `(min, max)`; it contains every curve.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.contours.iter().flat_map(Contour::points);
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Check that every contour is closed and every coordinate is usable
    pub fn validate(&self) -> Result<(), RasterError> {
        for (index, contour) in self.contours.iter().enumerate() {
            if !contour.closed || contour.end() != contour.start {
                return Err(RasterError::OpenContour { contour: index });
            }
            for p in contour.points() {
                if !p.x.is_finite() || !p.y.is_finite() {
                    return Err(RasterError::NonFiniteCoordinate { contour: index });
                }
                if p.x.abs() > MAX_COORDINATE || p.y.abs() > MAX_COORDINATE {
                    return Err(RasterError::CoordinateOverflow { contour: index });
                }
            }
        }
        Ok(())
    }

    /// Flatten every contour into line segments offset by `(dx, dy)`.
    ///
    /// Each contour contributes a closed chain of `(from, to)` pairs.
    pub fn flatten(&self, dx: f32, dy: f32, tolerance: f32, lines: &mut Vec<(Point, Point)>) {
        let mut polyline = Vec::new();
        for contour in &self.contours {
            polyline.clear();
            let mut current = contour.start.offset(dx, dy);
            polyline.push(current);
            for segment in &contour.segments {
                match *segment {
                    Segment::Line(p) => polyline.push(p.offset(dx, dy)),
                    Segment::Quad(c, p) => flatten_quad(
                        current,
                        c.offset(dx, dy),
                        p.offset(dx, dy),
                        tolerance,
                        0,
                        &mut polyline,
                    ),
                    Segment::Cubic(c1, c2, p) => flatten_cubic(
                        current,
                        c1.offset(dx, dy),
                        c2.offset(dx, dy),
                        p.offset(dx, dy),
                        tolerance,
                        0,
                        &mut polyline,
                    ),
                }
                current = segment.end().offset(dx, dy);
            }
            lines.extend(polyline.windows(2).map(|w| (w[0], w[1])));
        }
    }
}

/// Recursive De Casteljau subdivision of a quadratic Bézier.
///
/// Stops when the control point is within `tolerance` of the chord midpoint,
/// then emits the end point.
pub fn flatten_quad(p0: Point, p1: Point, p2: Point, tolerance: f32, depth: u32, output: &mut Vec<Point>) {
    let mid = p0.midpoint(p2);
    let dx = p1.x - mid.x;
    let dy = p1.y - mid.y;

    if depth >= MAX_FLATTEN_DEPTH || dx * dx + dy * dy <= tolerance * tolerance {
        output.push(p2);
        return;
    }

    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let p012 = p01.midpoint(p12);
    flatten_quad(p0, p01, p012, tolerance, depth + 1, output);
    flatten_quad(p012, p12, p2, tolerance, depth + 1, output);
}

/// Recursive subdivision of a cubic Bézier at t = 0.5.
///
/// Flat when both control points deviate from the chord's third points by at
/// most `tolerance` (the `|3c - 2p - q|` bound scaled by 1/4).
pub fn flatten_cubic(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    tolerance: f32,
    depth: u32,
    output: &mut Vec<Point>,
) {
    let ux = 3.0 * p1.x - 2.0 * p0.x - p3.x;
    let uy = 3.0 * p1.y - 2.0 * p0.y - p3.y;
    let vx = 3.0 * p2.x - p0.x - 2.0 * p3.x;
    let vy = 3.0 * p2.y - p0.y - 2.0 * p3.y;
    let flatness = (ux * ux).max(vx * vx) + (uy * uy).max(vy * vy);

    if depth >= MAX_FLATTEN_DEPTH || flatness <= 16.0 * tolerance * tolerance {
        output.push(p3);
        return;
    }

    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let p23 = p2.midpoint(p3);
    let p012 = p01.midpoint(p12);
    let p123 = p12.midpoint(p23);
    let mid = p012.midpoint(p123);
    flatten_cubic(p0, p01, p012, mid, tolerance, depth + 1, output);
    flatten_cubic(mid, p123, p23, p3, tolerance, depth + 1, output);
}
