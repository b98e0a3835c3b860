//! Vector outlines of garment pieces.
//!
//! An [`Outline`] is a closed chain of straight lines and Bézier curves in
//! the SVG coordinate frame (y grows downward). Curves are kept exact until
//! the rasterizer samples them; bounding boxes use the true curve extents
//! from lyon_geom rather than the control polygon.

use lyon_geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment, point};

use crate::error::{ChartError, Result};
use crate::geometry::Point;

/// One piece of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

impl Segment {
    pub fn start_point(&self) -> Point {
        match self {
            Segment::Line(s) => s.from.into(),
            Segment::Quadratic(s) => s.from.into(),
            Segment::Cubic(s) => s.from.into(),
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            Segment::Line(s) => s.to.into(),
            Segment::Quadratic(s) => s.to.into(),
            Segment::Cubic(s) => s.to.into(),
        }
    }

    /// Point at parameter `t` in `0.0..=1.0`.
    pub fn sample(&self, t: f64) -> Point {
        match self {
            Segment::Line(s) => s.sample(t).into(),
            Segment::Quadratic(s) => s.sample(t).into(),
            Segment::Cubic(s) => s.sample(t).into(),
        }
    }

    /// Exact extents of the segment.
    pub fn bounds(&self) -> Bounds {
        let b = match self {
            Segment::Line(s) => s.bounding_box(),
            Segment::Quadratic(s) => s.bounding_box(),
            Segment::Cubic(s) => s.bounding_box(),
        };
        Bounds { min_x: b.min.x, min_y: b.min.y, max_x: b.max.x, max_y: b.max.y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Endpoints closer than this are considered coincident.
const CLOSE_EPSILON: f64 = 1e-9;

/// A garment piece contour. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    segments: Vec<Segment>,
    closed: bool,
}

impl Outline {
    /// Parse SVG path data (`d` attribute) into an outline.
    ///
    /// Relative commands, shorthand curves and arcs are resolved by svgtypes;
    /// arcs arrive already converted to cubic curves. Only a single subpath
    /// is accepted.
    pub fn from_path_data(data: &str) -> Result<Self> {
        let mut builder: Option<OutlineBuilder> = None;
        let mut closed = false;

        for segment in svgtypes::SimplifyingPathParser::from(data) {
            let segment = segment.map_err(|e| ChartError::PathData(e.to_string()))?;
            if closed {
                return Err(ChartError::PathData("only one subpath is supported".to_string()));
            }
            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => {
                    if builder.as_ref().is_some_and(|b| !b.segments.is_empty()) {
                        return Err(ChartError::PathData("only one subpath is supported".to_string()));
                    }
                    builder = Some(OutlineBuilder::new(x, y));
                }
                svgtypes::SimplePathSegment::LineTo { x, y } => {
                    require(&mut builder)?.push_line(x, y);
                }
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    require(&mut builder)?.push_quadratic(x1, y1, x, y);
                }
                svgtypes::SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                    require(&mut builder)?.push_cubic(x1, y1, x2, y2, x, y);
                }
                svgtypes::SimplePathSegment::ClosePath => {
                    require(&mut builder)?.push_closing_line();
                    closed = true;
                }
            }
        }

        let builder = builder.ok_or_else(|| ChartError::PathData("path data is empty".to_string()))?;
        Ok(Outline { segments: builder.segments, closed })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// First point of the contour.
    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start_point)
    }

    /// Last point of the contour.
    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::end_point)
    }

    /// Closed means explicitly closed *and* ending where it starts.
    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => self.closed && start.distance(end) < CLOSE_EPSILON,
            _ => false,
        }
    }

    /// Exact bounding box of all segments, `None` for an empty outline.
    pub fn bounding_box(&self) -> Option<Bounds> {
        self.segments.iter().map(Segment::bounds).reduce(Bounds::union)
    }

    /// Sample every segment at `samples_per_segment` evenly spaced parameter
    /// values (both endpoints included), in path order.
    pub fn sample_points(&self, samples_per_segment: usize) -> Vec<Point> {
        let n = samples_per_segment.max(2);
        let mut points = Vec::with_capacity(n * self.segments.len());
        for segment in &self.segments {
            for i in 0..n {
                let t = i as f64 / (n - 1) as f64;
                points.push(segment.sample(t));
            }
        }
        points
    }

    /// Serialize as SVG path data with absolute commands.
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        let Some(start) = self.start() else {
            return d;
        };
        d.push_str(&format!("M {},{}", start.x, start.y));

        // The closing line is implied by Z.
        let mut segments = self.segments.as_slice();
        if self.is_closed() {
            if let Some((Segment::Line(_), rest)) = segments.split_last() {
                segments = rest;
            }
        }

        for segment in segments {
            let command = match segment {
                Segment::Line(s) => format!(" L {},{}", s.to.x, s.to.y),
                Segment::Quadratic(s) => format!(" Q {},{} {},{}", s.ctrl.x, s.ctrl.y, s.to.x, s.to.y),
                Segment::Cubic(s) => format!(
                    " C {},{} {},{} {},{}",
                    s.ctrl1.x, s.ctrl1.y, s.ctrl2.x, s.ctrl2.y, s.to.x, s.to.y
                ),
            };
            d.push_str(&command);
        }
        if self.closed {
            d.push_str(" Z");
        }
        d
    }
}

fn require(builder: &mut Option<OutlineBuilder>) -> Result<&mut OutlineBuilder> {
    builder
        .as_mut()
        .ok_or_else(|| ChartError::PathData("path data must start with a move-to".to_string()))
}

/// Builds an outline from relative moves, the way a pattern draft is drawn:
/// pen down at a start point, then "go right 3, down 5, curve to ...".
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    start: (f64, f64),
    current: (f64, f64),
    segments: Vec<Segment>,
}

impl OutlineBuilder {
    pub fn new(x: f64, y: f64) -> Self {
        Self { start: (x, y), current: (x, y), segments: Vec::new() }
    }

    /// Straight line by `(dx, dy)`.
    pub fn line_by(mut self, dx: f64, dy: f64) -> Self {
        let (x, y) = self.current;
        self.push_line(x + dx, y + dy);
        self
    }

    pub fn horizontal_by(self, dx: f64) -> Self {
        self.line_by(dx, 0.0)
    }

    pub fn vertical_by(self, dy: f64) -> Self {
        self.line_by(0.0, dy)
    }

    /// Quadratic curve; control and end point relative to the current point.
    pub fn quadratic_by(mut self, ctrl: (f64, f64), to: (f64, f64)) -> Self {
        let (x, y) = self.current;
        self.push_quadratic(x + ctrl.0, y + ctrl.1, x + to.0, y + to.1);
        self
    }

    /// Cubic curve; both controls and the end point relative to the current point.
    pub fn cubic_by(mut self, ctrl1: (f64, f64), ctrl2: (f64, f64), to: (f64, f64)) -> Self {
        let (x, y) = self.current;
        self.push_cubic(x + ctrl1.0, y + ctrl1.1, x + ctrl2.0, y + ctrl2.1, x + to.0, y + to.1);
        self
    }

    /// Close the contour with a straight line back to the start if needed.
    pub fn close(mut self) -> Outline {
        self.push_closing_line();
        Outline { segments: self.segments, closed: true }
    }

    /// Finish without closing. The rasterizer rejects such outlines.
    pub fn finish(self) -> Outline {
        Outline { segments: self.segments, closed: false }
    }

    fn push_line(&mut self, x: f64, y: f64) {
        let (fx, fy) = self.current;
        self.segments.push(Segment::Line(LineSegment { from: point(fx, fy), to: point(x, y) }));
        self.current = (x, y);
    }

    fn push_quadratic(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let (fx, fy) = self.current;
        self.segments.push(Segment::Quadratic(QuadraticBezierSegment {
            from: point(fx, fy),
            ctrl: point(cx, cy),
            to: point(x, y),
        }));
        self.current = (x, y);
    }

    fn push_cubic(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let (fx, fy) = self.current;
        self.segments.push(Segment::Cubic(CubicBezierSegment {
            from: point(fx, fy),
            ctrl1: point(c1x, c1y),
            ctrl2: point(c2x, c2y),
            to: point(x, y),
        }));
        self.current = (x, y);
    }

    fn push_closing_line(&mut self) {
        let (sx, sy) = self.start;
        let (cx, cy) = self.current;
        if (sx - cx).abs() > CLOSE_EPSILON || (sy - cy).abs() > CLOSE_EPSILON {
            self.push_line(sx, sy);
        }
        self.current = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> Outline {
        OutlineBuilder::new(0.0, 0.0)
            .horizontal_by(40.0)
            .vertical_by(20.0)
            .horizontal_by(-40.0)
            .close()
    }

    #[test]
    fn close_adds_missing_edge() {
        let outline = rectangle();
        assert_eq!(outline.segments().len(), 4);
        assert!(outline.is_closed());
        assert_eq!(outline.end(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn close_skips_edge_when_already_home() {
        let outline = OutlineBuilder::new(0.0, 0.0)
            .horizontal_by(10.0)
            .vertical_by(10.0)
            .line_by(-10.0, -10.0)
            .close();
        assert_eq!(outline.segments().len(), 3);
        assert!(outline.is_closed());
    }

    #[test]
    fn unfinished_outline_is_open() {
        let outline = OutlineBuilder::new(0.0, 0.0).horizontal_by(10.0).vertical_by(10.0).finish();
        assert!(!outline.is_closed());
    }

    #[test]
    fn bounding_box_uses_curve_extents() {
        // Control points reach y = -10 but the curve itself peaks at y = -7.5.
        let outline = OutlineBuilder::new(0.0, 0.0)
            .cubic_by((0.0, -10.0), (10.0, -10.0), (10.0, 0.0))
            .close();
        let bounds = outline.bounding_box().unwrap();
        assert!((bounds.min_y + 7.5).abs() < 1e-9, "got {}", bounds.min_y);
        assert!((bounds.width() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn sampling_includes_endpoints() {
        let outline = rectangle();
        let points = outline.sample_points(101);
        assert_eq!(points.len(), 4 * 101);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[100], Point::new(40.0, 0.0));
        assert_eq!(points[50], Point::new(20.0, 0.0));
    }

    #[test]
    fn parses_relative_path_data() {
        let outline = Outline::from_path_data("m 0,0 h 40 v 20 h -40 z").unwrap();
        assert!(outline.is_closed());
        let bounds = outline.bounding_box().unwrap();
        assert_eq!((bounds.width(), bounds.height()), (40.0, 20.0));
    }

    #[test]
    fn path_data_round_trip_keeps_shape() {
        let outline = OutlineBuilder::new(0.0, 10.0)
            .quadratic_by((5.0, -10.0), (10.0, 0.0))
            .vertical_by(5.0)
            .close();
        let parsed = Outline::from_path_data(&outline.to_path_data()).unwrap();
        assert_eq!(parsed.segments(), outline.segments());
        assert!(parsed.is_closed());
    }

    #[test]
    fn path_data_text() {
        let outline = OutlineBuilder::new(0.0, 10.0)
            .quadratic_by((5.0, -10.0), (10.0, 0.0))
            .vertical_by(5.0)
            .cubic_by((-1.0, 1.0), (-2.0, 1.0), (-2.5, 0.0))
            .close();
        assert_eq!(outline.to_path_data(), "M 0,10 Q 5,0 10,10 L 10,15 C 9,16 8,16 7.5,15 Z");
    }

    #[test]
    fn rejects_bad_path_data() {
        assert!(matches!(Outline::from_path_data(""), Err(ChartError::PathData(_))));
        assert!(matches!(Outline::from_path_data("M 0 0 L 1 1 Z M 5 5 L 6 6 Z"), Err(ChartError::PathData(_))));
    }
}
