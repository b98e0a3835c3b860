//! Polygon types used by the rasterizer.
//!
//! Outlines are made of curves; before stitches can be tested against them
//! they are sampled into a [`Polygon`] (a closed ring of points).

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<lyon_geom::Point<f64>> for Point {
    fn from(p: lyon_geom::Point<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Points closer than this are treated as the same vertex.
const VERTEX_EPSILON: f64 = 1e-9;

/// A net area below this fraction of the bounding box area counts as zero
/// when picking the orientation.
const AREA_EPSILON: f64 = 1e-9;

/// A closed ring. The closing edge from the last point back to the first is
/// implicit.
///
/// A ring that crosses itself is resolved by winding: only the lobes wound
/// the same way as the ring as a whole are inside. Reverse-wound lobes, such
/// as the second loop of a figure-eight, are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer: Vec<Point>,
    /// +1 or -1: the winding number sign that counts as inside.
    orientation: i32,
}

impl Polygon {
    /// Build a polygon from points sampled along a closed path, repairing
    /// what sampling leaves behind.
    ///
    /// Consecutive duplicates (every segment repeats the previous segment's
    /// end point) and the duplicated closing point are removed. Returns
    /// `None` when fewer than three distinct vertices remain or every vertex
    /// lies on one line. A self-crossing ring is kept and takes the
    /// orientation of its net area, or counter-clockwise (y up) when the
    /// lobes cancel.
    pub fn from_samples(mut points: Vec<Point>) -> Option<Self> {
        points.dedup_by(|a, b| a.distance(*b) < VERTEX_EPSILON);

        while points.len() > 1 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if first.distance(last) < VERTEX_EPSILON {
                points.pop();
            } else {
                break;
            }
        }

        if points.len() < 3 || is_flat(&points) {
            return None;
        }

        let mut polygon = Self { outer: points, orientation: 1 };
        let (min_x, min_y, max_x, max_y) = polygon.bounding_box();
        if polygon.signed_area() < -AREA_EPSILON * (max_x - min_x) * (max_y - min_y) {
            polygon.orientation = -1;
        }
        Some(polygon)
    }

    /// Ring vertices, without the repeated closing point.
    pub fn points(&self) -> &[Point] {
        &self.outer
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let min_x = self.outer.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.outer.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.outer.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.outer.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        (min_x, min_y, max_x, max_y)
    }

    /// Shoelace area: positive for counter-clockwise rings in a y-up frame,
    /// which is clockwise on screen (y down).
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.outer)
    }

    /// Whether the point lies inside one of the ring's kept lobes.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        winding_number(x, y, &self.outer) * self.orientation > 0
    }
}

/// Shoelace area of an implicitly closed ring.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// True when every point sits on the line through the first point and the
/// point farthest from it, so the ring encloses nothing.
fn is_flat(points: &[Point]) -> bool {
    let origin = points[0];
    let far = points.iter().copied().fold(origin, |best, p| {
        if origin.distance(p) > origin.distance(best) { p } else { best }
    });
    let span = origin.distance(far);
    if span < VERTEX_EPSILON {
        return true;
    }
    points.iter().all(|p| cross(origin, far, *p).abs() / span < VERTEX_EPSILON)
}

/// Twice the signed area of triangle `a b p`: positive when `p` is left of
/// `a -> b` in a y-up frame.
#[inline]
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Winding number of the ring around a point.
///
/// Counter-clockwise loops (y up) count +1, clockwise loops -1. Edges are
/// half-open: for an axis-aligned box, a point on the minimum x or y edge is
/// wound, a point on the maximum x or y edge is not.
pub fn winding_number(px: f64, py: f64, polygon: &[Point]) -> i32 {
    let n = polygon.len();
    if n < 3 {
        return 0;
    }

    let p = Point::new(px, py);
    let mut winding = 0;
    let mut j = n - 1;

    for i in 0..n {
        let (a, b) = (polygon[j], polygon[i]);
        if a.y <= py {
            if b.y > py && cross(a, b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= py && cross(a, b, p) < 0.0 {
            winding -= 1;
        }
        j = i;
    }

    winding
}
