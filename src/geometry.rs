//! Geometry kernel: plane primitives shared by the layout, collision, and
//! selection code paths.
//!
//! Every function here is total over `f64` inputs. NaN or infinite
//! coordinates flow through the arithmetic and come back out as NaN/infinite
//! results; nothing panics and nothing returns `Result`. Callers that need
//! sanitized input do it at the boundary.

use serde::{Deserialize, Serialize};

/// Single shared tolerance for collinearity classification. Cross products
/// of nearly-straight triples jitter around zero at float precision; other
/// modules must use this constant rather than inventing their own.
pub const COLLINEAR_EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left origin, non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rect by `amount` on every side. Negative amounts shrink it;
    /// extents are floored at zero.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            (self.width + amount * 2.0).max(0.0),
            (self.height + amount * 2.0).max(0.0),
        )
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    pub fn edges(&self) -> [(Point, Point); 4] {
        let [a, b, c, d] = self.corners();
        [(a, b), (b, c), (c, d), (d, a)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Sign of the cross product `(q - p) x (r - q)`, labeled for screen
/// coordinates (y axis points down).
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let cross = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if cross.abs() <= COLLINEAR_EPS {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Whether `q` lies on the closed segment `p..r`, assuming the three points
/// are already known to be collinear.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Segment intersection via the standard orientation test, including the
/// collinear-overlap cases.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

pub fn point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.right() && p.y >= rect.y && p.y <= rect.bottom()
}

/// True when either endpoint sits inside the rectangle or the segment
/// crosses one of its four edges.
pub fn segment_intersects_rect(p1: Point, p2: Point, rect: &Rect) -> bool {
    if point_in_rect(p1, rect) || point_in_rect(p2, rect) {
        return true;
    }
    rect.edges()
        .iter()
        .any(|(a, b)| segments_intersect(p1, p2, *a, *b))
}

/// Ray-casting point-in-polygon with the even-odd rule. Iterates the edge
/// list directly; polygons from lasso selection can be large, so no
/// recursion.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        let crosses = (a.y > p.y) != (b.y > p.y);
        if crosses {
            let x_at = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// All four corners inside the polygon.
pub fn rect_inside_polygon(rect: &Rect, polygon: &[Point]) -> bool {
    rect.corners().iter().all(|c| point_in_polygon(*c, polygon))
}

/// Any corner inside the polygon, or any rect edge crossing any polygon
/// edge. This is the partial-overlap test lasso selection uses.
pub fn rect_intersects_polygon(rect: &Rect, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if rect.corners().iter().any(|c| point_in_polygon(*c, polygon)) {
        return true;
    }
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[j];
        let b = polygon[i];
        if rect
            .edges()
            .iter()
            .any(|(p, q)| segments_intersect(*p, *q, a, b))
        {
            return true;
        }
        j = i;
    }
    false
}
