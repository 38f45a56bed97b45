//! Geometry kernel.
//!
//! Pure planar math used by the editor: snapping to the unit grid, segment
//! projection for hit-testing, and opening footprints.

use floorkit_core::Units;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::model::{Opening, Wall};

/// Lengths below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// A point in model space (feet, Y up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Closest point on a segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// The closest point on the segment.
    pub point: Point,
    /// Distance from the query point to `point`.
    pub distance: f64,
    /// Parameter of `point` along the segment, in `[0, 1]`.
    pub t: f64,
}

/// Rounds a value to the nearest grid step of the unit system.
pub fn snap_value(v: f64, units: Units) -> f64 {
    let step = units.snap_step();
    // `+ 0.0` folds -0.0 into 0.0
    (v / step).round() * step + 0.0
}

/// Rounds both coordinates to the grid.
pub fn snap_point(p: Point, units: Units) -> Point {
    Point::new(snap_value(p.x, units), snap_value(p.y, units))
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle of the vector `a -> b` in radians, counter-clockwise from +X.
pub fn angle_between_points(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Point at parameter `t` along `a -> b`.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Projects `p` onto the segment `[a, b]`.
///
/// A degenerate segment (`a == b`) projects everything onto `a` with `t = 0`.
pub fn project_point_on_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < EPSILON * EPSILON {
        return SegmentProjection {
            point: a,
            distance: distance(p, a),
            t: 0.0,
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let point = lerp(a, b, t);
    SegmentProjection {
        point,
        distance: distance(p, point),
        t,
    }
}

/// Unit direction and left-hand normal of a wall, or `None` for a
/// zero-length wall.
pub fn wall_frame(wall: &Wall) -> Option<(Point, Point)> {
    let len = wall.length();
    if len < EPSILON {
        return None;
    }
    let dir = (wall.b - wall.a) * (1.0 / len);
    let normal = Point::new(-dir.y, dir.x);
    Some((dir, normal))
}

/// Footprint rectangle of an opening in model space.
///
/// Corners run along the wall's left face from `offset` to `offset + width`,
/// then back along the right face, each face half the wall thickness away
/// from the wall axis.
pub fn opening_polygon(wall: &Wall, opening: &Opening) -> [Point; 4] {
    let Some((dir, normal)) = wall_frame(wall) else {
        return [wall.a; 4];
    };

    let half = normal * (wall.thickness / 2.0);
    let start = wall.a + dir * opening.offset;
    let end = wall.a + dir * (opening.offset + opening.width);

    [start + half, end + half, end - half, start - half]
}

/// Even-odd point-in-polygon test.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the closed polygon outline, zero when inside.
pub fn distance_to_polygon(p: Point, polygon: &[Point]) -> f64 {
    if point_in_polygon(p, polygon) {
        return 0.0;
    }
    let n = polygon.len();
    (0..n)
        .map(|i| project_point_on_segment(p, polygon[i], polygon[(i + 1) % n]).distance)
        .fold(f64::INFINITY, f64::min)
}

/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of a set of points.
pub fn bounds_of(points: impl IntoIterator<Item = Point>) -> Option<(f64, f64, f64, f64)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p.x, p.y, p.x, p.y)),
        Some((x1, y1, x2, y2)) => Some((x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y))),
    })
}
