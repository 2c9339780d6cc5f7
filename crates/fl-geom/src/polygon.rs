//! Area, containment and projection queries on simple polygons.

use crate::{Vec2, cross};
use fl_core::Real;

/// Slack applied to edge tests so points on the boundary count as inside.
const BOUNDARY_EPSILON: Real = 1e-12;

/// Signed shoelace area: negative for clockwise winding (y up).
pub fn signed_area(points: &[Vec2]) -> Real {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    0.5 * twice
}

/// Unsigned polygon area. Returns 0 for fewer than 3 points.
pub fn polygon_area(points: &[Vec2]) -> Real {
    signed_area(points).abs()
}

/// Containment test for a clockwise-wound convex polygon.
///
/// A point is inside when, for every edge `a -> b`, `cross(p - a, b - a) >= 0`.
/// Points on the boundary are inside.
pub fn point_inside_convex(point: &Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        cross(&(point - a), &(b - a)) >= -BOUNDARY_EPSILON
    })
}

/// Projection interval `(min, max)` of `points` onto `axis`.
///
/// Empty input gives the inverted interval `(+inf, -inf)`.
pub fn project_bounds(points: &[Vec2], axis: &Vec2) -> (Real, Real) {
    points
        .iter()
        .map(|p| p.dot(axis))
        .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

/// True when the polygon is strictly convex with clockwise winding.
///
/// Collinear triples are rejected, as is any polygon with fewer than 3 points.
pub fn is_convex_clockwise(points: &[Vec2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let turns_right = (0..n).all(|i| {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let c = &points[(i + 2) % n];
        cross(&(b - a), &(c - b)) < 0.0
    });
    turns_right && signed_area(points) < 0.0
}
