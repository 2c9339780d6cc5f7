//! Segment intersection and convex overlap tests.

use crate::polygon::point_inside_convex;
use crate::{Vec2, cross};
use fl_core::Real;

/// Cross terms below this magnitude are treated as parallel.
pub const PARALLEL_EPSILON: Real = 1e-9;

/// Intersection point of segments `p1-p2` and `q1-q2`, if any.
///
/// Near-parallel (including collinear) segments report no intersection.
pub fn segments_intersect(p1: &Vec2, p2: &Vec2, q1: &Vec2, q2: &Vec2) -> Option<Vec2> {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = cross(&r, &s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let qp = q1 - p1;
    let t = cross(&qp, &s) / denom;
    let u = cross(&qp, &r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + r * t)
    } else {
        None
    }
}

/// Iterate the closed edge loop of a polygon as `(start, end)` pairs.
pub fn edges(polygon: &[Vec2]) -> impl Iterator<Item = (&Vec2, &Vec2)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (&polygon[i], &polygon[(i + 1) % n]))
}

/// True when two clockwise convex polygons share any area or boundary.
///
/// Checks vertex containment in both directions, then edge crossings.
/// Either side having fewer than 3 points never overlaps.
pub fn polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    if a.iter().any(|p| point_inside_convex(p, b)) || b.iter().any(|p| point_inside_convex(p, a)) {
        return true;
    }
    edges(a).any(|(a1, a2)| edges(b).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2).is_some()))
}
