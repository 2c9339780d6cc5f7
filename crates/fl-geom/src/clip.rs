//! Single half-plane clipping of convex polygons.

use crate::Vec2;
use crate::polygon::polygon_area;
use fl_core::Real;

/// Keep the part of `polygon` with `dot(v, normal) <= offset`.
///
/// Walks the edges in order, emitting each inside vertex and the interpolated
/// crossing point wherever an edge straddles the plane. Winding is preserved.
/// The result may hold fewer than 3 points when the polygon lies above the
/// plane; callers treat that as zero area.
pub fn clip_below_plane(polygon: &[Vec2], normal: &Vec2, offset: Real) -> Vec<Vec2> {
    let n = polygon.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let cur = polygon[i];
        let next = polygon[(i + 1) % n];
        let d_cur = cur.dot(normal) - offset;
        let d_next = next.dot(normal) - offset;
        let cur_inside = d_cur <= 0.0;

        if cur_inside {
            out.push(cur);
        }
        if cur_inside != (d_next <= 0.0) {
            // opposite signs, so the denominator is non-zero
            let t = d_cur / (d_cur - d_next);
            out.push(cur + (next - cur) * t);
        }
    }
    out
}

/// Area of `polygon` below the plane `dot(v, up) = offset`.
pub fn submerged_area(polygon: &[Vec2], up: &Vec2, offset: Real) -> Real {
    polygon_area(&clip_below_plane(polygon, up, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::project_bounds;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn clip_half_square() {
        let up = Vec2::new(0.0, 1.0);
        let half = clip_below_plane(&square(), &up, 1.0);
        assert_eq!(half.len(), 4);
        assert!((polygon_area(&half) - 2.0).abs() < 1e-12);
        assert!(half.iter().all(|p| p.y <= 1.0 + 1e-12));
    }

    #[test]
    fn clip_above_everything_is_empty() {
        let up = Vec2::new(0.0, 1.0);
        let none = clip_below_plane(&square(), &up, -0.5);
        assert!(none.is_empty());
        assert_eq!(submerged_area(&square(), &up, -0.5), 0.0);
    }

    #[test]
    fn clip_below_everything_is_identity() {
        let up = Vec2::new(0.0, 1.0);
        let all = clip_below_plane(&square(), &up, 10.0);
        assert_eq!(all, square());
    }

    #[test]
    fn clip_touching_bottom_edge_is_degenerate() {
        let up = Vec2::new(0.0, 1.0);
        // plane exactly on the floor keeps the two floor corners only
        assert_eq!(submerged_area(&square(), &up, 0.0), 0.0);
    }

    #[test]
    fn tilted_gravity_cuts_corner() {
        // up along the diagonal: the first sliver is a right triangle at (0,0)
        let up = Vec2::new(1.0, 1.0).normalize();
        let (lo, _) = project_bounds(&square(), &up);
        let offset = lo + 1.0_f64 / 2.0_f64.sqrt();
        // legs of length 1 => area 0.5
        assert!((submerged_area(&square(), &up, offset) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clip_empty_polygon() {
        assert!(clip_below_plane(&[], &Vec2::new(0.0, 1.0), 0.0).is_empty());
    }
}
