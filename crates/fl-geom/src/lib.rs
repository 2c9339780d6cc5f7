//! fl-geom: 2D convex geometry kernel.
//!
//! Provides:
//! - Half-plane clipping and submerged-area measurement
//! - Shoelace area, convex containment and projection bounds
//! - Segment intersection and convex polygon overlap
//! - `Pose`: the vessel placement plus gravity direction
//!
//! All routines are total: degenerate input (fewer than 3 points, parallel
//! segments) yields an empty or zero result, never an error.

pub mod clip;
pub mod intersect;
pub mod polygon;
pub mod pose;

pub use clip::{clip_below_plane, submerged_area};
pub use intersect::{edges, polygons_overlap, segments_intersect};
pub use polygon::{
    is_convex_clockwise, point_inside_convex, polygon_area, project_bounds, signed_area,
};
pub use pose::Pose;

/// 2D vector/point type used across the workspace.
pub type Vec2 = nalgebra::Vector2<fl_core::Real>;

/// z-component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: &Vec2, b: &Vec2) -> fl_core::Real {
    a.x * b.y - a.y * b.x
}
