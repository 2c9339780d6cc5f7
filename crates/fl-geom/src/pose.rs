//! Placement of a vessel in the world plus the gravity direction.

use crate::Vec2;
use fl_core::{FlError, FlResult, Real, ensure_finite};
use nalgebra::{Isometry2, Point2, Unit};

/// Rigid placement and gravity used to derive all world-space geometry.
///
/// The plane normal for every submerged-area query is `up()`, the
/// negated gravity direction; offsets grow as the water rises.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Local-to-world transform of the owner (rotation + translation).
    pub placement: Isometry2<Real>,
    gravity: Unit<Vec2>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            placement: Isometry2::identity(),
            gravity: Unit::new_unchecked(Vec2::new(0.0, -1.0)),
        }
    }
}

impl Pose {
    /// Build a pose from a placement and a (not necessarily unit) down vector.
    pub fn new(placement: Isometry2<Real>, gravity_down: Vec2) -> FlResult<Self> {
        ensure_finite(gravity_down.x, "gravity.x")?;
        ensure_finite(gravity_down.y, "gravity.y")?;
        let gravity = Unit::try_new(gravity_down, 1e-12).ok_or(FlError::InvalidArg {
            what: "gravity must be non-zero",
        })?;
        Ok(Self { placement, gravity })
    }

    /// Placement from translation `(x, y)` and rotation `angle` (radians), gravity straight down.
    pub fn from_parts(x: Real, y: Real, angle: Real) -> Self {
        Self {
            placement: Isometry2::new(Vec2::new(x, y), angle),
            ..Self::default()
        }
    }

    /// Unit "down" direction.
    pub fn gravity(&self) -> Vec2 {
        self.gravity.into_inner()
    }

    /// Unit "up" direction: the plane normal for water surfaces.
    pub fn up(&self) -> Vec2 {
        -self.gravity.into_inner()
    }

    /// Map a point in the owner's local frame to world space.
    pub fn to_world(&self, local: &Vec2) -> Vec2 {
        self.placement.transform_point(&Point2::from(*local)).coords
    }

    /// Map a point given in a sub-frame (expressed relative to the owner) to world space.
    pub fn to_world_in(&self, frame: &Isometry2<Real>, local: &Vec2) -> Vec2 {
        (self.placement * *frame)
            .transform_point(&Point2::from(*local))
            .coords
    }

    /// Height of a world point along `up()`.
    pub fn height(&self, world: &Vec2) -> Real {
        world.dot(&self.up())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn default_is_identity_with_down_gravity() {
        let pose = Pose::default();
        assert_eq!(pose.up(), Vec2::new(0.0, 1.0));
        assert_eq!(pose.to_world(&Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn rotation_then_translation() {
        let pose = Pose::from_parts(10.0, 0.0, FRAC_PI_2);
        let w = pose.to_world(&Vec2::new(1.0, 0.0));
        assert!((w - Vec2::new(10.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn sub_frame_composes_after_placement() {
        let pose = Pose::from_parts(0.0, 5.0, 0.0);
        let frame = Isometry2::new(Vec2::new(2.0, 0.0), 0.0);
        let w = pose.to_world_in(&frame, &Vec2::new(1.0, 1.0));
        assert!((w - Vec2::new(3.0, 6.0)).norm() < 1e-12);
    }

    #[test]
    fn gravity_is_normalized() {
        let pose = Pose::new(Isometry2::identity(), Vec2::new(0.0, -9.81)).unwrap();
        assert!((pose.up() - Vec2::new(0.0, 1.0)).norm() < 1e-12);
        assert!((pose.height(&Vec2::new(7.0, 2.5)) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn zero_or_nan_gravity_rejected() {
        assert!(Pose::new(Isometry2::identity(), Vec2::zeros()).is_err());
        assert!(Pose::new(Isometry2::identity(), Vec2::new(Real::NAN, -1.0)).is_err());
    }
}
