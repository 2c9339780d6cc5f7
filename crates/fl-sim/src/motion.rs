//! Placement collaborators: where the vessel is at time `t`.

use fl_core::Real;
use fl_geom::Pose;
use std::f64::consts::TAU;

/// Supplies the vessel pose for each tick.
pub trait PlacementProvider {
    fn pose_at(&mut self, t: Real) -> Pose;
}

/// Simple scripted motions, enough to drive a vessel without a rigid-body integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Stay at one pose.
    Fixed(Pose),
    /// Sinusoidal roll about the base pose's origin.
    Roll {
        base: Pose,
        /// Peak roll angle (radians).
        amplitude: Real,
        /// Seconds per full cycle.
        period: Real,
    },
}

impl Default for Motion {
    fn default() -> Self {
        Motion::Fixed(Pose::default())
    }
}

impl PlacementProvider for Motion {
    fn pose_at(&mut self, t: Real) -> Pose {
        match *self {
            Motion::Fixed(pose) => pose,
            Motion::Roll {
                base,
                amplitude,
                period,
            } => {
                if period <= 0.0 {
                    return base;
                }
                let angle = amplitude * (TAU * t / period).sin();
                let mut pose = base;
                pose.placement.rotation *= nalgebra::UnitComplex::new(angle);
                pose
            }
        }
    }
}
