//! Rectangular opening between two compartments.

use fl_core::{CompartmentId, Real};
use fl_geom::{Pose, Vec2};
use nalgebra::Isometry2;

use crate::error::{VesselError, VesselResult};
use crate::validate::{validate_non_negative, validate_opening};

/// Opening extent in its reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningRect {
    pub left: Real,
    pub right: Real,
    pub bottom: Real,
    pub top: Real,
}

impl OpeningRect {
    pub fn new(left: Real, right: Real, bottom: Real, top: Real) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn width(&self) -> Real {
        self.right - self.left
    }

    pub fn height(&self) -> Real {
        self.top - self.bottom
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right, self.top),
            Vec2::new(self.right, self.bottom),
            Vec2::new(self.left, self.bottom),
        ]
    }
}

/// A hatch or doorway linking exactly two compartments.
///
/// Geometry is never stored in world space: every query re-derives it
/// from the vessel pose composed with the connection's own frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    a: CompartmentId,
    b: CompartmentId,
    /// Reference frame relative to the vessel.
    frame: Isometry2<Real>,
    rect: OpeningRect,
    /// Closed connections are skipped by every solver.
    pub is_open: bool,
    pub flow_coefficient: Real,
}

impl Connection {
    /// Create an open connection with its opening given in `frame`.
    pub fn new(
        a: CompartmentId,
        b: CompartmentId,
        frame: Isometry2<Real>,
        rect: OpeningRect,
        flow_coefficient: Real,
    ) -> VesselResult<Self> {
        if a == b {
            return Err(VesselError::SelfConnection { compartment: a });
        }
        validate_opening(&rect)?;
        validate_non_negative(flow_coefficient, "flow_coefficient")?;
        Ok(Self {
            a,
            b,
            frame,
            rect,
            is_open: true,
            flow_coefficient,
        })
    }

    /// Both ends, in construction order.
    pub fn endpoints(&self) -> (CompartmentId, CompartmentId) {
        (self.a, self.b)
    }

    pub fn involves(&self, id: CompartmentId) -> bool {
        self.a == id || self.b == id
    }

    /// The far end as seen from `id`; `None` if `id` is not an endpoint.
    pub fn other(&self, id: CompartmentId) -> Option<CompartmentId> {
        if id == self.a {
            Some(self.b)
        } else if id == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn frame(&self) -> &Isometry2<Real> {
        &self.frame
    }

    pub fn rect(&self) -> &OpeningRect {
        &self.rect
    }

    pub fn width(&self) -> Real {
        self.rect.width()
    }

    pub fn height(&self) -> Real {
        self.rect.height()
    }

    /// Opening corners in world space, clockwise from top-left.
    pub fn world_corners(&self, pose: &Pose) -> [Vec2; 4] {
        self.rect.corners().map(|c| pose.to_world_in(&self.frame, &c))
    }
}
