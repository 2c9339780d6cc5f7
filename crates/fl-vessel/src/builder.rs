//! Incremental vessel builder.

use fl_core::{CompartmentId, ConnectionId, Id, Real};
use fl_geom::Pose;
use nalgebra::Isometry2;

use crate::compartment::Compartment;
use crate::connection::OpeningRect;
use crate::error::VesselResult;
use crate::vessel::Vessel;

#[derive(Debug, Clone)]
struct PendingConnection {
    a: CompartmentId,
    b: CompartmentId,
    frame: Isometry2<Real>,
    rect: OpeningRect,
    flow_coefficient: Real,
    open: bool,
}

/// Builder for assembling a vessel.
///
/// Handles are handed out immediately; references are checked and the
/// connection lists are wired when `build()` freezes the layout into a `Vessel`.
#[derive(Debug, Default)]
pub struct VesselBuilder {
    name: String,
    pose: Pose,
    compartments: Vec<Compartment>,
    connections: Vec<PendingConnection>,
}

impl VesselBuilder {
    /// Create a new empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Initial placement and gravity.
    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Add a compartment and return its handle.
    pub fn add_compartment(&mut self, compartment: Compartment) -> CompartmentId {
        let id = Id::from_index(self.compartments.len() as u32);
        self.compartments.push(compartment);
        id
    }

    /// Add an open connection whose opening is given in vessel-local coordinates.
    pub fn add_connection(
        &mut self,
        a: CompartmentId,
        b: CompartmentId,
        rect: OpeningRect,
        flow_coefficient: Real,
    ) -> ConnectionId {
        self.add_connection_in_frame(a, b, Isometry2::identity(), rect, flow_coefficient, true)
    }

    /// Add a connection whose opening is given in its own reference frame.
    pub fn add_connection_in_frame(
        &mut self,
        a: CompartmentId,
        b: CompartmentId,
        frame: Isometry2<Real>,
        rect: OpeningRect,
        flow_coefficient: Real,
        open: bool,
    ) -> ConnectionId {
        let id = Id::from_index(self.connections.len() as u32);
        self.connections.push(PendingConnection {
            a,
            b,
            frame,
            rect,
            flow_coefficient,
            open,
        });
        id
    }

    /// Validate references and produce the vessel.
    pub fn build(self) -> VesselResult<Vessel> {
        let mut vessel = Vessel::new(self.name);
        vessel.set_pose(self.pose);
        for compartment in self.compartments {
            vessel.add_compartment(compartment);
        }
        for pending in self.connections {
            let id = vessel.connect(
                pending.a,
                pending.b,
                pending.frame,
                pending.rect,
                pending.flow_coefficient,
            )?;
            if !pending.open {
                vessel.set_connection_open(id, false)?;
            }
        }
        Ok(vessel)
    }
}
