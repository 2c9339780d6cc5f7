//! Arena of compartments and connections for one vessel.

use std::collections::VecDeque;

use fl_core::{CompartmentId, ConnectionId, Id, Real};
use fl_geom::{Pose, Vec2};
use nalgebra::Isometry2;
use tracing::debug;

use crate::compartment::Compartment;
use crate::connection::{Connection, OpeningRect};
use crate::error::{VesselError, VesselResult};

/// The compartment graph of a single vessel.
///
/// Compartments live in a dense vector indexed by `CompartmentId`.
/// Connections live in slots indexed by `ConnectionId`; removing one leaves
/// an empty slot so remaining handles stay valid. Each compartment lists the
/// handles of the connections touching it and the vessel keeps both sides of
/// that relation in sync.
#[derive(Debug, Clone, Default)]
pub struct Vessel {
    name: String,
    pose: Pose,
    compartments: Vec<Compartment>,
    connections: Vec<Option<Connection>>,
}

impl Vessel {
    /// Create an empty vessel at the default pose.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Finalize the placement for this tick; every compartment re-derives its world geometry.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        for compartment in &mut self.compartments {
            compartment.set_pose(&pose);
        }
    }

    /// Add a compartment and return its handle.
    pub fn add_compartment(&mut self, mut compartment: Compartment) -> CompartmentId {
        let id = Id::from_index(self.compartments.len() as u32);
        compartment.connections.clear();
        compartment.set_pose(&self.pose);
        self.compartments.push(compartment);
        id
    }

    /// Link two compartments through an opening expressed in `frame`.
    pub fn connect(
        &mut self,
        a: CompartmentId,
        b: CompartmentId,
        frame: Isometry2<Real>,
        rect: OpeningRect,
        flow_coefficient: Real,
    ) -> VesselResult<ConnectionId> {
        self.check_compartment(a)?;
        self.check_compartment(b)?;
        let connection = Connection::new(a, b, frame, rect, flow_coefficient)?;

        let id = Id::from_index(self.connections.len() as u32);
        self.connections.push(Some(connection));
        self.compartments[a.slot()].connections.push(id);
        self.compartments[b.slot()].connections.push(id);
        debug!(vessel = %self.name, connection = %id, %a, %b, "connected compartments");
        Ok(id)
    }

    /// Remove a connection from the arena and from both endpoints' lists.
    pub fn remove_connection(&mut self, id: ConnectionId) -> VesselResult<Connection> {
        let connection = self
            .connections
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(VesselError::UnknownConnection { id })?;

        let (a, b) = connection.endpoints();
        for end in [a, b] {
            self.compartments[end.slot()].connections.retain(|c| *c != id);
        }
        Ok(connection)
    }

    /// Open or close a hatch; takes effect on the next solve.
    pub fn set_connection_open(&mut self, id: ConnectionId, open: bool) -> VesselResult<()> {
        let connection = self
            .connection_mut(id)
            .ok_or(VesselError::UnknownConnection { id })?;
        connection.is_open = open;
        Ok(())
    }

    fn check_compartment(&self, id: CompartmentId) -> VesselResult<()> {
        if id.slot() < self.compartments.len() {
            Ok(())
        } else {
            Err(VesselError::UnknownCompartment { id })
        }
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    pub fn compartment_ids(&self) -> impl Iterator<Item = CompartmentId> + use<> {
        (0..self.compartments.len() as u32).map(Id::from_index)
    }

    pub fn compartment(&self, id: CompartmentId) -> Option<&Compartment> {
        self.compartments.get(id.slot())
    }

    pub fn compartment_mut(&mut self, id: CompartmentId) -> Option<&mut Compartment> {
        self.compartments.get_mut(id.slot())
    }

    /// Look a compartment up by its (debug) name.
    pub fn find_compartment(&self, name: &str) -> Option<CompartmentId> {
        self.compartments
            .iter()
            .position(|c| c.name() == name)
            .map(|i| Id::from_index(i as u32))
    }

    /// Two distinct compartments borrowed mutably at once.
    pub fn compartment_pair_mut(
        &mut self,
        a: CompartmentId,
        b: CompartmentId,
    ) -> Option<(&mut Compartment, &mut Compartment)> {
        let (ia, ib) = (a.slot(), b.slot());
        if ia == ib || ia >= self.compartments.len() || ib >= self.compartments.len() {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.compartments.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.compartments.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.slot()).and_then(Option::as_ref)
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id.slot()).and_then(Option::as_mut)
    }

    /// Live connections with their handles.
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (Id::from_index(i as u32), c)))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.iter().flatten().count()
    }

    /// Open connections leaving `id`, paired with the compartment on the far side.
    pub fn open_neighbors(
        &self,
        id: CompartmentId,
    ) -> impl Iterator<Item = (ConnectionId, CompartmentId)> + '_ {
        self.compartment(id)
            .map(|c| c.connections())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&cid| {
                let conn = self.connection(cid)?;
                if !conn.is_open {
                    return None;
                }
                conn.other(id).map(|other| (cid, other))
            })
    }

    /// World-space opening corners under the current pose.
    pub fn opening_world(&self, id: ConnectionId) -> Option<[Vec2; 4]> {
        self.connection(id).map(|c| c.world_corners(&self.pose))
    }

    /// Partition compartments into groups joined by open connections.
    ///
    /// Discovered by breadth-first traversal on every call, so hatch
    /// toggles are honoured immediately. Groups and their members are
    /// ordered by first compartment handle.
    pub fn flood_groups(&self) -> Vec<Vec<CompartmentId>> {
        let mut seen = vec![false; self.compartments.len()];
        let mut groups = Vec::new();

        for start in self.compartment_ids() {
            if seen[start.slot()] {
                continue;
            }
            seen[start.slot()] = true;
            let mut group = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for (_, next) in self.open_neighbors(current) {
                    if !seen[next.slot()] {
                        seen[next.slot()] = true;
                        group.push(next);
                        queue.push_back(next);
                    }
                }
            }
            group.sort();
            groups.push(group);
        }
        groups
    }

    /// Sum of water area over every compartment.
    pub fn total_water(&self) -> Real {
        self.compartments.iter().map(Compartment::water_area).sum()
    }
}
