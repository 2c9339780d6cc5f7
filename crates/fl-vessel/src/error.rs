//! Vessel assembly errors.

use fl_core::{CompartmentId, ConnectionId, FlError};
use thiserror::Error;

/// Authoring errors caught while assembling or editing a vessel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VesselError {
    /// A connection names the same compartment on both sides.
    #[error("Connection links compartment {compartment} to itself")]
    SelfConnection { compartment: CompartmentId },

    /// Handle does not resolve to a compartment.
    #[error("Unknown compartment {id}")]
    UnknownCompartment { id: CompartmentId },

    /// Handle does not resolve to a live connection.
    #[error("Unknown connection {id}")]
    UnknownConnection { id: ConnectionId },

    /// Corner set is not a clockwise convex quadrilateral.
    #[error("Compartment '{name}' has invalid geometry: {reason}")]
    InvalidGeometry { name: String, reason: &'static str },

    /// Opening rectangle is empty or inverted.
    #[error("Invalid opening: {reason}")]
    InvalidOpening { reason: &'static str },

    /// A tunable is outside its valid range.
    #[error("Invalid parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error(transparent)]
    Core(#[from] FlError),
}

pub type VesselResult<T> = Result<T, VesselError>;
