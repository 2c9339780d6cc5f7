//! Tick-driven flooding simulation.
//!
//! Provides:
//! - External ingress driver (inflow, rain, sea breach)
//! - Environment and placement collaborator traits
//! - One-tick orchestration in the required order
//! - Fixed-step runner with decimated recording

pub mod environment;
pub mod error;
pub mod ingress;
pub mod motion;
pub mod sim;
pub mod tick;

pub use environment::{CalmSea, Environment};
pub use error::{SimError, SimResult};
pub use ingress::{IngressReport, apply_ingress};
pub use motion::{Motion, PlacementProvider};
pub use sim::{SimOptions, SimRecord, VesselSnapshot, run_sim};
pub use tick::{TickReport, step};
