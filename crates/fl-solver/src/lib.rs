//! Per-tick solvers for a flooding vessel.
//!
//! - `flow`: relaxation of water levels across open connections
//! - `air_escape`: reachability of the outside atmosphere and air-integrity decay
//!
//! Both are stateless: every call reads the vessel, mutates compartments and
//! returns a report. Nothing is cached between ticks.

pub mod air_escape;
pub mod config;
pub mod error;
pub mod flow;

pub use air_escape::{analyze_air_escape, vent_and_decay};
pub use config::FlowConfig;
pub use error::{SolverError, SolverResult};
pub use flow::{FlowReport, solve_group, solve_network};
