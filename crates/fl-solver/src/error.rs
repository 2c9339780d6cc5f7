//! Error types for solver operations.

use fl_core::FlError;
use thiserror::Error;

/// Errors rejected before any compartment is touched.
///
/// Degenerate geometry never errors; it simply produces no flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid time step: {0}")]
    TimeStep(#[source] FlError),

    #[error("Invalid configuration: {what}")]
    Config { what: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;
