//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while stepping a vessel.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Solver error: {0}")]
    Solver(#[from] fl_solver::SolverError),

    #[error("Numeric error: {0}")]
    Core(#[from] fl_core::FlError),
}

pub type SimResult<T> = Result<T, SimError>;
