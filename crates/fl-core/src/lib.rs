//! fl-core: stable foundation for the flooding workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact handles for compartments and connections)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FlError, FlResult};
pub use ids::*;
pub use numeric::*;
