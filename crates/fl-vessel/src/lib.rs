//! fl-vessel: compartment/connection arena for a floodable vessel.
//!
//! Provides:
//! - `Compartment`: convex quadrilateral with water and trapped-air state
//! - `Connection`: rectangular opening between two compartments
//! - `Vessel`: arena owning both, keyed by compact handles
//! - `VesselBuilder`: incremental assembly with validation
//!
//! # Example
//!
//! ```
//! use fl_vessel::{Compartment, OpeningRect, VesselBuilder};
//!
//! let mut builder = VesselBuilder::new("barge");
//! let a = builder.add_compartment(Compartment::rectangle("fore", 0.0, 2.0, 0.0, 2.0).unwrap());
//! let b = builder.add_compartment(Compartment::rectangle("aft", 2.0, 4.0, 0.0, 2.0).unwrap());
//! builder.add_connection(a, b, OpeningRect::new(1.0, 3.0, 0.0, 2.0), 1.0);
//! let vessel = builder.build().unwrap();
//!
//! assert_eq!(vessel.compartments().len(), 2);
//! assert_eq!(vessel.connection_count(), 1);
//! ```

pub mod builder;
pub mod compartment;
pub mod connection;
pub mod error;
pub mod source;
pub mod vessel;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::VesselBuilder;
pub use compartment::{AirParams, Compartment, SURFACE_BISECTION_ITERATIONS};
pub use connection::{Connection, OpeningRect};
pub use error::{VesselError, VesselResult};
pub use source::{ExternalSource, SourceKind};
pub use vessel::Vessel;
