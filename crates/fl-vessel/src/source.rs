//! Environmental ingress descriptors attached to a compartment.

use fl_core::Real;

/// How an external source turns its rate into a per-tick volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind {
    /// Fixed inflow: `rate * dt`.
    Inflow,
    /// Rain: `rate * dt * rain_intensity`.
    Rain,
    /// Sea breach through one hull edge (corner `edge` to corner `edge + 1`):
    /// `rate * dt * max(0, ambient_height - edge_height)`.
    Sea { edge: usize },
}

/// One ingress point on a compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalSource {
    pub kind: SourceKind,
    pub rate: Real,
    pub active: bool,
}

impl ExternalSource {
    pub fn inflow(rate: Real) -> Self {
        Self {
            kind: SourceKind::Inflow,
            rate,
            active: true,
        }
    }

    pub fn rain(rate: Real) -> Self {
        Self {
            kind: SourceKind::Rain,
            rate,
            active: true,
        }
    }

    pub fn sea(edge: usize, rate: Real) -> Self {
        Self {
            kind: SourceKind::Sea { edge },
            rate,
            active: true,
        }
    }
}
