//! External ingress driver: environment water into individual compartments.
//!
//! A thin adapter. Each active source yields a per-tick volume that is
//! offered to `Compartment::accept_water`; anything refused is dropped.

use fl_core::{Real, clamp01};
use fl_vessel::{Compartment, ExternalSource, SourceKind, Vessel};
use tracing::trace;

use crate::environment::Environment;

/// Volumes offered and taken during one ingress step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IngressReport {
    pub offered: Real,
    pub accepted: Real,
}

/// Volume one source wants to deliver this tick.
///
/// Sea head is measured in world Y, the same axis the environment reports
/// ambient height on, whatever the gravity direction.
pub fn source_delta(
    compartment: &Compartment,
    source: &ExternalSource,
    env: &dyn Environment,
    dt: Real,
) -> Real {
    if !source.active {
        return 0.0;
    }
    let base = source.rate * dt;
    let delta = match source.kind {
        SourceKind::Inflow => base,
        SourceKind::Rain => base * clamp01(env.rain_intensity()),
        SourceKind::Sea { edge } => {
            let Some((p, q)) = compartment.world_edge(edge) else {
                return 0.0;
            };
            let mid_x = 0.5 * (p.x + q.x);
            let edge_height = p.y.min(q.y);
            let head = (env.ambient_water_height(mid_x) - edge_height).max(0.0);
            base * head
        }
    };
    if delta.is_finite() { delta.max(0.0) } else { 0.0 }
}

/// Offer every active source's delta to its compartment.
pub fn apply_ingress(vessel: &mut Vessel, env: &dyn Environment, dt: Real) -> IngressReport {
    let mut report = IngressReport::default();
    for id in vessel.compartment_ids() {
        let Some(compartment) = vessel.compartment_mut(id) else {
            continue;
        };
        let delta: Real = {
            let view: &Compartment = compartment;
            view.sources()
                .iter()
                .map(|s| source_delta(view, s, env, dt))
                .sum()
        };
        if delta <= 0.0 {
            continue;
        }
        let accepted = compartment.accept_water(delta);
        trace!(compartment = %id, offered = delta, accepted, "ingress");
        report.offered += delta;
        report.accepted += accepted;
    }
    report
}
