//! One simulation tick, in the order the solvers depend on.

use fl_core::{CompartmentId, Real, ensure_non_negative};
use fl_solver::{FlowConfig, FlowReport, solve_network, vent_and_decay};
use fl_vessel::Vessel;
use tracing::debug;

use crate::environment::Environment;
use crate::error::SimResult;
use crate::ingress::{IngressReport, apply_ingress};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub ingress: IngressReport,
    pub flow: FlowReport,
    /// Compartments that could vent air this tick.
    pub venting: Vec<CompartmentId>,
}

/// Advance `vessel` by `dt`.
///
/// The pose for this tick must already be applied (`Vessel::set_pose`).
/// Order: ingress, network flow, air-escape analysis, air-integrity update.
pub fn step(
    vessel: &mut Vessel,
    env: &dyn Environment,
    dt: Real,
    flow: &FlowConfig,
) -> SimResult<TickReport> {
    let dt = ensure_non_negative(dt, "dt")?;

    let ingress = apply_ingress(vessel, env, dt);
    let flow = solve_network(vessel, dt, flow)?;
    let venting = vent_and_decay(vessel, dt);

    debug!(
        vessel = %vessel.name(),
        ingress = ingress.accepted,
        moved = flow.moved,
        venting = venting.len(),
        "tick"
    );
    Ok(TickReport {
        ingress,
        flow,
        venting,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::environment::CalmSea;
    use fl_vessel::{Compartment, ExternalSource, OpeningRect, VesselBuilder};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Water only enters through ingress; flow never creates or destroys it.
        #[test]
        fn total_water_tracks_accepted_ingress(
            rate in 0.0f64..5.0,
            fill in 0.0f64..4.0,
            dt in 0.01f64..0.2,
            ticks in 1usize..30,
        ) {
            let mut builder = VesselBuilder::new("p");
            let a = builder.add_compartment(
                Compartment::rectangle("a", 0.0, 2.0, 0.0, 2.0)
                    .unwrap()
                    .with_water(fill)
                    .with_source(ExternalSource::inflow(rate))
                    .unwrap(),
            );
            let b = builder.add_compartment(
                Compartment::rectangle("b", 2.0, 4.0, 0.5, 2.5).unwrap(),
            );
            builder.add_connection(a, b, OpeningRect::new(1.5, 2.5, 0.5, 1.5), 0.7);
            let mut vessel = builder.build().unwrap();

            let mut expected = vessel.total_water();
            for _ in 0..ticks {
                let report = step(&mut vessel, &CalmSea::default(), dt, &FlowConfig::default()).unwrap();
                expected += report.ingress.accepted;
                prop_assert!((vessel.total_water() - expected).abs() < 1e-9);
                prop_assert!(report.ingress.accepted <= report.ingress.offered + 1e-12);
            }
        }
    }
}
