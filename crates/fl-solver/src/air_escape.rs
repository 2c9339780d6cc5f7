//! Which compartments can vent trapped air to the atmosphere this tick.

use std::collections::VecDeque;

use fl_core::{CompartmentId, Real};
use fl_geom::project_bounds;
use fl_vessel::Vessel;
use tracing::debug;

/// Breadth-first reachability from unsubmerged outside vents.
///
/// Seeds are compartments flagged `vents_to_outside` whose water plane sits
/// below their ceiling. Air then climbs through open connections: only into
/// a neighbor with a strictly higher ceiling, and only when the opening's
/// top edge clears both water surfaces. Every compartment's
/// `can_release_air` is rewritten; the reachable handles are returned.
///
/// Must run before `update_air_integrity` in the same tick; see
/// [`vent_and_decay`].
pub fn analyze_air_escape(vessel: &mut Vessel) -> Vec<CompartmentId> {
    let count = vessel.compartments().len();
    let mut reachable = vec![false; count];
    let mut queue = VecDeque::new();

    for (id, compartment) in vessel.compartment_ids().zip(vessel.compartments()) {
        let surface = compartment.solve_surface_offset_from_area(compartment.water_area());
        if compartment.vents_to_outside() && surface < compartment.ceiling_offset() {
            reachable[id.slot()] = true;
            queue.push_back(id);
        }
    }
    debug!(vessel = %vessel.name(), seeds = queue.len(), "air escape seeded");

    let up = vessel.pose().up();
    while let Some(current) = queue.pop_front() {
        let Some(here) = vessel.compartment(current) else {
            continue;
        };
        let (here_ceiling, here_surface) = (here.ceiling_offset(), here.water_surface_offset());

        for (cid, next) in vessel.open_neighbors(current) {
            if reachable[next.slot()] {
                continue;
            }
            let (Some(there), Some(opening)) = (vessel.compartment(next), vessel.opening_world(cid))
            else {
                continue;
            };
            if there.ceiling_offset() <= here_ceiling {
                continue;
            }
            let opening_top: Real = project_bounds(&opening, &up).1;
            if opening_top > here_surface && opening_top > there.water_surface_offset() {
                reachable[next.slot()] = true;
                queue.push_back(next);
            }
        }
    }

    let ids: Vec<CompartmentId> = vessel.compartment_ids().collect();
    for &id in &ids {
        if let Some(c) = vessel.compartment_mut(id) {
            c.set_can_release_air(reachable[id.slot()]);
        }
    }
    ids.into_iter().filter(|id| reachable[id.slot()]).collect()
}

/// Run the air-escape analysis, then update every compartment's air integrity.
///
/// Returns the compartments that vented this tick.
pub fn vent_and_decay(vessel: &mut Vessel, dt: Real) -> Vec<CompartmentId> {
    let venting = analyze_air_escape(vessel);
    for id in vessel.compartment_ids() {
        if let Some(c) = vessel.compartment_mut(id) {
            let can_release = c.can_release_air();
            c.update_air_integrity(can_release, dt);
        }
    }
    venting
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_vessel::{AirParams, Compartment, OpeningRect, VesselBuilder};

    /// Stepped chain: each compartment sits one unit higher than the last.
    ///
    /// a: y 0..2, b: y 1..3, c: y 2..4; openings on the shared walls.
    fn staircase() -> (Vessel, [CompartmentId; 3]) {
        let air = AirParams {
            min_air_fraction: 0.2,
            leak_rate: 0.5,
        };
        let mut builder = VesselBuilder::new("stairs");
        let a = builder.add_compartment(
            Compartment::rectangle("a", 0.0, 2.0, 0.0, 2.0)
                .unwrap()
                .with_vent(true)
                .with_air(air)
                .unwrap(),
        );
        let b = builder.add_compartment(
            Compartment::rectangle("b", 2.0, 4.0, 1.0, 3.0)
                .unwrap()
                .with_air(air)
                .unwrap(),
        );
        let c = builder.add_compartment(
            Compartment::rectangle("c", 4.0, 6.0, 2.0, 4.0)
                .unwrap()
                .with_air(air)
                .unwrap(),
        );
        builder.add_connection(a, b, OpeningRect::new(1.9, 2.1, 1.0, 2.0), 1.0);
        builder.add_connection(b, c, OpeningRect::new(3.9, 4.1, 2.0, 3.0), 1.0);
        (builder.build().unwrap(), [a, b, c])
    }

    fn flags(vessel: &Vessel) -> Vec<bool> {
        vessel.compartments().iter().map(|c| c.can_release_air()).collect()
    }

    #[test]
    fn chain_vents_through_open_hatches() {
        let (mut vessel, [a, b, c]) = staircase();
        let venting = analyze_air_escape(&mut vessel);
        assert_eq!(venting, vec![a, b, c]);
        assert_eq!(flags(&vessel), vec![true, true, true]);
    }

    #[test]
    fn closed_first_hatch_isolates_rest() {
        let (mut vessel, [a, ..]) = staircase();
        let first = vessel.connections().next().map(|(id, _)| id).unwrap();
        vessel.set_connection_open(first, false).unwrap();
        assert_eq!(analyze_air_escape(&mut vessel), vec![a]);
        assert_eq!(flags(&vessel), vec![true, false, false]);
    }

    #[test]
    fn submerged_opening_blocks_propagation() {
        let (mut vessel, [a, ..]) = staircase();
        // b's surface above the a-b opening top (y = 2)
        let b = vessel.find_compartment("b").unwrap();
        vessel.compartment_mut(b).unwrap().set_water_area(3.0);
        assert_eq!(analyze_air_escape(&mut vessel), vec![a]);
    }

    #[test]
    fn air_never_flows_downhill() {
        let (mut vessel, [a, _, c]) = staircase();
        vessel.compartment_mut(a).unwrap().set_vents_to_outside(false);
        vessel.compartment_mut(c).unwrap().set_vents_to_outside(true);
        assert_eq!(analyze_air_escape(&mut vessel), vec![c]);
    }

    #[test]
    fn equal_ceilings_do_not_share_air() {
        let mut builder = VesselBuilder::new("flat");
        let a = builder.add_compartment(
            Compartment::rectangle("a", 0.0, 2.0, 0.0, 2.0)
                .unwrap()
                .with_vent(true),
        );
        let b = builder.add_compartment(Compartment::rectangle("b", 2.0, 4.0, 0.0, 2.0).unwrap());
        builder.add_connection(a, b, OpeningRect::new(1.9, 2.1, 1.0, 2.0), 1.0);
        let mut vessel = builder.build().unwrap();

        assert_eq!(analyze_air_escape(&mut vessel), vec![a]);
        assert!(vessel.compartment(a).unwrap().can_release_air());
        assert!(!vessel.compartment(b).unwrap().can_release_air());
    }

    #[test]
    fn no_vent_no_release() {
        let (mut vessel, [a, ..]) = staircase();
        vessel.compartment_mut(a).unwrap().set_vents_to_outside(false);
        assert!(analyze_air_escape(&mut vessel).is_empty());
        assert_eq!(flags(&vessel), vec![false, false, false]);
    }

    #[test]
    fn stale_flags_are_cleared() {
        let (mut vessel, [_, b, _]) = staircase();
        vessel.compartment_mut(b).unwrap().set_can_release_air(true);
        let first = vessel.connections().next().map(|(id, _)| id).unwrap();
        vessel.set_connection_open(first, false).unwrap();
        analyze_air_escape(&mut vessel);
        assert!(!vessel.compartment(b).unwrap().can_release_air());
    }

    #[test]
    fn decay_only_where_air_is_trapped() {
        let (mut vessel, [a, b, _]) = staircase();
        let first = vessel.connections().next().map(|(id, _)| id).unwrap();
        vessel.set_connection_open(first, false).unwrap();

        vent_and_decay(&mut vessel, 1.0);
        assert_eq!(vessel.compartment(a).unwrap().air_integrity(), 1.0);
        assert!((vessel.compartment(b).unwrap().air_integrity() - 0.5).abs() < 1e-12);
    }
}
