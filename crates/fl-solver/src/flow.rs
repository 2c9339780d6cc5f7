//! Network flow solver: best-effort relaxation of water levels.
//!
//! Each pass snapshots every surface offset, then visits every open
//! connection of the group once. Flow direction and magnitude are decided
//! from the snapshot even though compartments are mutated as edges are
//! processed; the clamp to the source's current water keeps mass exact.
//! A pass that moves nothing ends the loop early.

use std::collections::HashSet;

use fl_core::{CompartmentId, ConnectionId, Real, ensure_non_negative};
use fl_geom::{
    Vec2, clip_below_plane, edges, point_inside_convex, polygons_overlap, project_bounds,
    segments_intersect,
};
use fl_vessel::Vessel;
use tracing::{debug, trace};

use crate::config::FlowConfig;
use crate::error::{SolverError, SolverResult};

/// Outcome of one solve over one or more groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowReport {
    /// Passes actually run, summed over groups.
    pub passes: usize,
    /// Total volume moved across all connections.
    pub moved: Real,
    /// Number of connection visits that moved a positive amount.
    pub transfers: usize,
    /// True when every group reached a pass with no flow.
    pub converged: bool,
}

impl FlowReport {
    fn merge(&mut self, other: FlowReport) {
        self.passes += other.passes;
        self.moved += other.moved;
        self.transfers += other.transfers;
        self.converged &= other.converged;
    }
}

/// Solve every group of compartments joined by open connections.
pub fn solve_network(vessel: &mut Vessel, dt: Real, cfg: &FlowConfig) -> SolverResult<FlowReport> {
    let dt = ensure_non_negative(dt, "dt").map_err(SolverError::TimeStep)?;
    cfg.validate()?;

    let mut report = FlowReport {
        converged: true,
        ..FlowReport::default()
    };
    for group in vessel.flood_groups() {
        if group.len() < 2 {
            continue;
        }
        report.merge(solve_group(vessel, &group, dt, cfg));
    }
    debug!(
        vessel = %vessel.name(),
        passes = report.passes,
        moved = report.moved,
        converged = report.converged,
        "flow solve finished"
    );
    Ok(report)
}

/// Relax one group of compartments for up to `cfg.max_passes` passes.
///
/// The caller supplies the grouping; connections leading outside `group`
/// are still visited if they are open, so pass a closed set.
pub fn solve_group(
    vessel: &mut Vessel,
    group: &[CompartmentId],
    dt: Real,
    cfg: &FlowConfig,
) -> FlowReport {
    let mut report = FlowReport::default();

    for _ in 0..cfg.max_passes {
        report.passes += 1;
        let levels: Vec<Real> = vessel
            .compartments()
            .iter()
            .map(|c| c.water_surface_offset())
            .collect();

        let mut visited: HashSet<ConnectionId> = HashSet::new();
        let mut pass_moved = 0.0;
        for &id in group {
            let edges: Vec<ConnectionId> = vessel.open_neighbors(id).map(|(cid, _)| cid).collect();
            for cid in edges {
                if !visited.insert(cid) {
                    continue;
                }
                let moved = flow_through(vessel, cid, &levels, dt).unwrap_or(0.0);
                if moved > 0.0 {
                    pass_moved += moved;
                    report.transfers += 1;
                }
            }
        }

        report.moved += pass_moved;
        if pass_moved <= 0.0 {
            report.converged = true;
            break;
        }
    }
    if !report.converged {
        debug!(
            members = group.len(),
            passes = report.passes,
            "pass ceiling reached before the group settled"
        );
    }
    report
}

/// Apply one connection's flow. `None` means the edge was rejected.
fn flow_through(
    vessel: &mut Vessel,
    cid: ConnectionId,
    levels: &[Real],
    dt: Real,
) -> Option<Real> {
    let conn = vessel.connection(cid)?;
    let (a, b) = conn.endpoints();
    let (level_a, level_b) = (*levels.get(a.slot())?, *levels.get(b.slot())?);

    let (source, target, source_level, target_level) = if level_a > level_b {
        (a, b, level_a, level_b)
    } else if level_b > level_a {
        (b, a, level_b, level_a)
    } else {
        return None;
    };

    let up = vessel.pose().up();
    let opening = conn.world_corners(vessel.pose());
    let src = vessel.compartment(source)?;
    let hull = src.world_corners();

    // The current surface must actually touch the opening.
    let wetted = clip_below_plane(hull, &up, source_level);
    if !polygons_overlap(&opening, &wetted) {
        return None;
    }

    let sill = find_sill(&opening, hull, &up)?;
    if source_level <= sill {
        return None;
    }

    let (opening_min, opening_max) = project_bounds(&opening, &up);
    let submerged = (source_level - opening_min).clamp(0.0, opening_max - opening_min);
    let flow = (source_level - target_level)
        * submerged
        * conn.width()
        * conn.flow_coefficient
        * dt;
    let flow = flow.min(src.water_area());
    if flow.is_nan() || flow <= 0.0 {
        return None;
    }

    let (src, dst) = vessel.compartment_pair_mut(source, target)?;
    // Whatever the target refuses never leaves the source.
    let accepted = dst.accept_water(flow);
    let moved = src.remove_water(accepted);
    trace!(connection = %cid, %source, %target, offered = flow, moved, "flow");
    Some(moved)
}

/// Lowest point (along `up`) where the opening meets the hull.
///
/// Candidates are opening corners inside the hull and crossings between
/// opening and hull edges. Without candidates, falls back to overlap of the
/// two projections on `up` and returns the bottom of that overlap.
pub(crate) fn find_sill(opening: &[Vec2], hull: &[Vec2], up: &Vec2) -> Option<Real> {
    let corners = opening
        .iter()
        .filter(|p| point_inside_convex(p, hull))
        .copied();
    let crossings = edges(opening).flat_map(|(a1, a2)| {
        edges(hull).filter_map(move |(b1, b2)| segments_intersect(a1, a2, b1, b2))
    });

    corners
        .chain(crossings)
        .map(|p| p.dot(up))
        .reduce(Real::min)
        .or_else(|| {
            let (opening_min, opening_max) = project_bounds(opening, up);
            let (hull_min, hull_max) = project_bounds(hull, up);
            (opening_min <= hull_max && hull_min <= opening_max)
                .then_some(opening_min.max(hull_min))
        })
}
