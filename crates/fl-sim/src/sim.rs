//! Fixed-step simulation runner and result recording.

use fl_core::Real;
use fl_solver::FlowConfig;
use fl_vessel::Vessel;
use tracing::info;

use crate::environment::Environment;
use crate::error::{SimError, SimResult};
use crate::motion::PlacementProvider;
use crate::tick::step;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: Real,
    /// Final simulation time (seconds)
    pub t_end: Real,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Network flow solver settings
    pub flow: FlowConfig,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.05,
            t_end: 10.0,
            max_steps: 100_000,
            record_every: 10,
            flow: FlowConfig::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        self.flow.validate()?;
        Ok(())
    }
}

/// Per-compartment state captured at one recorded time.
#[derive(Clone, Debug, PartialEq)]
pub struct VesselSnapshot {
    pub water_area: Vec<Real>,
    pub air_integrity: Vec<Real>,
    pub can_release_air: Vec<bool>,
}

impl VesselSnapshot {
    pub fn capture(vessel: &Vessel) -> Self {
        let compartments = vessel.compartments();
        Self {
            water_area: compartments.iter().map(|c| c.water_area()).collect(),
            air_integrity: compartments.iter().map(|c| c.air_integrity()).collect(),
            can_release_air: compartments.iter().map(|c| c.can_release_air()).collect(),
        }
    }

    pub fn total_water(&self) -> Real {
        self.water_area.iter().sum()
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<Real>,
    /// State snapshots
    pub x: Vec<VesselSnapshot>,
}

/// Run the vessel forward with a fixed step until `t_end`.
///
/// Each tick first asks `placement` for the pose, then calls [`step`].
pub fn run_sim(
    vessel: &mut Vessel,
    env: &dyn Environment,
    placement: &mut dyn PlacementProvider,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    opts.validate()?;

    let mut t = 0.0;
    vessel.set_pose(placement.pose_at(t));
    let mut t_record = vec![t];
    let mut x_record = vec![VesselSnapshot::capture(vessel)];

    let mut step_count = 0;
    while t < opts.t_end && step_count < opts.max_steps {
        vessel.set_pose(placement.pose_at(t));
        step(vessel, env, opts.dt, &opts.flow)?;
        t += opts.dt;
        step_count += 1;

        if step_count % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(VesselSnapshot::capture(vessel));
        }
    }

    // Always record final state
    if step_count % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(VesselSnapshot::capture(vessel));
    }

    info!(
        vessel = %vessel.name(),
        steps = step_count,
        t_final = t,
        total_water = vessel.total_water(),
        "simulation finished"
    );
    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
