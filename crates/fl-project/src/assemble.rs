//! Turn a validated scenario into runtime objects.

use std::collections::HashMap;

use fl_geom::{Pose, Vec2};
use fl_sim::{CalmSea, Motion, SimOptions};
use fl_vessel::{
    AirParams, Compartment, ExternalSource, OpeningRect, SourceKind, Vessel, VesselBuilder,
};
use nalgebra::Isometry2;

use crate::schema::{
    CompartmentDef, EnvironmentDef, MotionDef, PlacementDef, RectDef, RunDef, Scenario, ShapeDef,
    SourceDef, SourceKindDef, VesselDef,
};
use crate::{ProjectError, ProjectResult};

fn isometry(p: &PlacementDef) -> Isometry2<f64> {
    Isometry2::new(Vec2::new(p.x, p.y), p.angle)
}

fn opening(r: &RectDef) -> OpeningRect {
    OpeningRect::new(r.left, r.right, r.bottom, r.top)
}

/// Vessel pose from placement and gravity.
pub fn vessel_pose(def: &VesselDef) -> ProjectResult<Pose> {
    let [gx, gy] = def.gravity;
    Ok(Pose::new(isometry(&def.placement), Vec2::new(gx, gy))?)
}

fn source(def: &SourceDef) -> ExternalSource {
    let kind = match def.kind {
        SourceKindDef::Inflow => SourceKind::Inflow,
        SourceKindDef::Rain => SourceKind::Rain,
        SourceKindDef::Sea { edge } => SourceKind::Sea { edge },
    };
    ExternalSource {
        kind,
        rate: def.rate,
        active: def.active,
    }
}

fn compartment(def: &CompartmentDef) -> ProjectResult<Compartment> {
    let mut compartment = match &def.shape {
        ShapeDef::Rect(r) => Compartment::rectangle(&def.id, r.left, r.right, r.bottom, r.top)?,
        ShapeDef::Quad { corners } => {
            Compartment::new(&def.id, corners.map(|[x, y]| Vec2::new(x, y)))?
        }
    };
    if let Some(air) = &def.air {
        compartment = compartment.with_air(AirParams {
            min_air_fraction: air.min_air_fraction,
            leak_rate: air.leak_rate,
        })?;
    }
    compartment = compartment.with_vent(def.vents_to_outside);
    for s in &def.sources {
        compartment.add_source(source(s))?;
    }
    Ok(compartment)
}

/// Assemble the vessel: compartments, connections, pose and initial water.
///
/// Initial water is applied after the pose so the surface reflects the
/// placement the scenario starts from.
pub fn build_vessel(def: &VesselDef) -> ProjectResult<Vessel> {
    let mut builder = VesselBuilder::new(def.name.clone()).pose(vessel_pose(def)?);

    let mut handles = HashMap::new();
    for c in &def.compartments {
        let id = builder.add_compartment(compartment(c)?);
        handles.insert(c.id.as_str(), id);
    }

    for conn in &def.connections {
        let lookup = |name: &str| {
            handles
                .get(name)
                .copied()
                .ok_or_else(|| ProjectError::Build {
                    what: format!("connection {} references unknown compartment {name}", conn.id),
                })
        };
        let (a, b) = (lookup(&conn.a)?, lookup(&conn.b)?);
        builder.add_connection_in_frame(
            a,
            b,
            isometry(&conn.frame),
            opening(&conn.opening),
            conn.flow_coefficient,
            conn.open,
        );
    }

    let mut vessel = builder.build()?;
    for c in &def.compartments {
        if c.water > 0.0
            && let Some(id) = vessel.find_compartment(&c.id)
            && let Some(target) = vessel.compartment_mut(id)
        {
            target.set_water_area(c.water);
        }
    }
    Ok(vessel)
}

pub fn environment(def: &EnvironmentDef) -> CalmSea {
    CalmSea {
        level: def.sea_level,
        rain: def.rain,
    }
}

/// Placement driver; motion is applied on top of the vessel's placement.
pub fn motion(def: &MotionDef, base: Pose) -> Motion {
    match *def {
        MotionDef::Fixed => Motion::Fixed(base),
        MotionDef::Roll { amplitude, period } => Motion::Roll {
            base,
            amplitude,
            period,
        },
    }
}

pub fn sim_options(run: &RunDef) -> SimOptions {
    SimOptions {
        dt: run.dt,
        t_end: run.t_end,
        max_steps: run.max_steps,
        record_every: run.record_every,
        flow: run.flow,
    }
}

/// Everything needed to run a scenario.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub vessel: Vessel,
    pub environment: CalmSea,
    pub motion: Motion,
    pub options: SimOptions,
}

pub fn assemble(scenario: &Scenario) -> ProjectResult<Assembled> {
    let vessel = build_vessel(&scenario.vessel)?;
    let base = *vessel.pose();
    Ok(Assembled {
        vessel,
        environment: environment(&scenario.environment),
        motion: motion(&scenario.motion, base),
        options: sim_options(&scenario.run),
    })
}
