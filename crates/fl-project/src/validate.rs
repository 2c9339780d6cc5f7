//! Scenario validation logic.
//!
//! Structural checks only (ids, references, ranges). Geometry checks such
//! as convexity happen when the vessel is assembled.

use crate::schema::{CompartmentDef, ConnectionDef, RectDef, RunDef, Scenario, SourceKindDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let vessel = &scenario.vessel;
    let [gx, gy] = vessel.gravity;
    if !(gx.is_finite() && gy.is_finite()) || (gx == 0.0 && gy == 0.0) {
        return Err(invalid(
            "vessel.gravity",
            format!("[{gx}, {gy}]"),
            "must be finite and non-zero",
        ));
    }

    let mut compartment_ids = HashSet::new();
    for compartment in &vessel.compartments {
        if !compartment_ids.insert(compartment.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: compartment.id.clone(),
                context: "compartments".to_string(),
            });
        }
        validate_compartment(compartment)?;
    }

    let mut connection_ids = HashSet::new();
    for connection in &vessel.connections {
        if !connection_ids.insert(connection.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: connection.id.clone(),
                context: "connections".to_string(),
            });
        }
        validate_connection(connection, &compartment_ids)?;
    }

    let env = &scenario.environment;
    if !env.sea_level.is_finite() {
        return Err(invalid("environment.sea_level", env.sea_level, "must be finite"));
    }
    if !(0.0..=1.0).contains(&env.rain) {
        return Err(invalid("environment.rain", env.rain, "must be in [0, 1]"));
    }

    validate_run(&scenario.run)
}

fn validate_compartment(compartment: &CompartmentDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("compartment {}.{name}", compartment.id);

    if !compartment.water.is_finite() || compartment.water < 0.0 {
        return Err(invalid(field("water"), compartment.water, "must be non-negative"));
    }
    if let Some(air) = &compartment.air {
        if !(0.0..=1.0).contains(&air.min_air_fraction) {
            return Err(invalid(
                field("air.min_air_fraction"),
                air.min_air_fraction,
                "must be in [0, 1]",
            ));
        }
        if !air.leak_rate.is_finite() || air.leak_rate < 0.0 {
            return Err(invalid(field("air.leak_rate"), air.leak_rate, "must be non-negative"));
        }
    }
    for source in &compartment.sources {
        if !source.rate.is_finite() || source.rate < 0.0 {
            return Err(invalid(field("sources.rate"), source.rate, "must be non-negative"));
        }
        if let SourceKindDef::Sea { edge } = source.kind
            && edge > 3
        {
            return Err(invalid(field("sources.edge"), edge, "must be 0..=3"));
        }
    }
    Ok(())
}

fn validate_connection(
    connection: &ConnectionDef,
    compartments: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let context = format!("connection {}", connection.id);
    for end in [&connection.a, &connection.b] {
        if !compartments.contains(end.as_str()) {
            return Err(ValidationError::MissingReference {
                id: end.clone(),
                context: context.clone(),
            });
        }
    }
    if connection.a == connection.b {
        return Err(invalid(
            format!("{context}.b"),
            &connection.b,
            "a connection must join two different compartments",
        ));
    }
    validate_rect(&connection.opening, &context)?;
    if !connection.flow_coefficient.is_finite() || connection.flow_coefficient < 0.0 {
        return Err(invalid(
            format!("{context}.flow_coefficient"),
            connection.flow_coefficient,
            "must be non-negative",
        ));
    }
    Ok(())
}

fn validate_rect(rect: &RectDef, context: &str) -> Result<(), ValidationError> {
    let RectDef {
        left,
        right,
        bottom,
        top,
    } = *rect;
    if ![left, right, bottom, top].iter().all(|v| v.is_finite()) {
        return Err(invalid(format!("{context}.opening"), format!("{rect:?}"), "must be finite"));
    }
    if right <= left || top <= bottom {
        return Err(invalid(
            format!("{context}.opening"),
            format!("{rect:?}"),
            "right must exceed left and top must exceed bottom",
        ));
    }
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if !run.dt.is_finite() || run.dt <= 0.0 {
        return Err(invalid("run.dt", run.dt, "must be positive"));
    }
    if !run.t_end.is_finite() || run.t_end < 0.0 {
        return Err(invalid("run.t_end", run.t_end, "must be non-negative"));
    }
    if run.max_steps == 0 {
        return Err(invalid("run.max_steps", run.max_steps, "must be positive"));
    }
    if run.record_every == 0 {
        return Err(invalid("run.record_every", run.record_every, "must be positive"));
    }
    if run.flow.max_passes == 0 {
        return Err(invalid("run.flow.max_passes", run.flow.max_passes, "must be positive"));
    }
    Ok(())
}

fn invalid(
    field: impl Into<String>,
    value: impl ToString,
    reason: impl Into<String>,
) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}
