//! Scenario schema definitions.

use fl_solver::FlowConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub vessel: VesselDef,
    #[serde(default)]
    pub environment: EnvironmentDef,
    #[serde(default)]
    pub motion: MotionDef,
    #[serde(default)]
    pub run: RunDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VesselDef {
    pub name: String,
    #[serde(default)]
    pub placement: PlacementDef,
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 2],
    #[serde(default)]
    pub compartments: Vec<CompartmentDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

/// Rigid transform: translation plus rotation in radians.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PlacementDef {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub angle: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompartmentDef {
    pub id: String,
    pub shape: ShapeDef,
    #[serde(default)]
    pub water: f64,
    #[serde(default)]
    pub vents_to_outside: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<AirDef>,
    #[serde(default)]
    pub sources: Vec<SourceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ShapeDef {
    /// Axis-aligned box in vessel coordinates.
    Rect(RectDef),
    /// Clockwise corners: top-left, top-right, bottom-right, bottom-left.
    Quad { corners: [[f64; 2]; 4] },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RectDef {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AirDef {
    pub min_air_fraction: f64,
    pub leak_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDef {
    pub kind: SourceKindDef,
    pub rate: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SourceKindDef {
    Inflow,
    Rain,
    /// Breach through hull edge `edge` (corner `edge` to corner `edge + 1`).
    Sea { edge: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionDef {
    pub id: String,
    pub a: String,
    pub b: String,
    pub opening: RectDef,
    /// Reference frame of `opening`, relative to the vessel.
    #[serde(default)]
    pub frame: PlacementDef,
    #[serde(default = "default_flow_coefficient")]
    pub flow_coefficient: f64,
    #[serde(default = "default_true")]
    pub open: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentDef {
    #[serde(default)]
    pub sea_level: f64,
    #[serde(default)]
    pub rain: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MotionDef {
    #[default]
    Fixed,
    /// Sinusoidal roll about the vessel placement.
    Roll { amplitude: f64, period: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_t_end")]
    pub t_end: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    #[serde(default)]
    pub flow: FlowConfig,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            t_end: default_t_end(),
            max_steps: default_max_steps(),
            record_every: default_record_every(),
            flow: FlowConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_gravity() -> [f64; 2] {
    [0.0, -1.0]
}

fn default_flow_coefficient() -> f64 {
    1.0
}

fn default_dt() -> f64 {
    0.05
}

fn default_t_end() -> f64 {
    10.0
}

fn default_max_steps() -> usize {
    100_000
}

fn default_record_every() -> usize {
    10
}
