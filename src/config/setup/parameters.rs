use self::{line::LineParams, plane::PlaneParams};

pub mod common;
pub mod line;
pub mod plane;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum SimulationParams {
    Line(LineParams),
    Plane(PlaneParams),
}

impl SimulationParams {
    pub fn wave(&self) -> &common::WaveParams {
        match self {
            SimulationParams::Line(p) => &p.wave,
            SimulationParams::Plane(p) => &p.wave,
        }
    }

    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        match self {
            SimulationParams::Line(p) => p.validate(),
            SimulationParams::Plane(p) => p.validate(),
        }
    }

    pub fn cfl_limit(&self) -> f64 {
        match self {
            SimulationParams::Line(_) => LineParams::CFL_LIMIT,
            SimulationParams::Plane(_) => PlaneParams::CFL_LIMIT,
        }
    }

    pub fn velocity(&self) -> Vec<f64> {
        match self {
            SimulationParams::Line(p) => vec![p.velocity],
            SimulationParams::Plane(p) => vec![p.velocity.x, p.velocity.y],
        }
    }
}
