use nalgebra::Vector2;

use super::common::{finite, WaveParams};
use crate::error::ConfigError;

// 2D N×N grid translating at a constant velocity (vx, vy).
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlaneParams {
    pub wave: WaveParams,
    pub velocity: Vector2<f64>,
}

impl Default for PlaneParams {
    fn default() -> Self {
        PlaneParams {
            wave: WaveParams {
                n: 201,
                ..WaveParams::default()
            },
            velocity: Vector2::zeros(),
        }
    }
}

impl PlaneParams {
    pub const CFL_LIMIT: f64 = std::f64::consts::FRAC_1_SQRT_2;

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wave.validate()?;
        self.wave.validate_size(2)?;
        finite("velocity_x", self.velocity.x)?;
        finite("velocity_y", self.velocity.y)
    }
}
