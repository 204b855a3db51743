use super::common::{finite, WaveParams};
use crate::error::ConfigError;

// 1D grid translating at a constant velocity.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LineParams {
    pub wave: WaveParams,
    pub velocity: f64,
}

impl LineParams {
    pub const CFL_LIMIT: f64 = 1.0;

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wave.validate()?;
        self.wave.validate_size(1)?;
        finite("velocity", self.velocity)
    }
}
