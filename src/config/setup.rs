pub mod parameters;

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use crate::dynamics::schedule::simulation_time_step;
use crate::error::SetupError;

use self::parameters::SimulationParams;

const DEFAULT_OUTPUT_DIR: &str = "data";
pub const ARCHIVE_EXTENSION: &str = "wave";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SetupConfig {
    pub name: String,
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub simulation: SimulationParams,
}

impl SetupConfig {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, SetupError> {
        let config: SetupConfig = serde_yaml::from_str(contents)?;
        config.simulation.validate()?;
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => Path::new(DEFAULT_OUTPUT_DIR)
                .join(&self.name)
                .with_extension(ARCHIVE_EXTENSION),
        }
    }

    pub fn print(&self) {
        let wave = self.simulation.wave();
        let (variant, grid) = match &self.simulation {
            SimulationParams::Line(_) => ("line", format!("{}", wave.n)),
            SimulationParams::Plane(_) => ("plane", format!("{n}×{n}", n = wave.n)),
        };
        let limit = self.simulation.cfl_limit();
        let dt_sim = simulation_time_step(wave.c, wave.dt, wave.dx(), limit);
        println!(
            "\
Scenario: {name} ({variant})
  Domain:
    Half extent: {l}
    Grid: {grid} points, dx = {dx:.4}
  Wave:
    Speed: {c}
    Damping: {damping}
  Source:
    Amplitude: {amplitude}
    Radius: {radius}
    Velocity: {velocity:?}

Derived parameters:
  Simulation step: {dt_sim:.5} (requested output interval {dt})
  Courant number: {courant:.3} (limit {limit:.3})
  Output frames: {n_frames} over t = {t_max}
  Archive: {output}",
            name = self.name,
            l = wave.l,
            dx = wave.dx(),
            c = wave.c,
            damping = wave.damping,
            amplitude = wave.amplitude,
            radius = wave.radius,
            velocity = self.simulation.velocity(),
            dt = wave.dt,
            courant = wave.courant_number(dt_sim),
            n_frames = wave.n_frames(),
            t_max = wave.t_max,
            output = self.output_path().display(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use nalgebra::Vector2;

    #[test]
    fn test_parse_line_with_defaults() {
        let config = SetupConfig::from_yaml(
            "\
name: moving_line
simulation:
  type: Line
  velocity: 0.5
",
        )
        .unwrap();
        match &config.simulation {
            SimulationParams::Line(p) => {
                assert_eq!(p.velocity, 0.5);
                assert_eq!(p.wave, parameters::common::WaveParams::default());
            }
            SimulationParams::Plane(_) => panic!("expected a line scenario"),
        }
        assert_eq!(config.output_path(), PathBuf::from("data/moving_line.wave"));
    }

    #[test]
    fn test_parse_plane() {
        let config = SetupConfig::from_yaml(
            "\
name: moving_plane
output: out/plane.wave
simulation:
  type: Plane
  wave:
    n: 51
    damping: 0.99
  velocity: [0.25, -0.5]
",
        )
        .unwrap();
        match &config.simulation {
            SimulationParams::Plane(p) => {
                assert_eq!(p.velocity, Vector2::new(0.25, -0.5));
                assert_eq!(p.wave.n, 51);
                assert_eq!(p.wave.damping, 0.99);
                assert_eq!(p.wave.c, 1.0);
            }
            SimulationParams::Line(_) => panic!("expected a plane scenario"),
        }
        assert_eq!(config.output_path(), PathBuf::from("out/plane.wave"));
    }

    #[test]
    fn test_shipped_scenarios_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
        for name in ["stationary_line", "moving_line", "moving_plane"] {
            let config = SetupConfig::parse(dir.join(name).with_extension("yaml")).unwrap();
            assert_eq!(config.name, name);
        }
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let err = SetupConfig::from_yaml(
            "\
name: bad
simulation:
  type: Plane
  wave:
    n: 2
",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SetupError::Config(ConfigError::Resolution(2))
        ));

        let err = SetupConfig::from_yaml("name: bad\nsimulation:\n  type: Cube\n").unwrap_err();
        assert!(matches!(err, SetupError::Yaml(_)));
    }
}
