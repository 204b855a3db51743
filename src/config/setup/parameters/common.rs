use ndarray::Array1;

use crate::dynamics::schedule::STEP_TOLERANCE;
use crate::error::ConfigError;
use crate::geometry::linspace;

// Parameters shared by the line and plane variants.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WaveParams {
    // Half extent of the domain, which spans [-l, l] along every axis.
    pub l: f64,
    // Wave speed.
    pub c: f64,
    // Source.
    pub amplitude: f64,
    pub radius: f64,
    // Grid points per axis.
    pub n: usize,
    // Total simulated time.
    pub t_max: f64,
    // Output sampling interval. The simulation step may be finer.
    pub dt: f64,
    // Multiplicative factor applied to every updated field.
    pub damping: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        WaveParams {
            l: 10.0,
            c: 1.0,
            amplitude: 1.0,
            radius: 0.2,
            n: 401,
            t_max: 4.0,
            dt: 0.01,
            damping: 1.0,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

pub fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    Ok(())
}

impl WaveParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("l", self.l)?;
        positive("c", self.c)?;
        finite("amplitude", self.amplitude)?;
        finite("radius", self.radius)?;
        if self.radius < 0.0 {
            return Err(ConfigError::Radius(self.radius));
        }
        if self.n < 3 {
            return Err(ConfigError::Resolution(self.n));
        }
        positive("t_max", self.t_max)?;
        positive("dt", self.dt)?;
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        Ok(())
    }

    // The output buffer holds n_frames × n^dimensions values and must be
    // addressable before stepping starts.
    pub fn validate_size(&self, dimensions: u32) -> Result<(), ConfigError> {
        let frames = (self.t_max / self.dt - STEP_TOLERANCE).ceil().max(1.0);
        let too_large = ConfigError::TooLarge {
            n_frames: frames,
            n: self.n,
            dimensions,
        };
        let max_values = isize::MAX as usize / std::mem::size_of::<f64>();
        if frames >= max_values as f64 {
            return Err(too_large);
        }
        self.n
            .checked_pow(dimensions)
            .and_then(|points| points.checked_mul(frames as usize))
            .filter(|&values| values <= max_values)
            .map(|_| ())
            .ok_or(too_large)
    }

    pub fn x(&self) -> Array1<f64> {
        Array1::from(linspace(-self.l, self.l, self.n))
    }

    pub fn dx(&self) -> f64 {
        let x = linspace(-self.l, self.l, self.n);
        x[1] - x[0]
    }

    // Number of output frames, ceil(t_max / dt), and never fewer than one.
    pub fn n_frames(&self) -> usize {
        ((self.t_max / self.dt - STEP_TOLERANCE).ceil() as usize).max(1)
    }

    pub fn timestamps(&self) -> Array1<f64> {
        (0..self.n_frames()).map(|k| k as f64 * self.dt).collect()
    }

    pub fn courant_number(&self, dt_sim: f64) -> f64 {
        self.c * dt_sim / self.dx()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(WaveParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_spacing() {
        let params = WaveParams::default();
        assert_relative_eq!(params.dx(), 0.05, epsilon = 1e-12);
        let x = params.x();
        assert_eq!(x.len(), 401);
        assert_relative_eq!(x[0], -10.0);
        assert_relative_eq!(x[400], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_count() {
        let params = WaveParams::default();
        assert_eq!(params.n_frames(), 400);

        let params = WaveParams {
            t_max: 1.05,
            dt: 0.1,
            ..WaveParams::default()
        };
        assert_eq!(params.n_frames(), 11);

        let t = params.timestamps();
        for (k, t_k) in t.iter().enumerate() {
            assert_eq!(*t_k, k as f64 * 0.1);
        }
    }

    #[test]
    fn test_rejects_invalid() {
        let bad = |f: fn(&mut WaveParams)| {
            let mut params = WaveParams::default();
            f(&mut params);
            params.validate()
        };
        assert_eq!(bad(|p| p.n = 2), Err(ConfigError::Resolution(2)));
        assert_eq!(bad(|p| p.radius = -0.1), Err(ConfigError::Radius(-0.1)));
        assert_eq!(bad(|p| p.damping = 0.0), Err(ConfigError::Damping(0.0)));
        assert_eq!(bad(|p| p.damping = 1.5), Err(ConfigError::Damping(1.5)));
        assert_eq!(
            bad(|p| p.c = 0.0),
            Err(ConfigError::NonPositive {
                name: "c",
                value: 0.0
            })
        );
        assert_eq!(
            bad(|p| p.dt = -0.01),
            Err(ConfigError::NonPositive {
                name: "dt",
                value: -0.01
            })
        );
        assert!(matches!(
            bad(|p| p.t_max = f64::INFINITY),
            Err(ConfigError::NonFinite { name: "t_max", .. })
        ));
        assert!(matches!(
            bad(|p| p.damping = f64::NAN),
            Err(ConfigError::Damping(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_output() {
        let params = WaveParams {
            n: 11,
            t_max: 1e30,
            dt: 1e-30,
            ..WaveParams::default()
        };
        assert_eq!(params.validate(), Ok(()));
        assert!(matches!(
            params.validate_size(1),
            Err(ConfigError::TooLarge { n: 11, dimensions: 1, .. })
        ));

        let params = WaveParams {
            n: usize::MAX / 2,
            ..WaveParams::default()
        };
        assert!(matches!(
            params.validate_size(2),
            Err(ConfigError::TooLarge { dimensions: 2, .. })
        ));

        assert_eq!(WaveParams::default().validate_size(2), Ok(()));
    }
}
