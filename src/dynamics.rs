pub mod frame;
pub mod schedule;
pub mod source;
pub mod stencil;

use log::{debug, info};
use nalgebra::{SVector, Vector1};
use ndarray::{Array, Array1, Axis, Dimension, Ix1, Ix2, Ix3, RemoveAxis, Zip};

use crate::archive::WaveArchive;
use crate::config::run::RunParams;
use crate::config::setup::parameters::{
    common::WaveParams, line::LineParams, plane::PlaneParams, SimulationParams,
};
use crate::config::setup::SetupConfig;
use crate::error::{ConfigError, RunError};
use crate::state::{Frame, GridState};

use self::frame::FrameTracker;
use self::schedule::{checked_simulation_time_step, OutputSchedule};

// Leapfrog integrator for the wave equation on a grid that translates with a
// co-moving source.
#[derive(Debug, Clone)]
pub struct Stepper<D: Dimension, const K: usize> {
    state: GridState<D, K>,
    tracker: FrameTracker<K>,
    mask: Array<bool, D>,
    // Squared Courant number, (c dt_sim / dx)².
    coeff: f64,
    damping: f64,
    amplitude: f64,
    dt_sim: f64,
}

pub type LineStepper = Stepper<Ix1, 1>;
pub type PlaneStepper = Stepper<Ix2, 2>;

impl LineStepper {
    pub fn line(params: &LineParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Stepper::build(
            &params.wave,
            Vector1::new(params.velocity),
            Ix1(params.wave.n),
            LineParams::CFL_LIMIT,
        ))
    }
}

impl PlaneStepper {
    pub fn plane(params: &PlaneParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let n = params.wave.n;
        Ok(Stepper::build(
            &params.wave,
            params.velocity,
            Ix2(n, n),
            PlaneParams::CFL_LIMIT,
        ))
    }
}

impl<D: Dimension, const K: usize> Stepper<D, K> {
    fn build(wave: &WaveParams, velocity: SVector<f64, K>, dim: D, cfl_limit: f64) -> Self {
        let x = wave.x();
        let dx = x[1] - x[0];
        let dt_sim = checked_simulation_time_step(wave.c, wave.dt, dx, cfl_limit);
        Stepper {
            state: GridState::new(dim.clone()),
            tracker: FrameTracker::new(velocity, dt_sim, dx),
            mask: source::source_mask(&x, dim, wave.radius),
            coeff: (wave.c * dt_sim / dx).powi(2),
            damping: wave.damping,
            amplitude: wave.amplitude,
            dt_sim,
        }
    }

    // Start from `field` at rest instead of from zero.
    pub fn with_initial_field(mut self, field: Array<f64, D>) -> Result<Self, ConfigError> {
        let expected = self.state.current.field.shape();
        if field.shape() != expected {
            return Err(ConfigError::Shape {
                expected: expected.to_vec(),
                found: field.shape().to_vec(),
            });
        }
        self.state.previous.field = field.clone();
        self.state.current.field = field;
        Ok(self)
    }

    pub fn step(&mut self) {
        let offset = self.tracker.advance();
        let current = &self.state.current;
        let previous = &self.state.previous;
        let h = stencil::shift(&current.field, current.shift_to(&offset).as_slice());
        let h_prev = stencil::shift(&previous.field, previous.shift_to(&offset).as_slice());
        let lap = stencil::laplacian(&h);

        let (coeff, damping) = (self.coeff, self.damping);
        let mut next = Array::zeros(h.raw_dim());
        Zip::from(&mut next)
            .and(&lap)
            .and(&h)
            .and(&h_prev)
            .for_each(|n, &l, &c, &p| *n = damping * (coeff * l + 2.0 * c - p));
        source::apply_source(&mut next, &self.mask, self.amplitude);

        self.state.rotate(Frame {
            field: next,
            offset,
        });
    }

    pub fn state(&self) -> &GridState<D, K> {
        &self.state
    }

    pub fn field(&self) -> &Array<f64, D> {
        &self.state.current.field
    }

    pub fn mask(&self) -> &Array<bool, D> {
        &self.mask
    }

    pub fn dt_sim(&self) -> f64 {
        self.dt_sim
    }

    pub fn steps(&self) -> u64 {
        self.state.step
    }

    pub fn elapsed(&self) -> f64 {
        self.state.step as f64 * self.dt_sim
    }

    // Discrete leapfrog energy
    //   |h|² - d <h, 2 h_prev + λ² ∇² h_prev> + d |h_prev|²,
    // with h_prev carried into the current frame. Without source, shifts or
    // edge effects it is multiplied by exactly d = damping every step.
    pub fn energy(&self) -> f64 {
        let current = &self.state.current;
        let previous = &self.state.previous;
        let h_prev = stencil::shift(
            &previous.field,
            previous.shift_to(&current.offset).as_slice(),
        );
        let lap_prev = stencil::laplacian(&h_prev);
        let d = self.damping;
        let mut energy = 0.0;
        Zip::from(&current.field)
            .and(&h_prev)
            .and(&lap_prev)
            .for_each(|&h, &p, &l| {
                energy += h * h - d * h * (2.0 * p + self.coeff * l) + d * p * p;
            });
        energy
    }
}

// Snapshots of a run: frames has shape (n_frames, ...grid...).
#[derive(Debug, Clone, PartialEq)]
pub struct WaveRecord<E: Dimension> {
    pub frames: Array<f64, E>,
    pub x: Array1<f64>,
    pub t: Array1<f64>,
    pub dt_sim: f64,
    pub steps: u64,
}

pub fn record<D, const K: usize>(
    mut stepper: Stepper<D, K>,
    wave: &WaveParams,
    dframe_log: usize,
) -> WaveRecord<D::Larger>
where
    D: Dimension,
    D::Larger: RemoveAxis,
{
    let n_frames = wave.n_frames();
    let mut shape = stepper.field().raw_dim().insert_axis(Axis(0));
    shape[0] = n_frames;
    let mut frames = Array::zeros(shape);

    let mut schedule = OutputSchedule::new(wave.dt, stepper.dt_sim(), n_frames);
    let total_steps = schedule.total_steps();
    info!(
        "Running {} steps of dt_sim={} to record {} frames",
        total_steps,
        stepper.dt_sim(),
        n_frames
    );

    while !schedule.is_done() {
        stepper.step();
        if let Some(k) = schedule.frame_due(stepper.steps()) {
            frames.index_axis_mut(Axis(0), k).assign(stepper.field());
            debug!(
                "Frame {}: step={}, t_sim={}",
                k,
                stepper.steps(),
                stepper.elapsed()
            );
            if dframe_log > 0 && k % dframe_log == 0 {
                info!(
                    "FRAME: {}/{}, step={}, t={}",
                    k,
                    n_frames,
                    stepper.steps(),
                    stepper.elapsed()
                );
            }
        }
    }

    WaveRecord {
        frames,
        x: wave.x(),
        t: wave.timestamps(),
        dt_sim: stepper.dt_sim(),
        steps: stepper.steps(),
    }
}

pub fn simulate_line(params: &LineParams) -> Result<WaveRecord<Ix2>, ConfigError> {
    Ok(record(LineStepper::line(params)?, &params.wave, 0))
}

pub fn simulate_plane(params: &PlaneParams) -> Result<WaveRecord<Ix3>, ConfigError> {
    Ok(record(PlaneStepper::plane(params)?, &params.wave, 0))
}

// Simulate a scenario and write its archive.
pub fn run(setup_config: &SetupConfig, run_params: &RunParams) -> Result<WaveArchive, RunError> {
    let archive = match &setup_config.simulation {
        SimulationParams::Line(params) => {
            let stepper = LineStepper::line(params)?;
            let wave_record = record(stepper, &params.wave, run_params.dframe_log);
            WaveArchive::from_line(&wave_record, params)
        }
        SimulationParams::Plane(params) => {
            let stepper = PlaneStepper::plane(params)?;
            let wave_record = record(stepper, &params.wave, run_params.dframe_log);
            WaveArchive::from_plane(&wave_record, params)
        }
    };
    archive.save(&run_params.output)?;
    Ok(archive)
}
