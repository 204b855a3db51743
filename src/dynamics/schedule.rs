use log::warn;

// Slack for float ratios that should be integral, e.g. t_max / dt.
pub const STEP_TOLERANCE: f64 = 1e-9;

// The requested dt unless c * dt / dx exceeds the stability limit, in which
// case the largest stable step, limit * dx / c.
pub fn simulation_time_step(c: f64, dt: f64, dx: f64, cfl_limit: f64) -> f64 {
    if c * dt / dx > cfl_limit {
        cfl_limit * dx / c
    } else {
        dt
    }
}

pub fn checked_simulation_time_step(c: f64, dt: f64, dx: f64, cfl_limit: f64) -> f64 {
    let dt_sim = simulation_time_step(c, dt, dx, cfl_limit);
    if dt_sim < dt {
        warn!(
            "Courant number {:.3} exceeds {:.3}, reducing simulation step from {} to {}",
            c * dt / dx,
            cfl_limit,
            dt,
            dt_sim
        );
    }
    dt_sim
}

// Maps output frames onto 1-based simulation step counts. Frame 0 is taken
// after the first step; frame k after the first later step whose end time
// reaches k * dt. At most one frame is taken per step.
#[derive(Debug, Clone)]
pub struct OutputSchedule {
    steps_per_frame: f64,
    n_frames: usize,
    next_frame: usize,
    next_step: u64,
}

impl OutputSchedule {
    pub fn new(dt: f64, dt_sim: f64, n_frames: usize) -> Self {
        OutputSchedule {
            steps_per_frame: dt / dt_sim,
            n_frames,
            next_frame: 0,
            next_step: 1,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next_frame >= self.n_frames
    }

    // The frame to record after `step`, if any, advancing the schedule.
    pub fn frame_due(&mut self, step: u64) -> Option<usize> {
        if self.is_done() || step < self.next_step {
            return None;
        }
        let frame = self.next_frame;
        self.next_frame += 1;
        let target = (self.next_frame as f64 * self.steps_per_frame - STEP_TOLERANCE).ceil() as u64;
        self.next_step = target.max(step + 1);
        Some(frame)
    }

    // Total steps needed to fill every frame.
    pub fn total_steps(&self) -> u64 {
        let mut schedule = self.clone();
        let mut step = schedule.next_step;
        let mut last = 0;
        while !schedule.is_done() {
            step = step.max(schedule.next_step);
            schedule.frame_due(step);
            last = step;
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn due_steps(dt: f64, dt_sim: f64, n_frames: usize) -> Vec<u64> {
        let mut schedule = OutputSchedule::new(dt, dt_sim, n_frames);
        let total = schedule.total_steps();
        let steps: Vec<u64> = (1..=total)
            .filter(|&s| schedule.frame_due(s).is_some())
            .collect();
        assert!(schedule.is_done());
        steps
    }

    #[test]
    fn test_cfl_margin() {
        // 1D: c dt / dx = 2 > 1.
        assert_eq!(simulation_time_step(1.0, 0.1, 0.05, 1.0), 0.05);
        // 2D limit is 1/√2.
        let dt_sim = simulation_time_step(2.0, 0.1, 0.05, std::f64::consts::FRAC_1_SQRT_2);
        assert_relative_eq!(dt_sim, 0.05 / (2.0 * 2f64.sqrt()), epsilon = 1e-15);
        assert_relative_eq!(2.0 * dt_sim / 0.05, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-15);
        // Stable requests pass through unchanged.
        assert_eq!(simulation_time_step(1.0, 0.01, 0.05, 1.0), 0.01);
    }

    #[test]
    fn test_schedule_one_step_per_frame() {
        assert_eq!(due_steps(0.01, 0.01, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_schedule_fractional_ratio() {
        // Frame k lands on the first step at or after k * 2.5.
        assert_eq!(due_steps(0.25, 0.1, 4), vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_schedule_integral_ratio() {
        assert_eq!(due_steps(0.3, 0.1, 4), vec![1, 3, 6, 9]);
    }
}
