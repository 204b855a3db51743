use std::path::Path;

use log::{debug, info};
use nalgebra::{Point2, Vector2};
use rand_distr::Uniform;

use crate::config::setup::parameters::common::finite;
use crate::error::{ConfigError, PlacementError};
use crate::geometry::point::random_point_in_box;

#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionDisc {
    pub centre: Point2<f64>,
    pub radius: f64,
}

impl ExclusionDisc {
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        (p - self.centre).norm() < self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    pub count: usize,
    // Box side lengths; the box is centred on the origin.
    pub l: Vector2<f64>,
    pub min_separation: f64,
    pub exclusions: Vec<ExclusionDisc>,
    // Budget of rejected candidates before giving up.
    pub max_attempts: usize,
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("lx", self.l.x), ("ly", self.l.y)] {
            finite(name, value)?;
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        finite("min_separation", self.min_separation)?;
        for disc in &self.exclusions {
            finite("exclusion_radius", disc.radius)?;
            if disc.radius < 0.0 {
                return Err(ConfigError::Radius(disc.radius));
            }
        }
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct PlacedRow {
    index: usize,
    x: f64,
    y: f64,
}

// Rejection sampling: draw uniform candidates in the box and keep those that
// are outside every exclusion disc and at least min_separation from every
// particle kept so far.
pub fn place_particles<R: rand::Rng>(
    rng: &mut R,
    config: &PlacementConfig,
) -> Result<Vec<Point2<f64>>, PlacementError> {
    config.validate()?;
    let unit_distr = Uniform::new(-0.5, 0.5);
    let mut placed: Vec<Point2<f64>> = Vec::with_capacity(config.count);
    let mut rejected = 0;
    while placed.len() < config.count {
        let candidate = random_point_in_box(rng, unit_distr, config.l);
        let excluded = config.exclusions.iter().any(|d| d.contains(&candidate));
        let crowded = placed
            .iter()
            .any(|p| (p - candidate).norm() < config.min_separation);
        if excluded || crowded {
            rejected += 1;
            if rejected > config.max_attempts {
                return Err(PlacementError::Exhausted {
                    placed: placed.len(),
                    requested: config.count,
                    attempts: config.max_attempts,
                });
            }
            continue;
        }
        placed.push(candidate);
    }
    debug!(
        "Placed {} particles, rejected {} candidates",
        placed.len(),
        rejected
    );
    Ok(placed)
}

pub fn write_particles<W: std::io::Write>(
    writer: W,
    points: &[Point2<f64>],
) -> Result<(), PlacementError> {
    let mut writer = csv::Writer::from_writer(writer);
    for (index, p) in points.iter().enumerate() {
        writer.serialize(PlacedRow {
            index,
            x: p.x,
            y: p.y,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_particles<P: AsRef<Path>>(path: P, points: &[Point2<f64>]) -> Result<(), PlacementError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_particles(std::fs::File::create(path)?, points)?;
    info!("Wrote {} particles to {}", points.len(), path.display());
    Ok(())
}
