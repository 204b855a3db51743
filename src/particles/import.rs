// Import of particle-state CSV exports: one row per particle per time step.
//
// The schema is checked strictly (file, header and every required column must
// exist) but rows are read leniently: a row that fails to parse is dropped,
// so partially corrupt exports still load.

use std::{collections::HashMap, fs::File, path::Path};

use log::{debug, info};
use nalgebra::{Point3, Vector3};

use crate::error::ImportError;

pub const REQUIRED_COLUMNS: [&str; 19] = [
    "time",
    "index",
    "x",
    "y",
    "z",
    "vx",
    "vy",
    "vz",
    "density",
    "type",
    "visc_fx",
    "visc_fy",
    "visc_fz",
    "press_fx",
    "press_fy",
    "press_fz",
    "pressure",
    "solid_mass",
    "surface",
];

pub const MASS_COLUMN: &str = "mass";

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRow {
    pub time: f64,
    pub index: u32,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub density: f64,
    pub kind: i32,
    pub viscosity_force: Vector3<f64>,
    pub pressure_force: Vector3<f64>,
    pub pressure: f64,
    pub solid_mass: f64,
    pub surface: bool,
    pub mass: f64,
}

// All particles at one time, ordered by particle index. The per-particle
// arrays always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleFrame {
    pub time: f64,
    pub index: Vec<u32>,
    pub position: Vec<Point3<f64>>,
    pub velocity: Vec<Vector3<f64>>,
    pub density: Vec<f64>,
    pub kind: Vec<i32>,
    pub viscosity_force: Vec<Vector3<f64>>,
    pub pressure_force: Vec<Vector3<f64>>,
    pub pressure: Vec<f64>,
    pub solid_mass: Vec<f64>,
    pub surface: Vec<bool>,
    // Global particle mass, assumed constant.
    pub mass: f64,
}

impl ParticleFrame {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn push(&mut self, row: ParticleRow) {
        self.index.push(row.index);
        self.position.push(row.position);
        self.velocity.push(row.velocity);
        self.density.push(row.density);
        self.kind.push(row.kind);
        self.viscosity_force.push(row.viscosity_force);
        self.pressure_force.push(row.pressure_force);
        self.pressure.push(row.pressure);
        self.solid_mass.push(row.solid_mass);
        self.surface.push(row.surface);
    }
}

struct Columns {
    required: HashMap<&'static str, usize>,
    mass: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self, ImportError> {
        if header.is_empty() || header.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeader);
        }
        let position = |name: &str| header.iter().position(|h| h.trim() == name);
        let mut required = HashMap::new();
        for name in REQUIRED_COLUMNS {
            let i = position(name).ok_or(ImportError::MissingColumn(name))?;
            required.insert(name, i);
        }
        Ok(Columns {
            required,
            mass: position(MASS_COLUMN),
        })
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, name: &'static str) -> Option<&'r str> {
        record.get(self.required[name]).map(str::trim)
    }

    fn float(&self, record: &csv::StringRecord, name: &'static str) -> Option<f64> {
        self.field(record, name)?.parse().ok()
    }

    fn vector(&self, record: &csv::StringRecord, names: [&'static str; 3]) -> Option<Vector3<f64>> {
        Some(Vector3::new(
            self.float(record, names[0])?,
            self.float(record, names[1])?,
            self.float(record, names[2])?,
        ))
    }

    fn parse(&self, record: &csv::StringRecord) -> Option<ParticleRow> {
        let mass = self
            .mass
            .and_then(|i| record.get(i))
            .and_then(|m| m.trim().parse().ok())
            .unwrap_or(0.0);
        Some(ParticleRow {
            time: self.float(record, "time")?,
            index: self.field(record, "index")?.parse().ok()?,
            position: self.vector(record, ["x", "y", "z"])?.into(),
            velocity: self.vector(record, ["vx", "vy", "vz"])?,
            density: self.float(record, "density")?,
            kind: self.field(record, "type")?.parse().ok()?,
            viscosity_force: self.vector(record, ["visc_fx", "visc_fy", "visc_fz"])?,
            pressure_force: self.vector(record, ["press_fx", "press_fy", "press_fz"])?,
            pressure: self.float(record, "pressure")?,
            solid_mass: self.float(record, "solid_mass")?,
            surface: parse_flag(self.field(record, "surface")?)?,
            mass,
        })
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn read_rows<R: std::io::Read>(reader: R) -> Result<Vec<ParticleRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::from_header(reader.headers()?)?;

    let mut rows = vec![];
    let mut skipped = 0;
    for (line, result) in reader.records().enumerate() {
        match result.ok().and_then(|record| columns.parse(&record)) {
            Some(row) => rows.push(row),
            None => {
                debug!("Skipping malformed particle row {}", line + 2);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        info!("Skipped {} malformed particle rows", skipped);
    }
    Ok(rows)
}

// Group rows into frames by time, each sorted by particle index. The frame
// mass comes from the first row of the frame.
pub fn group_frames(mut rows: Vec<ParticleRow>) -> Vec<ParticleFrame> {
    rows.sort_by(|a, b| a.time.total_cmp(&b.time).then(a.index.cmp(&b.index)));
    let mut frames: Vec<ParticleFrame> = vec![];
    for row in rows {
        if let Some(frame) = frames.last_mut() {
            if frame.time == row.time {
                frame.push(row);
                continue;
            }
        }
        let mut frame = ParticleFrame {
            time: row.time,
            mass: row.mass,
            ..ParticleFrame::default()
        };
        frame.push(row);
        frames.push(frame);
    }
    frames
}

pub fn import_reader<R: std::io::Read>(reader: R) -> Result<Vec<ParticleFrame>, ImportError> {
    Ok(group_frames(read_rows(reader)?))
}

pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ParticleFrame>, ImportError> {
    let file = File::open(path.as_ref())?;
    let frames = import_reader(file)?;
    info!(
        "Imported {} particle frames from {}",
        frames.len(),
        path.as_ref().display()
    );
    Ok(frames)
}
