// Compressed archive of a simulated scenario: the snapshots `h`, the grid
// `x`, the output timestamps `t` and the parameters that produced them,
// bincode-encoded and zstd-compressed.

use std::path::Path;

use log::{debug, info};
use ndarray::{Array1, ArrayD, Dimension};

use crate::config::setup::parameters::{
    common::WaveParams, line::LineParams, plane::PlaneParams,
};
use crate::dynamics::WaveRecord;
use crate::error::ArchiveError;

pub const FORMAT_VERSION: u32 = 1;

const COMPRESSION_LEVEL: i32 = 3;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ArchiveMetadata {
    pub dimensions: u8,
    pub half_extent: f64,
    pub wave_speed: f64,
    pub amplitude: f64,
    pub radius: f64,
    // One component per translating axis.
    pub velocity: Vec<f64>,
    pub damping: f64,
    pub resolution: usize,
    pub t_max: f64,
    pub dt: f64,
    pub dt_sim: f64,
    pub steps: u64,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WaveArchive {
    pub format_version: u32,
    // (frames, n) for a line, (frames, n, n) for a plane.
    pub h: ArrayD<f64>,
    pub x: Array1<f64>,
    pub t: Array1<f64>,
    pub metadata: ArchiveMetadata,
}

impl ArchiveMetadata {
    fn new<E: Dimension>(
        wave: &WaveParams,
        velocity: Vec<f64>,
        record: &WaveRecord<E>,
    ) -> Self {
        ArchiveMetadata {
            dimensions: velocity.len() as u8,
            half_extent: wave.l,
            wave_speed: wave.c,
            amplitude: wave.amplitude,
            radius: wave.radius,
            velocity,
            damping: wave.damping,
            resolution: wave.n,
            t_max: wave.t_max,
            dt: wave.dt,
            dt_sim: record.dt_sim,
            steps: record.steps,
        }
    }
}

impl WaveArchive {
    fn new<E: Dimension>(record: &WaveRecord<E>, metadata: ArchiveMetadata) -> Self {
        WaveArchive {
            format_version: FORMAT_VERSION,
            h: record.frames.clone().into_dyn(),
            x: record.x.clone(),
            t: record.t.clone(),
            metadata,
        }
    }

    pub fn from_line<E: Dimension>(record: &WaveRecord<E>, params: &LineParams) -> Self {
        let metadata = ArchiveMetadata::new(&params.wave, vec![params.velocity], record);
        Self::new(record, metadata)
    }

    pub fn from_plane<E: Dimension>(record: &WaveRecord<E>, params: &PlaneParams) -> Self {
        let velocity = vec![params.velocity.x, params.velocity.y];
        let metadata = ArchiveMetadata::new(&params.wave, velocity, record);
        Self::new(record, metadata)
    }

    pub fn n_frames(&self) -> usize {
        self.h.shape().first().copied().unwrap_or(0)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ArchiveError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let serialized = bincode::serialize(self).map_err(ArchiveError::Encode)?;
        let compressed = zstd::encode_all(&serialized[..], COMPRESSION_LEVEL)
            .map_err(ArchiveError::Compression)?;
        debug!(
            "Archive encoded: {} bytes, {} compressed",
            serialized.len(),
            compressed.len()
        );

        std::fs::write(path, compressed)?;
        info!(
            "Wrote {} frames of shape {:?} to {}",
            self.n_frames(),
            &self.h.shape()[1..],
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let compressed = std::fs::read(path)?;
        let serialized =
            zstd::decode_all(&compressed[..]).map_err(ArchiveError::Compression)?;
        let archive: WaveArchive =
            bincode::deserialize(&serialized).map_err(ArchiveError::Decode)?;
        if archive.format_version != FORMAT_VERSION {
            return Err(ArchiveError::Version {
                found: archive.format_version,
                expected: FORMAT_VERSION,
            });
        }
        if archive.h.ndim() < 2 || archive.t.len() != archive.n_frames() {
            return Err(ArchiveError::Inconsistent {
                frames: archive.n_frames(),
                timestamps: archive.t.len(),
            });
        }
        Ok(archive)
    }
}
