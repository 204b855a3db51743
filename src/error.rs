use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("grid resolution must be at least 3 points per axis, got {0}")]
    Resolution(usize),

    #[error("damping must lie in (0, 1], got {0}")]
    Damping(f64),

    #[error("source radius must be non-negative, got {0}")]
    Radius(f64),

    #[error("initial field has shape {found:?}, grid is {expected:?}")]
    Shape {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("{n_frames} frames of {n}^{dimensions} points do not fit in memory")]
    TooLarge {
        n_frames: f64,
        n: usize,
        dimensions: u32,
    },
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode archive: {0}")]
    Encode(bincode::Error),

    #[error("could not decode archive: {0}")]
    Decode(bincode::Error),

    #[error("archive compression failed: {0}")]
    Compression(std::io::Error),

    #[error("unsupported archive format version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("archive holds {frames} frames but {timestamps} timestamps")]
    Inconsistent { frames: usize, timestamps: usize },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not open particle file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read particle file: {0}")]
    Csv(#[from] csv::Error),

    #[error("particle file has no header row")]
    MissingHeader,

    #[error("particle file is missing required column '{0}'")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid placement: {0}")]
    Config(#[from] ConfigError),

    #[error("placed only {placed} of {requested} particles within {attempts} attempts")]
    Exhausted {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("could not write particle file: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not write particle file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
