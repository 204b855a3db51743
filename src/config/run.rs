use std::path::PathBuf;

use super::setup::SetupConfig;

pub struct RunParams {
    pub output: PathBuf,
    // Log progress every this many recorded frames. Zero disables it.
    pub dframe_log: usize,
}

impl RunParams {
    pub fn new(setup_config: &SetupConfig, output: Option<PathBuf>, dframe_log: usize) -> Self {
        RunParams {
            output: output.unwrap_or_else(|| setup_config.output_path()),
            dframe_log,
        }
    }
}
