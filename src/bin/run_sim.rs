use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use wavetrack::{
    config::{run::RunParams, setup::SetupConfig},
    dynamics::run,
};

#[derive(Debug, clap::Parser)]
#[command(name = "wavetrack_run", about = "Simulate a scenario and write its archive...")]
pub struct RunCli {
    #[arg(short = 'c', long = "config")]
    pub config: PathBuf,

    // Overrides the scenario's output path.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[arg(long = "dframe-log", default_value_t = 100)]
    pub dframe_log: usize,

    // Print the scenario summary and exit.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = RunCli::parse();

    let setup_config = match SetupConfig::parse(&args.config) {
        Ok(setup_config) => setup_config,
        Err(e) => {
            error!("{}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let run_params = RunParams::new(&setup_config, args.output, args.dframe_log);
    setup_config.print();
    if args.dry_run {
        return ExitCode::SUCCESS;
    }

    info!("Running scenario '{}'", setup_config.name);
    match run(&setup_config, &run_params) {
        Ok(archive) => {
            info!(
                "Done! {} frames, {} steps",
                archive.n_frames(),
                archive.metadata.steps
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
