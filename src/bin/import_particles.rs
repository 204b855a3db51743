use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use wavetrack::particles::import::import_csv;

#[derive(Debug, clap::Parser)]
#[command(name = "wavetrack_import", about = "Summarise a particle-state CSV export...")]
pub struct ImportCli {
    pub path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = ImportCli::parse();

    let frames = match import_csv(&args.path) {
        Ok(frames) => frames,
        Err(e) => {
            error!("{}: {}", args.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} frames in {}", frames.len(), args.path.display());
    println!("        t  particles  surface     mass");
    for frame in &frames {
        let n_surface = frame.surface.iter().filter(|&&s| s).count();
        println!(
            "{:>9.4} {:>10} {:>8} {:>8.4}",
            frame.time,
            frame.len(),
            n_surface,
            frame.mass
        );
    }
    ExitCode::SUCCESS
}
