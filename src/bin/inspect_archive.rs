use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use ndarray::Axis;
use wavetrack::archive::WaveArchive;

#[derive(Debug, clap::Parser)]
#[command(name = "wavetrack_inspect", about = "Summarise a simulation archive...")]
pub struct InspectCli {
    pub path: PathBuf,

    // Print the metadata as JSON instead of the summary.
    #[arg(long = "json")]
    pub json: bool,

    // Show every n-th frame in the summary.
    #[arg(short = 'e', long = "every", default_value_t = 10)]
    pub every: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = InspectCli::parse();

    let archive = match WaveArchive::load(&args.path) {
        Ok(archive) => archive,
        Err(e) => {
            error!("{}: {}", args.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&archive.metadata) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let meta = &archive.metadata;
    println!(
        "\
Archive: {path} (format {version})
  Dimensions: {dims}D, frames of shape {shape:?}
  Frames: {n_frames}, t = {t0}..{t1}
  Domain half extent: {l}, {n} points, x = {x0}..{x1}
  Wave speed: {c}, damping: {damping}
  Source amplitude: {amplitude}, radius: {radius}, velocity: {velocity:?}
  Simulation: {steps} steps of dt_sim = {dt_sim} (output dt = {dt})",
        path = args.path.display(),
        version = archive.format_version,
        dims = meta.dimensions,
        shape = &archive.h.shape()[1..],
        n_frames = archive.n_frames(),
        t0 = archive.t.iter().next().copied().unwrap_or(0.0),
        t1 = archive.t.iter().next_back().copied().unwrap_or(0.0),
        l = meta.half_extent,
        n = meta.resolution,
        x0 = archive.x.iter().next().copied().unwrap_or(0.0),
        x1 = archive.x.iter().next_back().copied().unwrap_or(0.0),
        c = meta.wave_speed,
        damping = meta.damping,
        amplitude = meta.amplitude,
        radius = meta.radius,
        velocity = meta.velocity,
        steps = meta.steps,
        dt_sim = meta.dt_sim,
        dt = meta.dt,
    );

    let every = args.every.max(1);
    println!("\n  frame        t       peak |h|");
    let frames = archive.h.axis_iter(Axis(0)).zip(archive.t.iter());
    for (k, (frame, t)) in frames.enumerate().step_by(every) {
        let peak = frame.iter().fold(0.0_f64, |m, h| m.max(h.abs()));
        println!("  {:>5} {:>8.3} {:>14.6}", k, t, peak);
    }
    ExitCode::SUCCESS
}
