use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use wavetrack::particles::placement::{
    place_particles, save_particles, ExclusionDisc, PlacementConfig,
};

#[derive(Debug, clap::Parser)]
#[command(name = "wavetrack_place", about = "Place particles by rejection sampling...")]
pub struct PlaceCli {
    #[arg(short = 'n', long = "count")]
    pub count: usize,

    #[arg(long = "lx", default_value_t = 1.0)]
    pub lx: f64,

    #[arg(long = "ly", default_value_t = 1.0)]
    pub ly: f64,

    #[arg(short = 's', long = "min-separation", default_value_t = 0.0)]
    pub min_separation: f64,

    // Radius of a disc around the origin to keep clear.
    #[arg(long = "hole", default_value_t = 0.0)]
    pub hole: f64,

    #[arg(long = "max-attempts", default_value_t = 1_000_000)]
    pub max_attempts: usize,

    #[arg(long = "seed")]
    pub seed: Option<u64>,

    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = PlaceCli::parse();

    let config = PlacementConfig {
        count: args.count,
        l: Vector2::new(args.lx, args.ly),
        min_separation: args.min_separation,
        exclusions: if args.hole > 0.0 {
            vec![ExclusionDisc {
                centre: Point2::origin(),
                radius: args.hole,
            }]
        } else {
            vec![]
        },
        max_attempts: args.max_attempts,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Placing {} particles with seed {}", config.count, seed);
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    let result =
        place_particles(&mut rng, &config).and_then(|points| save_particles(&args.output, &points));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
