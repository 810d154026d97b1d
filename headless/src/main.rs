use std::path::PathBuf;

use clap::Parser;
use fluidwave_core::WaveSimConfig;

use crate::run::HeadlessRun;

mod init;
mod run;
mod snapshot;

#[derive(Parser, Debug)]
#[command(version, about = "Runs the wave simulation without a window", long_about = None)]
struct Args {
    /// RON configuration file, created with defaults when missing
    #[arg(short, long, default_value = "fluidwave.ron")]
    config: PathBuf,

    /// Number of frames to simulate before exiting
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Target frame rate of the run loop
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Advance time by exactly 1/fps per frame instead of wall-clock time
    #[arg(long)]
    fixed_step: bool,

    /// Reset the field to its initial pulse every N frames
    #[arg(long)]
    reset_every: Option<u64>,

    /// Log field diagnostics every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Write the final field as RON to this path
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Compute per-cell normals and averaged heights
    #[arg(long)]
    normals: bool,
}

fn main() {
    let args = Args::parse();

    if !args.fps.is_finite() || args.fps <= 0.0 || args.fps > 1000.0 {
        eprintln!("Error: fps must be in (0, 1000].");
        eprintln!("Got: {}", args.fps);
        std::process::exit(1);
    }

    if args.frames == 0 || args.report_every == 0 || args.reset_every == Some(0) {
        eprintln!("Error: frames, report-every and reset-every must be at least 1.");
        std::process::exit(1);
    }

    let mut config = match WaveSimConfig::load_or_create(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Could not load {}: {err}", args.config.display());
            std::process::exit(1);
        }
    };
    if args.normals {
        config.compute_normals = true;
    }

    let run = HeadlessRun {
        frames: args.frames,
        reset_every: args.reset_every,
        report_every: args.report_every,
        snapshot: args.snapshot,
    };

    let exit = init::init(config, run, args.fps, args.fixed_step);
    if exit.is_error() {
        std::process::exit(1);
    }
}
