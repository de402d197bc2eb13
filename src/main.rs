//! Knife Flip entry point
//!
//! Runs a headless course: loads tuning, drives the sandbox at a fixed frame
//! rate and prints the run summary as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use knife_flip::Tuning;
use knife_flip::sandbox::Sandbox;

/// Headless knife-throw run
#[derive(Debug, Parser)]
#[command(name = "knife-flip", version, about)]
struct Args {
    /// Tuning file (JSON); defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Override the course seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many simulation ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Override the auto-launch delay after landing (seconds)
    #[arg(long)]
    tap_delay: Option<f32>,

    /// Render frame rate driving the fixed-step accumulator
    #[arg(long, default_value_t = 60.0)]
    frame_rate: f32,

    /// Print the effective tuning and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn load_tuning(args: &Args) -> Result<Tuning, knife_flip::TuningError> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Some(seed) = args.seed {
        tuning.course.seed = seed;
    }
    if let Some(delay) = args.tap_delay {
        tuning.world.tap_delay_seconds = delay;
    }
    tuning.validated()
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let tuning = match load_tuning(&args) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.dump_tuning {
        return match tuning.to_json() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    log::info!("Knife Flip (headless) starting, seed {}", tuning.course.seed);

    let mut sandbox = Sandbox::new(&tuning);
    let frame_dt = 1.0 / args.frame_rate.max(1.0);
    while !sandbox.is_over() && sandbox.ticks() < args.max_ticks {
        sandbox.update(frame_dt);
    }

    let summary = sandbox.session.summary(sandbox.ticks());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
