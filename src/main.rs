//! Demo application: run the pose estimator over recorded landmark frames.
//!
//! Reads JSON-lines input where each line is one detector frame, a mapping
//! from part name to `{x, y, score}`, and prints the estimated pose per
//! frame.

use anyhow::{Context, Result};
use clap::Parser;
use face_pose::config::Config;
use face_pose::estimator::{PoseEstimator, UpdateOutcome};
use face_pose::landmarks::Pose;
use log::{info, warn};
use std::io::BufRead;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines file of landmark frames
    input: String,

    /// Image width in pixels
    #[arg(long, default_value = "768")]
    width: f64,

    /// Image height in pixels
    #[arg(long, default_value = "1024")]
    height: f64,

    /// Use the scale-only depth fallback instead of the P3P solve
    #[arg(long)]
    fallback: bool,

    /// Disable temporal smoothing
    #[arg(long)]
    no_filter: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face pose estimation demo");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        Config::from_file(config_path)
            .with_context(|| format!("failed to load config from {config_path}"))?
    } else {
        Config::default()
    };
    if args.fallback {
        config.estimator.use_p3p = false;
    }
    if args.no_filter {
        config.estimator.use_kalman_filter = false;
    }

    let mut estimator = PoseEstimator::from_config(&config)?;
    estimator.set_resolution(args.width, args.height)?;

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input))?;
    let reader = std::io::BufReader::new(file);

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let pose: Pose = serde_json::from_str(&line)
            .with_context(|| format!("bad frame on line {}", number + 1))?;

        match estimator.update(&pose) {
            Ok(UpdateOutcome::Updated) => {
                if estimator.options().use_p3p {
                    let p = estimator.position();
                    let q = estimator.orientation_quaternion();
                    println!(
                        "frame {:>4}: position ({:+.4}, {:+.4}, {:+.4}) m, \
                         orientation ({:+.4}, {:+.4}, {:+.4}, {:+.4})",
                        number + 1,
                        p.x,
                        p.y,
                        p.z,
                        q.w,
                        q.i,
                        q.j,
                        q.k
                    );
                } else {
                    println!("frame {:>4}: depth {:.4} m", number + 1, estimator.depth());
                }
            }
            Ok(outcome) => {
                println!("frame {:>4}: {:?}", number + 1, outcome);
            }
            Err(e) => {
                // Degenerate geometry holds the prior pose; keep going
                warn!("frame {}: {e}", number + 1);
            }
        }
    }

    Ok(())
}
