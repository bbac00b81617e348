// SPDX-License-Identifier: MIT OR Apache-2.0
//! `MatrixMotion` - linear transformation demonstration driver
//!
//! Builds the animation timeline for a 2×2 matrix, plays it back at a fixed
//! tick rate and prints every frame:
//! - Scale and shear animations of single entries
//! - Sine, cosine and full rotations with symbolic labels
//! - Manual field edits applied after playback
//!
//! ## Configuration
//!
//! Settings come from an optional RON file (`--config`) and are overridden by
//! command line flags. `--write-config` writes the effective settings back out.

mod config;
mod error;
mod mesh;
mod runner;

use clap::Parser;
use config::DemoConfig;
use error::AppError;
use matrixmotion_timeline::{build_timeline, MatrixEngine};
use runner::{FieldEdit, OutputFormat, Runner};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "matrixmotion", version, about = "Animate a 2x2 matrix and print every frame")]
struct Cli {
    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated frames per second
    #[arg(long)]
    tick_rate: Option<f32>,

    /// Playback speed multiplier
    #[arg(long)]
    speed: Option<f32>,

    /// Frame output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the built timeline as RON instead of playing it
    #[arg(long)]
    dump: bool,

    /// Manual edit applied after playback, e.g. `x0=1.5`
    #[arg(long = "edit", value_name = "FIELD=TEXT")]
    edits: Vec<FieldEdit>,

    /// Write the effective configuration to this file
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("matrixmotion_app=info,matrixmotion_timeline=info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MatrixMotion v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("MatrixMotion failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate = tick_rate;
    }
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }
    config.validate().map_err(AppError::Config)?;

    if let Some(path) = &cli.write_config {
        config.save(path)?;
    }

    let timeline = build_timeline(&config.operations())?;
    tracing::info!(
        duration = timeline.duration(),
        intervals = timeline.intervals().len(),
        "timeline built"
    );

    let mut engine = MatrixEngine::new(timeline, config.interval_consumption);
    engine.set_speed(config.speed);

    let stdout = std::io::stdout();
    let mut runner = Runner::new(
        engine,
        config.points.clone(),
        config.tick_interval(),
        cli.format,
        stdout.lock(),
    );

    if cli.dump {
        return runner.dump();
    }

    runner.play()?;
    if !cli.edits.is_empty() {
        runner.apply_edits(&cli.edits)?;
    }
    Ok(())
}
