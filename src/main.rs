use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};
use parachute_simulation::{run, AnimationEncoder, DragModel, GifFileExporter, SimulationConfig};
use simple_logger::SimpleLogger;

/// Render a parachutist's fall toward terminal velocity as an animated GIF.
#[derive(Debug, Parser)]
#[command(name = "parachute_sim", version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output GIF path, overrides the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drag model: exponential or quadratic-euler
    #[arg(short, long)]
    model: Option<DragModel>,

    /// Do not draw the velocity label
    #[arg(long)]
    no_label: bool,

    /// Log every telemetry sample
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .env()
        .init()?;

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(model) = cli.model {
        config.physics.model = model;
    }
    if cli.no_label {
        config.render.show_label = false;
    }

    let simulation = run(&config)?;

    info!(
        "Calculated Terminal Velocity: {:.2} m/s",
        simulation.trajectory.terminal_velocity()
    );
    if cli.verbose {
        simulation.telemetry.display_data();
    } else {
        simulation.telemetry.display_summary();
    }

    let mut exporter = GifFileExporter::new(&config.output.path);
    exporter.encode(&simulation.frames, config.output.frame_delay_ms)?;
    info!("Saved {} frames to {}", simulation.frames.len(), config.output.path.display());

    Ok(())
}
