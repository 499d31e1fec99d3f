use log::info;

use crate::assets::build_canvas;
use crate::config::SimulationConfig;
use crate::errors::Result;
use crate::rendering_system::{canvas::Canvas, frame::Frame, renderer::FrameRenderer};
use crate::telemetry_system::telemetry::Telemetry;
use crate::trajectory_system::solver::{Trajectory, TrajectorySolver};

/// Everything a run produces before encoding.
pub struct SimulationRun {
    pub trajectory: Trajectory,
    pub telemetry: Telemetry,
    pub frames: Vec<Frame>,
}

/// Solves the configured fall and renders one frame per sample on `canvas`.
pub fn run_with_canvas(config: &SimulationConfig, canvas: &Canvas) -> Result<SimulationRun> {
    let params = config.to_parameters()?;
    let solver = TrajectorySolver::new(params, config.physics.model)?;

    info!(
        "Simulating {:.1} s fall at {} s steps, {} model",
        params.duration(),
        params.time_step(),
        solver.model()
    );
    let trajectory = solver.solve()?;

    let mut telemetry = Telemetry::new(trajectory.terminal_velocity());
    telemetry.collect_all(&trajectory);

    let renderer = if config.render.show_label {
        FrameRenderer::new()?
    } else {
        FrameRenderer::without_label()
    };
    let max_position = config
        .render
        .max_position
        .unwrap_or_else(|| trajectory.max_position());
    let frames = renderer.render_all(&trajectory, canvas, max_position)?;
    info!("Rendered {} frames", frames.len());

    Ok(SimulationRun {
        trajectory,
        telemetry,
        frames,
    })
}

/// [`run_with_canvas`] with assets taken from the configuration.
pub fn run(config: &SimulationConfig) -> Result<SimulationRun> {
    let canvas = build_canvas(
        config.render.background.as_deref(),
        config.render.marker.as_deref(),
        config.canvas_size(),
        config.marker_size(),
    )?;
    run_with_canvas(config, &canvas)
}
