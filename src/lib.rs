pub mod assets;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export_system;
pub mod rendering_system;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use config::SimulationConfig;
pub use errors::{Result, SimulationError};
pub use simulation::{run, run_with_canvas, SimulationRun};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::drag_model::DragModel;
pub use trajectory_system::parameters::SimulationParameters;
pub use trajectory_system::sample::Sample;
pub use trajectory_system::solver::{solve, Trajectory, TrajectorySolver};

// Re-export commonly used items from rendering_system
pub use rendering_system::canvas::Canvas;
pub use rendering_system::frame::Frame;
pub use rendering_system::renderer::{FrameRenderer, LabelStyle};
pub use rendering_system::text::LabelFont;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used items from export_system
pub use export_system::animation::{AnimationEncoder, GifExporter, GifFileExporter};
