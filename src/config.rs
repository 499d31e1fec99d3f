//! Run configuration read from TOML.
//!
//! Every key is optional; missing keys take the values of the original
//! parachute demo.
//!
//! ```toml
//! [physics]
//! mass = 80.0
//! drag_coefficient = 1.0
//! model = "quadratic-euler"
//!
//! [render]
//! show_label = false
//!
//! [output]
//! path = "fall.gif"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_CROSS_SECTIONAL_AREA,
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_MASS, DEFAULT_OUTPUT_PATH, FRAME_DELAY_MS, GRAVITY,
    MARKER_SIZE, SIMULATION_DURATION, TIME_STEP,
};
use crate::errors::{Result, SimulationError};
use crate::trajectory_system::{drag_model::DragModel, parameters::SimulationParameters};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub mass: f64,
    pub gravity: f64,
    pub drag_coefficient: f64,
    pub air_density: f64,
    pub cross_sectional_area: f64,
    pub time_step: f64,
    pub duration: f64,
    pub model: DragModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            mass: DEFAULT_MASS,
            gravity: GRAVITY,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            air_density: AIR_DENSITY_SEA_LEVEL,
            cross_sectional_area: DEFAULT_CROSS_SECTIONAL_AREA,
            time_step: TIME_STEP,
            duration: SIMULATION_DURATION,
            model: DragModel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub marker_width: u32,
    pub marker_height: u32,
    pub show_label: bool,
    /// Distance in metres mapped to the bottom of the canvas. Defaults to the
    /// distance fallen by the last sample.
    pub max_position: Option<f64>,
    pub background: Option<PathBuf>,
    pub marker: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            marker_width: MARKER_SIZE,
            marker_height: MARKER_SIZE,
            show_label: true,
            max_position: None,
            background: None,
            marker: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub frame_delay_ms: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            frame_delay_ms: FRAME_DELAY_MS,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SimulationError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SimulationError::ConfigError(e.to_string()))
    }

    pub fn to_parameters(&self) -> Result<SimulationParameters> {
        let physics = &self.physics;
        SimulationParameters::new(
            physics.mass,
            physics.gravity,
            physics.drag_coefficient,
            physics.air_density,
            physics.cross_sectional_area,
            physics.time_step,
            physics.duration,
        )
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.render.canvas_width, self.render.canvas_height)
    }

    pub fn marker_size(&self) -> (u32, u32) {
        (self.render.marker_width, self.render.marker_height)
    }
}
