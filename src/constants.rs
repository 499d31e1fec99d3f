// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³

// Jumper Defaults
pub const DEFAULT_MASS: f64 = 80.0; // kg
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_CROSS_SECTIONAL_AREA: f64 = 1.2; // m²

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const SIMULATION_DURATION: f64 = 20.0; // s (200 frames)
pub const MAX_SAMPLES: usize = 10_000;

// Accepted parameter ranges (inclusive)
pub const MASS_RANGE: (f64, f64) = (40.0, 120.0); // kg
pub const GRAVITY_RANGE: (f64, f64) = (5.0, 15.0); // m/s²
pub const DRAG_COEFFICIENT_RANGE: (f64, f64) = (0.5, 2.5);
pub const AIR_DENSITY_RANGE: (f64, f64) = (0.01, 2.0); // kg/m³
pub const AREA_RANGE: (f64, f64) = (0.1, 100.0); // m²
pub const MAX_TIME_STEP: f64 = 1.0; // s
pub const MAX_DURATION: f64 = 600.0; // s

// Rendering
pub const CANVAS_WIDTH: u32 = 300; // px
pub const CANVAS_HEIGHT: u32 = 800; // px
pub const MARKER_SIZE: u32 = 50; // px
pub const LABEL_MARGIN: u32 = 6; // px from the top-left corner
pub const LABEL_FONT_SIZE: f32 = 16.0;

// Export
pub const FRAME_DELAY_MS: u32 = 33; // ~30 fps
pub const DEFAULT_OUTPUT_PATH: &str = "parachute.gif";
