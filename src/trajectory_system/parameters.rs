use crate::constants::{
    AIR_DENSITY_RANGE, AREA_RANGE, DRAG_COEFFICIENT_RANGE, GRAVITY_RANGE, MASS_RANGE,
    MAX_DURATION, MAX_SAMPLES, MAX_TIME_STEP,
};
use crate::errors::{Result, SimulationError};

use super::aerodynamics::Aerodynamics;

/// Tolerance used when dividing the duration into whole time steps, so that
/// `duration == time_step` counts as exactly one step despite rounding.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Validated physical and numerical inputs of one run.
///
/// Fields are private; the only way to obtain a value is [`SimulationParameters::new`],
/// which rejects anything outside the documented ranges before a single
/// sample is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    mass: f64,
    gravity: f64,
    aerodynamics: Aerodynamics,
    air_density: f64,
    time_step: f64,
    duration: f64,
}

impl SimulationParameters {
    pub fn new(
        mass: f64,
        gravity: f64,
        drag_coefficient: f64,
        air_density: f64,
        cross_sectional_area: f64,
        time_step: f64,
        duration: f64,
    ) -> Result<Self> {
        check_range("mass", mass, MASS_RANGE)?;
        check_range("gravity", gravity, GRAVITY_RANGE)?;
        check_range("drag coefficient", drag_coefficient, DRAG_COEFFICIENT_RANGE)?;
        check_range("air density", air_density, AIR_DENSITY_RANGE)?;
        check_range("cross-sectional area", cross_sectional_area, AREA_RANGE)?;
        check_positive_up_to("time step", time_step, MAX_TIME_STEP)?;
        check_positive_up_to("duration", duration, MAX_DURATION)?;

        let params = SimulationParameters {
            mass,
            gravity,
            aerodynamics: Aerodynamics::new(drag_coefficient, cross_sectional_area),
            air_density,
            time_step,
            duration,
        };

        let terminal_velocity = params.terminal_velocity();
        if !terminal_velocity.is_finite() || terminal_velocity <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "terminal velocity is not a positive finite number ({})",
                terminal_velocity
            )));
        }

        if params.step_count() > MAX_SAMPLES {
            return Err(SimulationError::InvalidParameter(format!(
                "duration {} s at time step {} s needs {} samples, limit is {}",
                duration,
                time_step,
                params.step_count(),
                MAX_SAMPLES
            )));
        }

        Ok(params)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.aerodynamics.drag_coefficient
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn cross_sectional_area(&self) -> f64 {
        self.aerodynamics.cross_sectional_area
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn aerodynamics(&self) -> &Aerodynamics {
        &self.aerodynamics
    }

    /// `v_t = sqrt(2·m·g / (Cd·ρ·A))`
    pub fn terminal_velocity(&self) -> f64 {
        self.aerodynamics
            .terminal_velocity(self.mass, self.gravity, self.air_density)
    }

    /// Rate constant of the exponential approach, `k = Cd·ρ·A / (2m)`.
    pub fn decay_rate(&self) -> f64 {
        self.aerodynamics.drag_factor(self.air_density) / self.mass
    }

    /// Number of whole time steps that fit in the duration.
    pub fn step_count(&self) -> usize {
        (self.duration / self.time_step + STEP_COUNT_TOLERANCE).floor() as usize
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    if value < min || value > max {
        return Err(SimulationError::InvalidParameter(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

fn check_positive_up_to(name: &str, value: f64, max: f64) -> Result<()> {
    check_finite(name, value)?;
    if value <= 0.0 || value > max {
        return Err(SimulationError::InvalidParameter(format!(
            "{} must be within (0, {}], got {}",
            name, max, value
        )));
    }
    Ok(())
}
