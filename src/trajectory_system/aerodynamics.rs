#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub cross_sectional_area: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, cross_sectional_area: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            cross_sectional_area,
        }
    }

    /// Drag force opposing a fall at `speed`, always non-negative.
    pub fn calculate_drag(&self, speed: f64, air_density: f64) -> f64 {
        let dynamic_pressure = self.calculate_dynamic_pressure(speed, air_density);
        dynamic_pressure * self.cross_sectional_area * self.drag_coefficient
    }

    /// `½·ρ·Cd·A`, the factor in front of `v²` in the quadratic drag law.
    pub fn drag_factor(&self, air_density: f64) -> f64 {
        0.5 * air_density * self.drag_coefficient * self.cross_sectional_area
    }

    /// Speed at which drag balances weight.
    pub fn terminal_velocity(&self, mass: f64, gravity: f64, air_density: f64) -> f64 {
        (2.0 * mass * gravity / (self.drag_coefficient * air_density * self.cross_sectional_area))
            .sqrt()
    }

    fn calculate_dynamic_pressure(&self, speed: f64, air_density: f64) -> f64 {
        0.5 * air_density * speed.powi(2)
    }
}
