use super::{aerodynamics::Aerodynamics, sample::Sample};

/// State of the falling body for the stepwise model. Position grows in the
/// direction of the fall.
#[derive(Debug, Clone, Default)]
pub struct Kinematics {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Kinematics {
    pub fn new() -> Self {
        Kinematics::default()
    }

    /// Advances one explicit Euler step. Velocity is updated first and the
    /// new velocity is used for the position update.
    pub fn update(
        &mut self,
        delta_time: f64,
        mass: f64,
        gravity: f64,
        air_density: f64,
        aerodynamics: &Aerodynamics,
    ) {
        let terminal_velocity = aerodynamics.terminal_velocity(mass, gravity, air_density);

        self.acceleration =
            self.calculate_acceleration(self.velocity, mass, gravity, air_density, aerodynamics);

        // Large steps overshoot and oscillate around v_t; v_t is a fixed point
        // of the update so clamping to it is exact.
        self.velocity =
            (self.velocity + self.acceleration * delta_time).clamp(0.0, terminal_velocity);
        self.position += self.velocity * delta_time;
    }

    fn calculate_acceleration(
        &self,
        velocity: f64,
        mass: f64,
        gravity: f64,
        air_density: f64,
        aerodynamics: &Aerodynamics,
    ) -> f64 {
        let drag = aerodynamics.calculate_drag(velocity, air_density);
        gravity - drag / mass
    }

    pub fn to_sample(&self, time: f64) -> Sample {
        Sample::new(time, self.position, self.velocity)
    }
}
