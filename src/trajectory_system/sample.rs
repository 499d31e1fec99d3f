/// One point of a solved trajectory. Position grows in the direction of the
/// fall, so both position and velocity are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}

impl Sample {
    pub fn new(time: f64, position: f64, velocity: f64) -> Self {
        Sample {
            time,
            position,
            velocity,
        }
    }

    pub fn initial() -> Self {
        Sample::new(0.0, 0.0, 0.0)
    }

    /// Share of terminal velocity reached, in `[0, 1]`.
    pub fn terminal_fraction(&self, terminal_velocity: f64) -> f64 {
        if terminal_velocity > 0.0 {
            (self.velocity / terminal_velocity).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
