use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::parameters::SimulationParameters;

/// How velocity evolves under drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragModel {
    /// Closed form `v(t) = v_t·(1 − e^{−k t})` with `k = Cd·ρ·A / (2m)`.
    /// Exact at every sample, no error accumulation.
    #[default]
    Exponential,
    /// Explicit Euler integration of `a = g − ½·ρ·Cd·A·v² / m`. First-order,
    /// so error accumulates with the step size.
    #[serde(alias = "quadratic_euler")]
    QuadraticEuler,
}

impl DragModel {
    pub fn name(&self) -> &'static str {
        match self {
            DragModel::Exponential => "exponential",
            DragModel::QuadraticEuler => "quadratic-euler",
        }
    }
}

impl fmt::Display for DragModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DragModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "exponential" | "exp" => Ok(DragModel::Exponential),
            "quadratic-euler" | "quadratic" | "euler" => Ok(DragModel::QuadraticEuler),
            other => Err(format!(
                "unknown drag model '{}', expected 'exponential' or 'quadratic-euler'",
                other
            )),
        }
    }
}

/// Velocity of the closed-form model at time `t`.
pub fn exponential_velocity(params: &SimulationParameters, t: f64) -> f64 {
    let k = params.decay_rate();
    // 1 − e^{−kt} == −expm1(−kt), accurate for small kt
    let velocity = params.terminal_velocity() * -(-k * t).exp_m1();
    velocity.clamp(0.0, params.terminal_velocity())
}

/// Distance fallen by time `t` in the closed-form model, the integral of
/// [`exponential_velocity`]: `v_t·(t − (1 − e^{−kt}) / k)`.
pub fn exponential_position(params: &SimulationParameters, t: f64) -> f64 {
    let k = params.decay_rate();
    let position = params.terminal_velocity() * (t + (-k * t).exp_m1() / k);
    position.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> SimulationParameters {
        SimulationParameters::new(80.0, 9.81, 1.0, 1.225, 1.2, 0.1, 20.0).unwrap()
    }

    #[test]
    fn test_velocity_starts_at_rest() {
        assert_eq!(exponential_velocity(&params(), 0.0), 0.0);
        assert_eq!(exponential_position(&params(), 0.0), 0.0);
    }

    #[test]
    fn test_velocity_matches_closed_form() {
        let p = params();
        let t = 7.5;
        let expected = p.terminal_velocity() * (1.0 - (-p.decay_rate() * t).exp());
        assert_relative_eq!(exponential_velocity(&p, t), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_position_is_integral_of_velocity() {
        let p = params();
        let t_end = 12.0;
        let steps = 120_000;
        let dt = t_end / steps as f64;

        // Midpoint rule
        let integral: f64 = (0..steps)
            .map(|i| exponential_velocity(&p, (i as f64 + 0.5) * dt) * dt)
            .sum();

        assert_relative_eq!(exponential_position(&p, t_end), integral, epsilon = 1e-6);
    }

    #[test]
    fn test_velocity_approaches_terminal() {
        let p = params();
        let late = exponential_velocity(&p, 10_000.0);
        assert!(late <= p.terminal_velocity());
        assert_relative_eq!(late, p.terminal_velocity(), epsilon = 1e-6);
    }

    #[test]
    fn test_parse_model_names() {
        assert_eq!("exponential".parse::<DragModel>(), Ok(DragModel::Exponential));
        assert_eq!(
            "quadratic-euler".parse::<DragModel>(),
            Ok(DragModel::QuadraticEuler)
        );
        assert_eq!(
            "Quadratic_Euler".parse::<DragModel>(),
            Ok(DragModel::QuadraticEuler)
        );
        assert!("linear".parse::<DragModel>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for model in [DragModel::Exponential, DragModel::QuadraticEuler] {
            assert_eq!(model.to_string().parse::<DragModel>(), Ok(model));
        }
    }
}
