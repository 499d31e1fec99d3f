use log::info;

use crate::trajectory_system::sample::Sample;

/// Share of terminal velocity that counts as "reached" in the summary.
pub const TERMINAL_REACHED_FRACTION: f64 = 0.95;

pub struct Telemetry {
    pub log: Vec<String>,
    terminal_velocity: f64,
    max_velocity: f64,
    max_acceleration: f64,
    final_position: f64,
    simulation_time: f64,
    terminal_reached_at: Option<f64>,
    previous: Option<Sample>,
}

impl Telemetry {
    pub fn new(terminal_velocity: f64) -> Self {
        Telemetry {
            log: Vec::new(),
            terminal_velocity,
            max_velocity: 0.0,
            max_acceleration: 0.0,
            final_position: 0.0,
            simulation_time: 0.0,
            terminal_reached_at: None,
            previous: None,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_distance(distance: f64) -> String {
        if distance >= 1000.0 {
            format!("{:.2} km", distance / 1000.0)
        } else {
            format!("{:.2} m", distance)
        }
    }

    pub fn collect_data(&mut self, sample: &Sample) {
        self.simulation_time = sample.time;
        self.final_position = sample.position;

        let acceleration = match self.previous {
            Some(previous) if sample.time > previous.time => {
                (sample.velocity - previous.velocity) / (sample.time - previous.time)
            }
            _ => 0.0,
        };

        if sample.velocity > self.max_velocity {
            self.max_velocity = sample.velocity;
        }
        if acceleration.abs() > self.max_acceleration {
            self.max_acceleration = acceleration.abs();
        }
        if self.terminal_reached_at.is_none()
            && sample.velocity >= TERMINAL_REACHED_FRACTION * self.terminal_velocity
        {
            self.terminal_reached_at = Some(sample.time);
        }

        let data = format!(
            "Time: {} | Fallen: {} | Velocity: {:.2} m/s ({:.1}% of terminal) | Acceleration: {:.2} m/s²",
            Self::format_time(sample.time),
            Self::format_distance(sample.position),
            sample.velocity,
            sample.terminal_fraction(self.terminal_velocity) * 100.0,
            acceleration
        );
        self.log.push(data);
        self.previous = Some(*sample);
    }

    pub fn collect_all<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        for sample in samples {
            self.collect_data(sample);
        }
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn final_position(&self) -> f64 {
        self.final_position
    }

    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    pub fn terminal_reached_at(&self) -> Option<f64> {
        self.terminal_reached_at
    }

    pub fn summary(&self) -> Vec<String> {
        let reached = match self.terminal_reached_at {
            Some(time) => Self::format_time(time),
            None => "not reached".to_string(),
        };

        vec![
            format!("Terminal Velocity: {:.2} m/s", self.terminal_velocity),
            format!("Max Velocity: {:.2} m/s", self.max_velocity),
            format!("Max Acceleration: {:.2} m/s²", self.max_acceleration),
            format!("Distance Fallen: {}", Self::format_distance(self.final_position)),
            format!("Simulated Time: {}", Self::format_time(self.simulation_time)),
            format!(
                "{:.0}% of Terminal Velocity: {}",
                TERMINAL_REACHED_FRACTION * 100.0,
                reached
            ),
        ]
    }

    pub fn display_data(&self) {
        info!("--- Telemetry Data ---");
        for entry in &self.log {
            info!("{}", entry);
        }
        info!("--- End of Telemetry ---");
        self.display_summary();
    }

    pub fn display_summary(&self) {
        info!("--- Simulation Summary ---");
        for line in self.summary() {
            info!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_time() {
        assert_eq!(Telemetry::format_time(12.5), "12.50s");
        assert_eq!(Telemetry::format_time(62.5), "1m 2.50s");
        assert_eq!(Telemetry::format_time(3725.0), "1h 2m 5.00s");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(Telemetry::format_distance(950.0), "950.00 m");
        assert_eq!(Telemetry::format_distance(1500.0), "1.50 km");
    }

    #[test]
    fn test_collect_tracks_extremes() {
        let mut telemetry = Telemetry::new(10.0);
        telemetry.collect_all(&[
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(1.0, 4.0, 8.0),
            Sample::new(2.0, 13.5, 9.6),
            Sample::new(3.0, 23.4, 9.9),
        ]);

        assert_relative_eq!(telemetry.max_velocity(), 9.9, epsilon = 1e-12);
        assert_relative_eq!(telemetry.max_acceleration(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(telemetry.final_position(), 23.4, epsilon = 1e-12);
        assert_relative_eq!(telemetry.simulation_time(), 3.0, epsilon = 1e-12);
        assert_eq!(telemetry.terminal_reached_at(), Some(2.0));
        assert_eq!(telemetry.log.len(), 4);
    }

    #[test]
    fn test_summary_reports_unreached_terminal() {
        let mut telemetry = Telemetry::new(50.0);
        telemetry.collect_data(&Sample::new(0.0, 0.0, 0.0));
        telemetry.collect_data(&Sample::new(0.5, 1.0, 4.0));

        let summary = telemetry.summary();

        assert!(summary.iter().any(|line| line == "95% of Terminal Velocity: not reached"));
        assert!(summary.iter().any(|line| line == "Terminal Velocity: 50.00 m/s"));
    }

    #[test]
    fn test_log_entry_contents() {
        let mut telemetry = Telemetry::new(20.0);
        telemetry.collect_data(&Sample::new(1.5, 12.0, 10.0));

        assert_eq!(
            telemetry.log[0],
            "Time: 1.50s | Fallen: 12.00 m | Velocity: 10.00 m/s (50.0% of terminal) | Acceleration: 0.00 m/s²"
        );
    }
}
