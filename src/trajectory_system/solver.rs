use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::errors::{Result, SimulationError};

use super::{
    drag_model::{exponential_position, exponential_velocity, DragModel},
    kinematics::Kinematics,
    parameters::SimulationParameters,
    sample::Sample,
};

/// Produces the sample sequence of one run. Holds no mutable state, so
/// [`TrajectorySolver::samples`] can be called any number of times and always
/// yields the same sequence.
#[derive(Debug, Clone)]
pub struct TrajectorySolver {
    params: SimulationParameters,
    model: DragModel,
}

impl TrajectorySolver {
    /// Fails with `EmptyFrameSequence` when not even one step fits in the
    /// duration.
    pub fn new(params: SimulationParameters, model: DragModel) -> Result<Self> {
        if params.step_count() == 0 {
            return Err(SimulationError::EmptyFrameSequence(format!(
                "duration {} s is shorter than one time step of {} s",
                params.duration(),
                params.time_step()
            )));
        }

        Ok(TrajectorySolver { params, model })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn model(&self) -> DragModel {
        self.model
    }

    /// Lazy iterator over the samples, starting at rest at `t = 0`.
    pub fn samples(&self) -> SampleIter {
        SampleIter::new(self.params, self.model)
    }

    pub fn solve(&self) -> Result<Trajectory> {
        let samples: Vec<Sample> = self.samples().collect();
        debug!(
            "Solved {} samples with {} model, terminal velocity {:.2} m/s",
            samples.len(),
            self.model,
            self.params.terminal_velocity()
        );
        Ok(self.trajectory(samples))
    }

    /// Same as [`TrajectorySolver::solve`], checking `cancel` before every sample.
    pub fn solve_cancellable(&self, cancel: &AtomicBool) -> Result<Trajectory> {
        self.solve_observed(cancel, |_| {})
    }

    /// Like [`TrajectorySolver::solve_cancellable`], handing each sample to
    /// `on_sample` as soon as it is produced. The observer may set `cancel`;
    /// the run then stops before the next sample.
    pub fn solve_observed<F>(&self, cancel: &AtomicBool, mut on_sample: F) -> Result<Trajectory>
    where
        F: FnMut(&Sample),
    {
        let mut iter = self.samples();
        let mut samples = Vec::with_capacity(iter.len());

        loop {
            if cancel.load(Ordering::Relaxed) {
                debug!("Solver cancelled after {} samples", samples.len());
                return Err(SimulationError::Cancelled(samples.len()));
            }
            match iter.next() {
                Some(sample) => {
                    on_sample(&sample);
                    samples.push(sample);
                }
                None => break,
            }
        }

        Ok(self.trajectory(samples))
    }

    fn trajectory(&self, samples: Vec<Sample>) -> Trajectory {
        Trajectory {
            samples,
            terminal_velocity: self.params.terminal_velocity(),
            model: self.model,
        }
    }
}

/// Convenience wrapper around [`TrajectorySolver`].
pub fn solve(params: &SimulationParameters, model: DragModel) -> Result<Trajectory> {
    TrajectorySolver::new(*params, model)?.solve()
}

#[derive(Debug, Clone)]
pub struct SampleIter {
    params: SimulationParameters,
    model: DragModel,
    index: usize,
    steps: usize,
    kinematics: Kinematics,
    last_position: f64,
}

impl SampleIter {
    fn new(params: SimulationParameters, model: DragModel) -> Self {
        SampleIter {
            params,
            model,
            index: 0,
            steps: params.step_count(),
            kinematics: Kinematics::new(),
            last_position: 0.0,
        }
    }

    fn compute(&mut self, time: f64) -> Sample {
        match self.model {
            DragModel::Exponential => Sample::new(
                time,
                exponential_position(&self.params, time),
                exponential_velocity(&self.params, time),
            ),
            DragModel::QuadraticEuler => {
                if self.index > 0 {
                    self.kinematics.update(
                        self.params.time_step(),
                        self.params.mass(),
                        self.params.gravity(),
                        self.params.air_density(),
                        self.params.aerodynamics(),
                    );
                }
                self.kinematics.to_sample(time)
            }
        }
    }
}

impl Iterator for SampleIter {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index > self.steps {
            return None;
        }

        // Multiplying instead of accumulating keeps times exact and strictly increasing.
        let time = self.index as f64 * self.params.time_step();
        let mut sample = self.compute(time);

        sample.velocity = sample.velocity.clamp(0.0, self.params.terminal_velocity());
        sample.position = sample.position.max(self.last_position);
        self.last_position = sample.position;
        self.index += 1;

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleIter {}

/// A solved, non-empty sample sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    terminal_velocity: f64,
    model: DragModel,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn terminal_velocity(&self) -> f64 {
        self.terminal_velocity
    }

    pub fn model(&self) -> DragModel {
        self.model
    }

    pub fn final_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Distance fallen by the last sample; the natural full-scale value for
    /// rendering.
    pub fn max_position(&self) -> f64 {
        self.final_sample().map_or(0.0, |sample| sample.position)
    }

    /// First sample whose velocity reaches `fraction` of terminal velocity.
    pub fn time_to_fraction(&self, fraction: f64) -> Option<f64> {
        self.samples
            .iter()
            .find(|sample| sample.velocity >= fraction * self.terminal_velocity)
            .map(|sample| sample.time)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
