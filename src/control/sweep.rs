use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimulationConfig;
use crate::constants::{SWEEP_END_TEMPERATURE, SWEEP_START_TEMPERATURE, SWEEP_TEMPERATURE_STEP};
use crate::control::ascent::simulate_ascent;
use crate::errors::SimulationError;

/// Half-open range of ground temperatures, `start` included, `end` excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64, // °C
    pub end: f64,   // °C
    pub step: f64,  // °C
}

impl Default for SweepRange {
    fn default() -> Self {
        SweepRange {
            start: SWEEP_START_TEMPERATURE,
            end: SWEEP_END_TEMPERATURE,
            step: SWEEP_TEMPERATURE_STEP,
        }
    }
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, SimulationError> {
        let range = SweepRange { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(SimulationError::SweepError(
                "sweep bounds and step must be finite".to_string(),
            ));
        }
        if self.step <= 0.0 {
            return Err(SimulationError::SweepError(format!(
                "sweep step must be positive, got {}",
                self.step
            )));
        }
        if self.end <= self.start {
            return Err(SimulationError::SweepError(format!(
                "sweep end {} must be above start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        if self.end <= self.start || self.step <= 0.0 {
            return 0;
        }
        ((self.end - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn temperatures(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    pub ground_temperature: f64, // °C
    pub peak_altitude: f64,      // m
}

/// Ceilings in the order the ground temperatures were swept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    pub samples: Vec<SweepSample>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SweepSample> {
        self.samples.iter()
    }

    /// Sample with the highest ceiling; the earliest one wins a tie.
    pub fn ceiling(&self) -> Option<SweepSample> {
        self.samples.iter().copied().fold(None, |best, sample| match best {
            Some(best) if best.peak_altitude >= sample.peak_altitude => Some(best),
            _ => Some(sample),
        })
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.ground_temperature).collect()
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.peak_altitude).collect()
    }
}

pub fn run_sweep(range: &SweepRange, config: &SimulationConfig) -> SweepResult {
    info!(start = range.start, end = range.end, step = range.step, "running sweep");
    let samples = range
        .temperatures()
        .into_iter()
        .map(|ground_temperature| SweepSample {
            ground_temperature,
            peak_altitude: simulate_ascent(ground_temperature, config),
        })
        .collect();
    SweepResult { samples }
}

/// Same as [`run_sweep`], spreading the runs over rayon's thread pool.
pub fn run_sweep_parallel(range: &SweepRange, config: &SimulationConfig) -> SweepResult {
    info!(
        start = range.start,
        end = range.end,
        step = range.step,
        threads = rayon::current_num_threads(),
        "running parallel sweep"
    );
    let samples = range
        .temperatures()
        .into_par_iter()
        .map(|ground_temperature| SweepSample {
            ground_temperature,
            peak_altitude: simulate_ascent(ground_temperature, config),
        })
        .collect();
    SweepResult { samples }
}
