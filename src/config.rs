use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SIMULATION_TIME, TIME_STEP};
use crate::control::balloon::BalloonSpec;
use crate::control::environment::PhysicalConstants;
use crate::control::thermal::ThermalProfile;
use crate::errors::SimulationError;

/// Everything one ascent run needs besides the ground temperature.
///
/// Loaded from TOML, every table and field is optional and falls back to
/// the built-in balloon:
///
/// ```toml
/// time_step = 0.1
///
/// [thermal]
/// initial_temperature_c = 80.0
///
/// [balloon]
/// mass = 0.3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub constants: PhysicalConstants,
    pub balloon: BalloonSpec,
    pub thermal: ThermalProfile,
    pub time_step: f64,    // s
    pub max_sim_time: f64, // s
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            constants: PhysicalConstants::default(),
            balloon: BalloonSpec::default(),
            thermal: ThermalProfile::default(),
            time_step: TIME_STEP,
            max_sim_time: MAX_SIMULATION_TIME,
        }
    }
}

impl SimulationConfig {
    pub fn new(
        constants: PhysicalConstants,
        balloon: BalloonSpec,
        thermal: ThermalProfile,
    ) -> Result<Self, SimulationError> {
        let config = SimulationConfig {
            constants,
            balloon,
            thermal,
            ..SimulationConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_thermal(mut self, thermal: ThermalProfile) -> Self {
        self.thermal = thermal;
        self
    }

    pub fn with_timing(
        mut self,
        time_step: f64,
        max_sim_time: f64,
    ) -> Result<Self, SimulationError> {
        self.time_step = time_step;
        self.max_sim_time = max_sim_time;
        self.validate()?;
        Ok(self)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, SimulationError> {
        let mut config: SimulationConfig = toml::from_str(toml)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Weight is derived, so it follows whatever mass and gravity were loaded.
    pub fn normalize(&mut self) {
        self.balloon.weight = self.balloon.mass * self.constants.gravity;
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.constants.validate()?;
        self.balloon.validate()?;
        self.thermal.validate()?;

        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "time_step must be finite and positive, got {}",
                self.time_step
            )));
        }
        if !(self.max_sim_time.is_finite() && self.max_sim_time > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "max_sim_time must be finite and positive, got {}",
                self.max_sim_time
            )));
        }
        Ok(())
    }

    /// Number of integration steps the time budget allows. Zero when the
    /// timing fields are not finite and positive.
    pub fn max_steps(&self) -> usize {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !(valid(self.time_step) && valid(self.max_sim_time)) {
            return 0;
        }
        let steps = (self.max_sim_time / self.time_step).ceil();
        if steps.is_finite() && steps < usize::MAX as f64 {
            steps as usize
        } else {
            0
        }
    }
}
