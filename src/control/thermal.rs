use serde::{Deserialize, Serialize};

use crate::constants::{
    HEAT_LOSS_COEFFICIENT, INITIAL_INTERNAL_TEMPERATURE, SAGGING_COMPLETE_DELTA_T,
    SAGGING_ONSET_DELTA_T, ZERO_CELSIUS_IN_KELVIN,
};
use crate::control::balloon::BalloonSpec;
use crate::errors::SimulationError;

/// Heating, cooling and sagging behaviour of the gas inside the envelope.
///
/// The heat-loss coefficient and both sagging thresholds are empirical and
/// meant to be recalibrated against flights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalProfile {
    pub initial_temperature_c: f64,    // °C
    pub heat_loss_coefficient: f64,    // 1/s
    pub sagging_onset_delta_t: f64,    // °C
    pub sagging_complete_delta_t: f64, // °C
}

impl Default for ThermalProfile {
    fn default() -> Self {
        ThermalProfile {
            initial_temperature_c: INITIAL_INTERNAL_TEMPERATURE,
            heat_loss_coefficient: HEAT_LOSS_COEFFICIENT,
            sagging_onset_delta_t: SAGGING_ONSET_DELTA_T,
            sagging_complete_delta_t: SAGGING_COMPLETE_DELTA_T,
        }
    }
}

impl ThermalProfile {
    pub fn new(
        initial_temperature_c: f64,
        heat_loss_coefficient: f64,
        sagging_onset_delta_t: f64,
        sagging_complete_delta_t: f64,
    ) -> Result<Self, SimulationError> {
        let profile = ThermalProfile {
            initial_temperature_c,
            heat_loss_coefficient,
            sagging_onset_delta_t,
            sagging_complete_delta_t,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.initial_temperature_c.is_finite()
            && self.initial_temperature_c > -ZERO_CELSIUS_IN_KELVIN)
        {
            return Err(SimulationError::InitializationError(format!(
                "initial temperature must be above absolute zero, got {} °C",
                self.initial_temperature_c
            )));
        }
        if !(self.heat_loss_coefficient.is_finite() && self.heat_loss_coefficient >= 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "heat loss coefficient must be finite and non-negative, got {}",
                self.heat_loss_coefficient
            )));
        }
        if !(self.sagging_complete_delta_t > 0.0
            && self.sagging_onset_delta_t > self.sagging_complete_delta_t
            && self.sagging_onset_delta_t.is_finite())
        {
            return Err(SimulationError::InitializationError(format!(
                "sagging thresholds must satisfy onset > complete > 0, got onset {} and complete {}",
                self.sagging_onset_delta_t, self.sagging_complete_delta_t
            )));
        }
        Ok(())
    }

    /// Internal temperature after one step of cooling through the opening.
    /// Never drops below the ambient temperature.
    pub fn cooled_temperature(
        &self,
        internal_c: f64,
        external_c: f64,
        time_step: f64,
        balloon: &BalloonSpec,
    ) -> f64 {
        let delta_t = internal_c - external_c;
        if delta_t > 0.0 {
            internal_c
                - self.heat_loss_coefficient
                    * delta_t
                    * time_step
                    * (balloon.opening_area / balloon.full_volume)
        } else {
            external_c
        }
    }

    /// Fraction of the sagging travel completed, in [0, 1].
    pub fn collapse_progress(&self, delta_t: f64) -> f64 {
        if delta_t > self.sagging_onset_delta_t {
            return 0.0;
        }
        ((self.sagging_onset_delta_t - delta_t)
            / (self.sagging_onset_delta_t - self.sagging_complete_delta_t))
            .clamp(0.0, 1.0)
    }

    pub fn effective_volume(&self, delta_t: f64, balloon: &BalloonSpec) -> f64 {
        if delta_t > self.sagging_onset_delta_t {
            return balloon.full_volume;
        }
        let progress = self.collapse_progress(delta_t);
        balloon.full_volume * (1.0 - progress * (1.0 - balloon.min_volume_fraction))
    }
}
