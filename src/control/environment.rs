use serde::{Deserialize, Serialize};

use crate::constants::{
    GAS_CONSTANT, GRAVITY, MIN_EXTERNAL_TEMPERATURE, MOLAR_MASS_AIR, REFERENCE_ALTITUDE,
    SEA_LEVEL_PRESSURE, TEMPERATURE_LAPSE_RATE,
};
use crate::errors::SimulationError;
use crate::utils::temperature::{celsius_to_kelvin, kelvin_to_celsius};

/// Scalar constants of the linear-lapse atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub gravity: f64,            // m/s²
    pub molar_mass_air: f64,     // kg/mol
    pub gas_constant: f64,       // J/(mol⋅K)
    pub sea_level_pressure: f64, // Pa
    pub lapse_rate: f64,         // K/m, temperature decreases with altitude
    pub reference_altitude: f64, // m
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gravity: GRAVITY,
            molar_mass_air: MOLAR_MASS_AIR,
            gas_constant: GAS_CONSTANT,
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            lapse_rate: TEMPERATURE_LAPSE_RATE,
            reference_altitude: REFERENCE_ALTITUDE,
        }
    }
}

impl PhysicalConstants {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("gravity", self.gravity),
            ("molar_mass_air", self.molar_mass_air),
            ("gas_constant", self.gas_constant),
            ("sea_level_pressure", self.sea_level_pressure),
            ("lapse_rate", self.lapse_rate),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InitializationError(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        if !self.reference_altitude.is_finite() {
            return Err(SimulationError::InitializationError(format!(
                "reference_altitude must be finite, got {}",
                self.reference_altitude
            )));
        }
        Ok(())
    }

    /// Exponent of the barometric formula, g·M / (R·L).
    pub fn barometric_exponent(&self) -> f64 {
        self.gravity * self.molar_mass_air / (self.gas_constant * self.lapse_rate)
    }
}

/// Ambient temperature in Kelvin, never below 220 K.
pub fn external_temperature_k(
    constants: &PhysicalConstants,
    ground_temperature_c: f64,
    altitude: f64,
) -> f64 {
    let ground_temperature_k = celsius_to_kelvin(ground_temperature_c);
    let temperature =
        ground_temperature_k - constants.lapse_rate * (altitude - constants.reference_altitude);
    temperature.max(MIN_EXTERNAL_TEMPERATURE)
}

/// Barometric pressure for a linear lapse rate. Returns 0 above the altitude
/// where the lapse model runs out of temperature.
pub fn pressure_at_altitude(
    constants: &PhysicalConstants,
    ground_temperature_c: f64,
    altitude: f64,
) -> f64 {
    let ground_temperature_k = celsius_to_kelvin(ground_temperature_c);
    let base = 1.0
        - constants.lapse_rate * (altitude - constants.reference_altitude) / ground_temperature_k;
    if base <= 0.0 {
        return 0.0;
    }
    constants.sea_level_pressure * base.powf(constants.barometric_exponent())
}

/// Ideal-gas density. Non-positive temperatures yield 0 for vacuum and
/// `f64::INFINITY` otherwise.
pub fn air_density(constants: &PhysicalConstants, temperature_k: f64, pressure_pa: f64) -> f64 {
    if temperature_k <= 0.0 {
        return if pressure_pa > 0.0 { f64::INFINITY } else { 0.0 };
    }
    pressure_pa * constants.molar_mass_air / (constants.gas_constant * temperature_k)
}

/// Ambient conditions around the balloon for one ground temperature.
#[derive(Debug, Clone)]
pub struct Environment {
    pub constants: PhysicalConstants,
    pub ground_temperature: f64, // °C
    pub air_density: f64,        // kg/m³
    pub temperature: f64,        // K
    pub pressure: f64,           // Pa
}

impl Environment {
    pub fn new(constants: PhysicalConstants, ground_temperature: f64) -> Self {
        let mut environment = Environment {
            constants,
            ground_temperature,
            air_density: 0.0,
            temperature: 0.0,
            pressure: 0.0,
        };
        environment.update(0.0);
        environment
    }

    pub fn update(&mut self, altitude: f64) {
        self.temperature = external_temperature_k(&self.constants, self.ground_temperature, altitude);
        self.pressure = pressure_at_altitude(&self.constants, self.ground_temperature, altitude);
        self.air_density = air_density(&self.constants, self.temperature, self.pressure);
    }

    pub fn temperature_celsius(&self) -> f64 {
        kelvin_to_celsius(self.temperature)
    }

    /// Density of gas at `temperature_c` under the current ambient pressure.
    pub fn gas_density_at(&self, temperature_c: f64) -> f64 {
        air_density(&self.constants, celsius_to_kelvin(temperature_c), self.pressure)
    }
}
