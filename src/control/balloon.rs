use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BALLOON_DIAMETER, BALLOON_DRAG_COEFFICIENT, BALLOON_MASS, GRAVITY, MIN_VOLUME_FRACTION,
    OPENING_DIAMETER,
};
use crate::errors::SimulationError;

/// Geometry and mass of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonSpec {
    pub radius: f64,              // m
    pub full_volume: f64,         // m³
    pub mass: f64,                // kg
    pub weight: f64,              // N
    pub opening_area: f64,        // m²
    pub frontal_area: f64,        // m²
    pub drag_coefficient: f64,
    pub min_volume_fraction: f64, // of full_volume, under full collapse
}

impl Default for BalloonSpec {
    fn default() -> Self {
        BalloonSpec::spherical(
            BALLOON_DIAMETER,
            OPENING_DIAMETER,
            BALLOON_MASS,
            BALLOON_DRAG_COEFFICIENT,
            MIN_VOLUME_FRACTION,
            GRAVITY,
        )
    }
}

impl BalloonSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        radius: f64,
        full_volume: f64,
        mass: f64,
        gravity: f64,
        opening_area: f64,
        frontal_area: f64,
        drag_coefficient: f64,
        min_volume_fraction: f64,
    ) -> Self {
        BalloonSpec {
            radius,
            full_volume,
            mass,
            weight: mass * gravity,
            opening_area,
            frontal_area,
            drag_coefficient,
            min_volume_fraction,
        }
    }

    /// A spherical envelope with a circular opening at the bottom.
    pub fn spherical(
        diameter: f64,
        opening_diameter: f64,
        mass: f64,
        drag_coefficient: f64,
        min_volume_fraction: f64,
        gravity: f64,
    ) -> Self {
        let radius = diameter / 2.0;
        BalloonSpec::new(
            radius,
            (4.0 / 3.0) * PI * radius.powi(3),
            mass,
            gravity,
            PI * (opening_diameter / 2.0).powi(2),
            PI * radius.powi(2),
            drag_coefficient,
            min_volume_fraction,
        )
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Volume left once the envelope has fully sagged.
    pub fn min_volume(&self) -> f64 {
        self.full_volume * self.min_volume_fraction
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("radius", self.radius),
            ("full_volume", self.full_volume),
            ("mass", self.mass),
            ("weight", self.weight),
            ("opening_area", self.opening_area),
            ("frontal_area", self.frontal_area),
            ("drag_coefficient", self.drag_coefficient),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InitializationError(format!(
                    "balloon {} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.min_volume_fraction > 0.0 && self.min_volume_fraction <= 1.0) {
            return Err(SimulationError::InitializationError(format!(
                "min_volume_fraction must lie in (0, 1], got {}",
                self.min_volume_fraction
            )));
        }
        Ok(())
    }
}
