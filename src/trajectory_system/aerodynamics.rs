use crate::control::balloon::BalloonSpec;

#[derive(Debug, Clone, Copy)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub frontal_area: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, frontal_area: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            frontal_area,
        }
    }

    pub fn for_balloon(balloon: &BalloonSpec) -> Self {
        Aerodynamics::new(balloon.drag_coefficient, balloon.frontal_area)
    }

    /// Vertical drag force. Opposes upward motion; at zero or negative
    /// velocity it points up, so it is zero only when the balloon is at rest.
    pub fn calculate_drag(&self, velocity: f64, air_density: f64) -> f64 {
        let drag_magnitude = self.calculate_dynamic_pressure(velocity, air_density)
            * self.frontal_area
            * self.drag_coefficient;

        if velocity > 0.0 {
            -drag_magnitude
        } else {
            drag_magnitude
        }
    }

    /// Buoyant force of `volume` of gas at `internal_density` immersed in
    /// air at `external_density`.
    pub fn calculate_lift(
        &self,
        volume: f64,
        gravity: f64,
        external_density: f64,
        internal_density: f64,
    ) -> f64 {
        volume * gravity * (external_density - internal_density)
    }

    fn calculate_dynamic_pressure(&self, velocity: f64, air_density: f64) -> f64 {
        0.5 * air_density * velocity.powi(2)
    }
}
