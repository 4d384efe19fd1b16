use std::fmt::Write as _;

use crate::control::ascent::{FlightState, SimulationState};
use crate::control::environment::Environment;

#[derive(Debug, Clone, Copy)]
pub struct FlightSample {
    pub time: f64,                 // s
    pub altitude: f64,             // m
    pub velocity: f64,             // m/s
    pub internal_temperature: f64, // °C
    pub external_temperature: f64, // °C
    pub volume: f64,               // m³
    pub net_force: f64,            // N
}

pub struct Telemetry {
    pub samples: Vec<FlightSample>,
    max_velocity: f64,
    max_altitude: f64,
    min_volume: f64,
    state_times: Vec<(FlightState, f64)>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            samples: Vec::new(),
            max_velocity: 0.0,
            max_altitude: 0.0,
            min_volume: f64::MAX,
            state_times: Vec::new(),
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect_data(&mut self, state: &SimulationState, environment: &Environment) {
        let sample = FlightSample {
            time: state.elapsed(),
            altitude: state.altitude(),
            velocity: state.velocity(),
            internal_temperature: state.internal_temperature,
            external_temperature: environment.temperature_celsius(),
            volume: state.volume,
            net_force: state.net_force,
        };

        if sample.velocity.abs() > self.max_velocity {
            self.max_velocity = sample.velocity.abs();
        }
        if sample.altitude > self.max_altitude {
            self.max_altitude = sample.altitude;
        }
        if sample.volume < self.min_volume {
            self.min_volume = sample.volume;
        }
        self.samples.push(sample);

        // Track state transitions
        if let Some((last_state, _)) = self.state_times.last() {
            if *last_state != state.state {
                self.state_times.push((state.state, sample.time));
            }
        } else {
            self.state_times.push((state.state, sample.time));
        }
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn min_volume(&self) -> Option<f64> {
        (!self.samples.is_empty()).then_some(self.min_volume)
    }

    pub fn state_transitions(&self) -> &[(FlightState, f64)] {
        &self.state_times
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- Flight Summary ---");
        let _ = writeln!(out, "Samples: {}", self.samples.len());
        let _ = writeln!(out, "Max Velocity: {:.2} m/s", self.max_velocity);
        let _ = writeln!(out, "Max Altitude: {}", Self::format_altitude(self.max_altitude));
        if let Some(min_volume) = self.min_volume() {
            let _ = writeln!(out, "Min Volume: {:.3} m³", min_volume);
        }

        let _ = writeln!(out, "\n--- State Transitions ---");
        for (state, time) in &self.state_times {
            let _ = writeln!(out, "State {:?} reached at: {}", state, Self::format_time(*time));
        }
        out
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for sample in &self.samples {
            println!(
                "t={} | Alt: {} | Vel: {:.2} m/s | Gas: {:.1}°C | Air: {:.1}°C | Vol: {:.3} m³ | Net: {:.3} N",
                Self::format_time(sample.time),
                Self::format_altitude(sample.altitude),
                sample.velocity,
                sample.internal_temperature,
                sample.external_temperature,
                sample.volume,
                sample.net_force
            );
        }
        println!("--- End of Telemetry ---\n");
        print!("{}", self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::control::ascent::AscentSimulator;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_format_time() {
        assert_eq!(Telemetry::format_time(12.5), "12.50s");
        assert_eq!(Telemetry::format_time(125.0), "2m 5.00s");
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(Telemetry::format_altitude(104.367), "104.37 m");
        assert_eq!(Telemetry::format_altitude(1500.0), "1.50 km");
    }

    #[test]
    fn test_display_data_after_flight() {
        let config = SimulationConfig::default();
        let mut telemetry = Telemetry::new();
        AscentSimulator::new(&config, 30.0).run_with_telemetry(&mut telemetry);

        assert!(!telemetry.samples.is_empty());
        telemetry.display_data();
    }

    #[test]
    fn test_empty_telemetry() {
        let telemetry = Telemetry::new();

        assert!(telemetry.samples.is_empty());
        assert_eq!(telemetry.min_volume(), None);
        assert!(telemetry.summary().contains("Samples: 0"));
    }

    #[test]
    fn test_recorded_flight_matches_outcome() {
        let config = SimulationConfig::default();
        let mut telemetry = Telemetry::new();

        let outcome = AscentSimulator::new(&config, 10.0).run_with_telemetry(&mut telemetry);

        assert_eq!(telemetry.samples.len(), outcome.steps);
        assert_eq!(telemetry.max_altitude(), outcome.peak_altitude);
        assert!(telemetry.max_velocity() > 0.0);

        let min_volume = telemetry.min_volume().expect("flight has samples");
        assert!(min_volume < config.balloon.full_volume);
        assert!(min_volume >= config.balloon.min_volume() - 1e-12);

        let last = telemetry.samples.last().expect("flight has samples");
        assert_abs_diff_eq!(last.time, outcome.elapsed, epsilon = 1e-9);
    }

    #[test]
    fn test_state_transitions_for_reference_flight() {
        let config = SimulationConfig::default();
        let mut telemetry = Telemetry::new();

        AscentSimulator::new(&config, 10.0).run_with_telemetry(&mut telemetry);

        let states: Vec<FlightState> = telemetry
            .state_transitions()
            .iter()
            .map(|(state, _)| *state)
            .collect();
        assert_eq!(states.first(), Some(&FlightState::Ascending));
        assert_eq!(states.last(), Some(&FlightState::Landed));
        assert!(states.contains(&FlightState::Descending));
        assert!(telemetry.summary().contains("State Landed reached at"));
    }
}
