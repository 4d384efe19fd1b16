use tracing::{debug, trace, warn};

use crate::config::SimulationConfig;
use crate::control::environment::Environment;
use crate::telemetry_system::telemetry::Telemetry;
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::kinematics::Kinematics;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum FlightState {
    Grounded,
    Ascending,
    Descending,
    Landed,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Termination {
    /// Back on the ground with nothing left to lift it.
    Landed,
    /// Step cap reached; the peak is still the best altitude seen.
    TimeBudgetExhausted,
}

#[derive(Debug, Clone, Copy)]
pub struct AscentOutcome {
    pub ground_temperature: f64, // °C
    pub peak_altitude: f64,      // m
    pub elapsed: f64,            // s
    pub steps: usize,
    pub termination: Termination,
}

/// Mutable state of one ascent run.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub kinematics: Kinematics,
    pub internal_temperature: f64, // °C
    pub volume: f64,               // m³
    pub net_force: f64,            // N, from the latest step
    pub delta_t: f64,              // °C, internal minus ambient at the latest step
    pub state: FlightState,
}

impl SimulationState {
    pub fn altitude(&self) -> f64 {
        self.kinematics.altitude
    }

    pub fn velocity(&self) -> f64 {
        self.kinematics.velocity
    }

    pub fn elapsed(&self) -> f64 {
        self.kinematics.time
    }

    pub fn max_altitude(&self) -> f64 {
        self.kinematics.max_altitude
    }
}

/// Time-stepping simulator for a single ground temperature.
pub struct AscentSimulator<'a> {
    config: &'a SimulationConfig,
    aerodynamics: Aerodynamics,
    pub environment: Environment,
    pub state: SimulationState,
    step_index: usize,
}

impl<'a> AscentSimulator<'a> {
    pub fn new(config: &'a SimulationConfig, ground_temperature: f64) -> Self {
        AscentSimulator {
            config,
            aerodynamics: Aerodynamics::for_balloon(&config.balloon),
            environment: Environment::new(config.constants, ground_temperature),
            state: SimulationState {
                kinematics: Kinematics::new(),
                internal_temperature: config.thermal.initial_temperature_c,
                volume: config.balloon.full_volume,
                net_force: 0.0,
                delta_t: 0.0,
                state: FlightState::Grounded,
            },
            step_index: 0,
        }
    }

    pub fn ground_temperature(&self) -> f64 {
        self.environment.ground_temperature
    }

    /// Advance the run by one time step. Returns `true` once the balloon
    /// has landed for good.
    pub fn step(&mut self) -> bool {
        let balloon = &self.config.balloon;
        let thermal = &self.config.thermal;
        let delta_time = self.config.time_step;
        let started_at = self.step_index as f64 * delta_time;

        // Ambient conditions where the balloon is now
        self.environment.update(self.state.kinematics.altitude);
        let external_temperature = self.environment.temperature_celsius();
        let external_density = self.environment.air_density;
        let internal_density = self.environment.gas_density_at(self.state.internal_temperature);

        // Forces
        let lift = self.aerodynamics.calculate_lift(
            self.state.volume,
            self.config.constants.gravity,
            external_density,
            internal_density,
        );
        let drag = self
            .aerodynamics
            .calculate_drag(self.state.kinematics.velocity, external_density);
        let net_force = lift - balloon.weight + drag;

        self.state
            .kinematics
            .update(delta_time, net_force, balloon.mass);

        // Cooling and sagging both see the temperature gap from before the move
        let delta_t = self.state.internal_temperature - external_temperature;
        self.state.internal_temperature = thermal.cooled_temperature(
            self.state.internal_temperature,
            external_temperature,
            delta_time,
            balloon,
        );

        let previous_volume = self.state.volume;
        self.state.volume = thermal.effective_volume(delta_t, balloon);
        if previous_volume == balloon.full_volume && self.state.volume < balloon.full_volume {
            trace!(
                altitude = self.state.kinematics.altitude,
                delta_t,
                "envelope started sagging"
            );
        }

        self.state.net_force = net_force;
        self.state.delta_t = delta_t;
        self.step_index += 1;

        let kinematics = &self.state.kinematics;
        let landed = kinematics.is_on_ground()
            && kinematics.velocity <= 0.0
            && net_force <= 0.0
            && started_at > 0.0;

        self.state.state = if landed {
            FlightState::Landed
        } else if kinematics.velocity > 0.0 {
            FlightState::Ascending
        } else if kinematics.velocity < 0.0 {
            FlightState::Descending
        } else {
            FlightState::Grounded
        };

        landed
    }

    pub fn run(self) -> AscentOutcome {
        self.run_inner(None)
    }

    /// Same as [`run`](Self::run), recording every step into `telemetry`.
    pub fn run_with_telemetry(self, telemetry: &mut Telemetry) -> AscentOutcome {
        self.run_inner(Some(telemetry))
    }

    fn run_inner(mut self, mut telemetry: Option<&mut Telemetry>) -> AscentOutcome {
        let max_steps = self.config.max_steps();
        debug!(
            ground_temperature = self.ground_temperature(),
            max_steps, "starting ascent run"
        );

        for _ in 0..max_steps {
            let landed = self.step();
            if let Some(telemetry) = telemetry.as_deref_mut() {
                telemetry.collect_data(&self.state, &self.environment);
            }
            if landed {
                return self.finish(Termination::Landed);
            }
        }

        warn!(
            ground_temperature = self.ground_temperature(),
            peak_altitude = self.state.max_altitude(),
            "time budget exhausted before landing"
        );
        self.finish(Termination::TimeBudgetExhausted)
    }

    fn finish(self, termination: Termination) -> AscentOutcome {
        let outcome = AscentOutcome {
            ground_temperature: self.ground_temperature(),
            peak_altitude: self.state.max_altitude(),
            elapsed: self.state.elapsed(),
            steps: self.step_index,
            termination,
        };
        debug!(
            ground_temperature = outcome.ground_temperature,
            peak_altitude = outcome.peak_altitude,
            steps = outcome.steps,
            termination = ?outcome.termination,
            "ascent run finished"
        );
        outcome
    }
}

/// Peak altitude reached by the balloon released at `ground_temperature` °C.
///
/// Hotter gas gives a higher ceiling only for initial gas temperatures up to
/// about 185 °C; beyond that the explicit drag update overshoots and the
/// balloon drops back early.
pub fn simulate_ascent(ground_temperature: f64, config: &SimulationConfig) -> f64 {
    AscentSimulator::new(config, ground_temperature)
        .run()
        .peak_altitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::thermal::ThermalProfile;
    use approx::assert_abs_diff_eq;

    fn thermal_with_initial(initial_temperature_c: f64) -> ThermalProfile {
        ThermalProfile {
            initial_temperature_c,
            ..ThermalProfile::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let config = SimulationConfig::default();
        let simulator = AscentSimulator::new(&config, 10.0);

        assert_eq!(simulator.state.altitude(), 0.0);
        assert_eq!(simulator.state.velocity(), 0.0);
        assert_eq!(simulator.state.internal_temperature, 70.0);
        assert_eq!(simulator.state.volume, config.balloon.full_volume);
        assert_eq!(simulator.state.state, FlightState::Grounded);
    }

    #[test]
    fn test_first_step_lifts_off() {
        let config = SimulationConfig::default();
        let mut simulator = AscentSimulator::new(&config, 10.0);

        let landed = simulator.step();

        assert!(!landed);
        assert!(simulator.state.net_force > 0.0);
        assert!(simulator.state.velocity() > 0.0);
        assert!(simulator.state.altitude() > 0.0);
        assert_eq!(simulator.state.state, FlightState::Ascending);
        assert!(simulator.state.internal_temperature < 70.0);
        // 60 °C gap is above the sagging onset
        assert_eq!(simulator.state.volume, config.balloon.full_volume);
    }

    #[test]
    fn test_reference_flight() {
        let config = SimulationConfig::default();
        let outcome = AscentSimulator::new(&config, 10.0).run();

        assert_eq!(outcome.termination, Termination::Landed);
        assert!(outcome.steps < config.max_steps());
        assert!(outcome.peak_altitude.is_finite());
        assert!(outcome.peak_altitude > 0.0);
        assert_abs_diff_eq!(outcome.peak_altitude, 104.367, epsilon = 0.01);
        assert_eq!(outcome.steps, 1068);
    }

    #[test]
    fn test_no_lift_when_gas_matches_ambient() {
        let config = SimulationConfig::default();
        let outcome = AscentSimulator::new(&config, 70.0).run();

        assert_eq!(outcome.peak_altitude, 0.0);
        assert_eq!(outcome.termination, Termination::Landed);
        assert_eq!(outcome.steps, 2);
    }

    #[test]
    fn test_landing_not_declared_on_first_step() {
        let config = SimulationConfig::default();
        let mut simulator = AscentSimulator::new(&config, 70.0);

        assert!(!simulator.step());
        assert_eq!(simulator.state.state, FlightState::Grounded);
        assert!(simulator.step());
        assert_eq!(simulator.state.state, FlightState::Landed);
    }

    #[test]
    fn test_sagging_after_cooling() {
        let config = SimulationConfig::default();
        let mut simulator = AscentSimulator::new(&config, 10.0);

        while simulator.state.delta_t == 0.0 || simulator.state.delta_t > 30.0 {
            assert!(!simulator.step());
        }
        assert!(simulator.state.volume < config.balloon.full_volume);
        assert!(simulator.state.volume >= config.balloon.min_volume());
    }

    #[test]
    fn test_budget_exhaustion_still_reports_peak() {
        let thermal = ThermalProfile {
            heat_loss_coefficient: 0.0,
            ..ThermalProfile::default()
        };
        let config = SimulationConfig::default().with_thermal(thermal);

        let outcome = AscentSimulator::new(&config, 10.0).run();

        assert_eq!(outcome.termination, Termination::TimeBudgetExhausted);
        assert_eq!(outcome.steps, config.max_steps());
        assert_abs_diff_eq!(outcome.peak_altitude, 468.637, epsilon = 0.01);
        assert_abs_diff_eq!(outcome.elapsed, 300.0, epsilon = 1e-6);
    }

    #[test]
    fn test_short_budget() {
        let config = SimulationConfig::default()
            .with_timing(0.2, 0.2)
            .expect("valid timing");
        let outcome = AscentSimulator::new(&config, 10.0).run();

        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.termination, Termination::TimeBudgetExhausted);
        assert_abs_diff_eq!(outcome.peak_altitude, 0.18888, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_timing_returns_without_stepping() {
        for time_step in [0.0, -0.2, f64::NAN] {
            let config = SimulationConfig {
                time_step,
                ..SimulationConfig::default()
            };
            let outcome = AscentSimulator::new(&config, 10.0).run();

            assert_eq!(outcome.steps, 0, "time_step {}", time_step);
            assert_eq!(outcome.termination, Termination::TimeBudgetExhausted);
            assert_eq!(outcome.peak_altitude, 0.0);
            assert_eq!(simulate_ascent(10.0, &config), 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let config = SimulationConfig::default();

        let first = simulate_ascent(12.5, &config);
        let second = simulate_ascent(12.5, &config);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_faster_cooling_lowers_ceiling() {
        let base = SimulationConfig::default();
        let mut previous = f64::INFINITY;

        for coefficient in [0.1, 0.25, 0.5, 1.0, 2.0] {
            let thermal = ThermalProfile {
                heat_loss_coefficient: coefficient,
                ..ThermalProfile::default()
            };
            let peak = simulate_ascent(10.0, &base.with_thermal(thermal));
            assert!(
                peak < previous,
                "Heat loss {} should lower the ceiling: {} vs {}",
                coefficient,
                peak,
                previous
            );
            previous = peak;
        }
    }

    #[test]
    fn test_hotter_gas_climbs_at_least_as_high() {
        let base = SimulationConfig::default();

        for ground in [0.0, 10.0, 20.0, 30.0] {
            let mut previous = 0.0;
            let mut internal = 20.0;
            while internal <= 110.0 {
                let peak = simulate_ascent(ground, &base.with_thermal(thermal_with_initial(internal)));
                assert!(
                    peak >= previous,
                    "Ceiling dropped at ground {} °C, internal {} °C: {} < {}",
                    ground,
                    internal,
                    peak,
                    previous
                );
                previous = peak;
                internal += 2.0;
            }
        }
    }

    #[test]
    fn test_plausible_ground_range_is_finite() {
        let config = SimulationConfig::default();

        for ground in -50..=50 {
            let peak = simulate_ascent(f64::from(ground), &config);
            assert!(peak.is_finite(), "Non-finite ceiling at {} °C", ground);
            assert!(peak >= 0.0);
        }
    }
}
