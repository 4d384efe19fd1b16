pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::SimulationConfig;
pub use constants::*;
pub use control::ascent::{
    simulate_ascent, AscentOutcome, AscentSimulator, FlightState, SimulationState, Termination,
};
pub use control::balloon::BalloonSpec;
pub use control::environment::{
    air_density, external_temperature_k, pressure_at_altitude, Environment, PhysicalConstants,
};
pub use control::sweep::{run_sweep, run_sweep_parallel, SweepRange, SweepResult, SweepSample};
pub use control::thermal::ThermalProfile;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::kinematics::Kinematics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightSample, Telemetry};
