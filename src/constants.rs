// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const MOLAR_MASS_AIR: f64 = 0.02896; // kg/mol
pub const GAS_CONSTANT: f64 = 8.314; // J/(mol⋅K)
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa (pascals)

// Environmental Constants
pub const TEMPERATURE_LAPSE_RATE: f64 = 6.5 / 1_000.0; // K per meter, temperature falls with height
pub const REFERENCE_ALTITUDE: f64 = 0.0; // m (sea level)
pub const MIN_EXTERNAL_TEMPERATURE: f64 = 220.0; // K
pub const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15; // K

// Balloon Constants
pub const BALLOON_DIAMETER: f64 = 1.5; // m
pub const BALLOON_MASS: f64 = 0.260; // kg (envelope + reinforcements + glue)
pub const OPENING_DIAMETER: f64 = 0.20; // m
pub const BALLOON_DRAG_COEFFICIENT: f64 = 0.47; // sphere
pub const MIN_VOLUME_FRACTION: f64 = 0.6;

// Thermal Constants
pub const INITIAL_INTERNAL_TEMPERATURE: f64 = 70.0; // °C
pub const HEAT_LOSS_COEFFICIENT: f64 = 0.25; // 1/s, empirical
pub const SAGGING_ONSET_DELTA_T: f64 = 30.0; // °C
pub const SAGGING_COMPLETE_DELTA_T: f64 = 5.0; // °C

// Simulation Parameters
pub const TIME_STEP: f64 = 0.2; // s
pub const MAX_SIMULATION_TIME: f64 = 300.0; // s

// Sweep Parameters
pub const SWEEP_START_TEMPERATURE: f64 = -10.0; // °C
pub const SWEEP_END_TEMPERATURE: f64 = 35.0; // °C, exclusive
pub const SWEEP_TEMPERATURE_STEP: f64 = 1.0; // °C
