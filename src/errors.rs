use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Sweep error: {0}")]
    SweepError(String),
}
