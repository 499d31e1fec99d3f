use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty frame sequence: {0}")]
    EmptyFrameSequence(String),

    #[error("Render failure: {0}")]
    RenderFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Simulation cancelled after {0} samples")]
    Cancelled(usize),
}
