use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Reference string is empty")]
    EmptyReferenceString,
    #[error("Frame count must be at least 1, got {0}")]
    InvalidFrameCount(usize),
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type for simulation operations
pub type SimResult<T> = std::result::Result<T, SimulationError>;
