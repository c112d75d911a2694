use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("No frame has been received yet")]
    NoFrameAvailable,

    #[error("Toggle ignored: no frame has been received yet")]
    ToggleWithoutFrame,

    #[error("Failed to decode frame: {0}")]
    Decode(String),

    #[error("Health {health} is not above threshold {threshold}")]
    InsufficientHealth { health: f64, threshold: f64 },

    #[error("Calibration was disengaged while the cycle was running")]
    NotEngaged,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
