// Error types: invalid arguments, malformed text, missing setup, console I/O

use thiserror::Error;

/// Errors raised by the simulator core and its console layer
#[derive(Error, Debug)]
pub enum RoverError {
    /// A structurally impossible value, e.g. a negative plateau corner or a
    /// placement on a cell that is not free.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Well-typed but lexically malformed text.
    #[error("Format error: {0}")]
    Format(String),
    /// An operation attempted before its required setup.
    #[error("State error: {0}")]
    State(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RoverError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RoverError::InvalidArgument(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        RoverError::Format(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        RoverError::State(message.into())
    }

    pub fn is_format(&self) -> bool {
        matches!(self, RoverError::Format(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RoverError::InvalidArgument(_))
    }

    pub fn is_state(&self) -> bool {
        matches!(self, RoverError::State(_))
    }
}

pub type Result<T> = std::result::Result<T, RoverError>;
