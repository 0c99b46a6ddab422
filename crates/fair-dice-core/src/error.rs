//! Error type shared by every fair-dice operation.

use thiserror::Error;

/// Errors from dice, randomness and fair-exchange operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid die: expected 6 faces, got {0}")]
    InvalidDieSpec(usize),

    #[error("At least {required} dice are required, got {found}")]
    NotEnoughDice { required: usize, found: usize },

    #[error("Invalid range: {0} (range must be greater than zero)")]
    InvalidRange(u64),

    #[error("Secure entropy unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Contribution {value} out of range 0..{range}")]
    OutOfRange { value: u64, range: u64 },

    #[error("Die {0} is not available")]
    DieUnavailable(usize),

    #[error("Protocol misuse: {0}")]
    ProtocolMisuse(&'static str),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl GameError {
    /// Can the caller re-prompt for input and carry on with the same round?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::OutOfRange { .. } | GameError::DieUnavailable(_)
        )
    }
}

impl From<hex::FromHexError> for GameError {
    fn from(e: hex::FromHexError) -> Self {
        GameError::InvalidHex(e.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GameError>;
