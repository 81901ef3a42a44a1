use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Position is outside of the board")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
