use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1x1")]
    InvalidSize,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("Score storage failed: {0}")]
    Storage(String),
    #[error("Invalid elapsed time: {0}")]
    InvalidTime(f64),
}
