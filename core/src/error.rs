use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },
    #[error("Invalid coordinates")]
    InvalidCoordinate,
}

pub type Result<T> = core::result::Result<T, GameError>;
