use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Board must contain at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Generated mine layout does not fit the board")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
