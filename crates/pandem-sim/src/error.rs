use pandem_board::BoardError;
use pandem_core::{CoreError, PieceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    /// A piece finished a collision pass outside the domain — the wall
    /// reflection failed to confine it, which is a defect, not a condition
    /// to clamp away silently.
    #[error("piece {id} out of bounds at ({x}, {y})")]
    OutOfBounds { id: PieceId, x: f64, y: f64 },
}

pub type SimResult<T> = Result<T, SimError>;
