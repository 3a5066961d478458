//! Board-subsystem error type.

use thiserror::Error;

/// Errors produced by `pandem-board`.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Two non-wall occupants requested for the same cell.  Fatal: the
    /// one-piece-per-cell invariant is the discrete board's foundation.
    #[error("Pauli exclusion: cell {index} is already occupied")]
    PauliExclusion { index: usize },

    /// Rejection sampling ran out of tries while looking for an empty cell.
    /// Recoverable: callers log it and continue with fewer placed pieces.
    #[error("no empty cell found after {tries} tries")]
    PlacementExhausted { tries: u32 },
}

pub type BoardResult<T> = Result<T, BoardError>;
