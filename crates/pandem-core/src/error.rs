//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` impls or wrap it as one variant.

use thiserror::Error;

use crate::{PieceId, Status};

/// Errors produced by `pandem-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    /// A status change outside the closed state machine — always a defect,
    /// never recoverable.
    #[error("invalid transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id:   PieceId,
        from: Status,
        to:   Status,
    },
}

/// Shorthand result type for all `pandem-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
