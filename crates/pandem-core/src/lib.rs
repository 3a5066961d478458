//! `pandem-core` — foundational types for the `pandem` epidemic simulator.
//!
//! This crate is a dependency of every other `pandem-*` crate.  It
//! intentionally has no `pandem-*` dependencies and minimal external ones
//! (only `thiserror` and `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `PieceId`                                             |
//! | [`status`]   | `Status` state machine, `StatusCounts`                |
//! | [`rng`]      | `SimRng` — seeded, language-independent generator     |
//! | [`time`]     | `Tick`, `SimClock`                                    |
//! | [`config`]   | `SimConfig`, `BoardKind`                              |
//! | [`piece`]    | `Piece` — the simulated person record                 |
//! | [`error`]    | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod ids;
pub mod piece;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoardKind, SimConfig};
pub use error::{CoreError, CoreResult};
pub use ids::PieceId;
pub use piece::Piece;
pub use rng::SimRng;
pub use status::{Status, StatusCounts};
pub use time::{SimClock, Tick};
