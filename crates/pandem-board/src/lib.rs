//! `pandem-board` — the bounded spatial domain and its two strategies.
//!
//! # Two admissible variants
//!
//! | Variant                | Position        | Collision model                    |
//! |------------------------|-----------------|------------------------------------|
//! | [`ContinuousBoard`]    | real-valued     | O(n²) pairwise elastic collisions  |
//! | [`DiscreteBoard`]      | integer grid    | occupancy check + neighbor tables  |
//!
//! Both are concrete implementations of the same contract — `place`,
//! `bounds_check`, neighborhood queries — selected once at construction via
//! [`Board`], a tagged strategy rather than a class hierarchy.  The stepper
//! dispatches its per-tick algorithm on the same tag.

pub mod continuous;
pub mod discrete;
pub mod error;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use continuous::ContinuousBoard;
pub use discrete::{Cell, DiscreteBoard, Shape, MAX_RANGE, MAX_TRIES};
pub use error::{BoardError, BoardResult};

use pandem_core::{BoardKind, Piece, SimRng};

/// The spatial domain, tagged by strategy.
///
/// Rebuilt from config on every `reset()`; the continuous variant carries no
/// per-piece state, the discrete variant owns the cell occupancy map.
pub enum Board {
    Continuous(ContinuousBoard),
    Discrete(DiscreteBoard),
}

impl Board {
    pub fn new(kind: BoardKind, size: u32) -> Self {
        match kind {
            BoardKind::Continuous => Board::Continuous(ContinuousBoard::new(size)),
            BoardKind::Discrete   => Board::Discrete(DiscreteBoard::new(size)),
        }
    }

    /// Assign an initial non-overlapping position and heading to `piece`.
    ///
    /// `Err(PlacementExhausted)` is recoverable: the caller logs it and
    /// proceeds with fewer placed pieces.  `Err(PauliExclusion)` is a defect.
    pub fn place(&mut self, piece: &mut Piece, rng: &mut SimRng) -> BoardResult<()> {
        match self {
            Board::Continuous(b) => b.place(piece, rng),
            Board::Discrete(b)   => b.place(piece, rng),
        }
    }

    /// Reflect a piece that crossed the domain boundary back inside.
    pub fn bounds_check(&self, piece: &mut Piece) {
        match self {
            Board::Continuous(b) => b.bounds_check(piece),
            // Grid walls and the occupancy check already confine pieces.
            Board::Discrete(_) => {}
        }
    }

    /// Domain width (equal to height — the domain is square).
    pub fn width(&self) -> f64 {
        match self {
            Board::Continuous(b) => b.width(),
            Board::Discrete(b)   => b.width() as f64,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Board::Continuous(b) => b.height(),
            Board::Discrete(b)   => b.height() as f64,
        }
    }
}
