//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter — one tick per external
//! `step()` call.  There is no internal wall-clock mapping: the stats
//! recorder receives elapsed real time from the controller, which owns the
//! start timestamp.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick (turn) counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current turn.  Advanced once at the top of every `step()` and
/// zeroed by `reset()`.
#[derive(Clone, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    pub turn: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { turn: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.turn = Tick(self.turn.0 + 1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.turn = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.turn)
    }
}
