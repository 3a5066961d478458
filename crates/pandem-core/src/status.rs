//! The infection state machine and per-status population counts.

use std::fmt;

/// Infection status of a piece.  A closed set:
///
/// ```text
/// Healthy  --exposure--> Infected
/// Shelter  --exposure--> Infected
/// Infected --expiry----> Dead | Recovered
/// Recovered, Dead: terminal
/// ```
///
/// Walls on the discrete board are deliberately NOT a status — they are a
/// distinct cell entry type, never a piece.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Status {
    Healthy,
    Shelter,
    Infected,
    Recovered,
    Dead,
}

impl Status {
    /// All statuses in counting order.
    pub const ALL: [Status; 5] = [
        Status::Healthy,
        Status::Shelter,
        Status::Infected,
        Status::Recovered,
        Status::Dead,
    ];

    /// Healthy and sheltering pieces can still catch the infection.
    #[inline]
    pub fn is_susceptible(self) -> bool {
        matches!(self, Status::Healthy | Status::Shelter)
    }

    /// Terminal states never transition again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Recovered | Status::Dead)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Healthy   => "healthy",
            Status::Shelter   => "shelter",
            Status::Infected  => "infected",
            Status::Recovered => "recovered",
            Status::Dead      => "dead",
        };
        f.write_str(s)
    }
}

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Number of pieces per status.  Cheap to copy; rebuilt from the arena on
/// demand and recorded by the stats history.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatusCounts {
    pub healthy:   u32,
    pub shelter:   u32,
    pub infected:  u32,
    pub recovered: u32,
    pub dead:      u32,
}

impl StatusCounts {
    #[inline]
    pub fn get(&self, status: Status) -> u32 {
        match status {
            Status::Healthy   => self.healthy,
            Status::Shelter   => self.shelter,
            Status::Infected  => self.infected,
            Status::Recovered => self.recovered,
            Status::Dead      => self.dead,
        }
    }

    #[inline]
    pub fn bump(&mut self, status: Status) {
        match status {
            Status::Healthy   => self.healthy += 1,
            Status::Shelter   => self.shelter += 1,
            Status::Infected  => self.infected += 1,
            Status::Recovered => self.recovered += 1,
            Status::Dead      => self.dead += 1,
        }
    }

    /// Total population.  Invariant: equals `config.people` at all ticks.
    #[inline]
    pub fn total(&self) -> u32 {
        self.healthy + self.shelter + self.infected + self.recovered + self.dead
    }

    /// Pieces still participating in the simulation (everyone but the dead).
    #[inline]
    pub fn live(&self) -> u32 {
        self.total() - self.dead
    }
}
