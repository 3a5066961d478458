//! The piece — one simulated person.
//!
//! All status writes go through `Piece` methods — [`Piece::shelter`] at
//! placement, then [`Piece::infect`] and [`Piece::resolve`] — which is how
//! the state machine stays closed.  Pieces live in an arena `Vec` owned by
//! the controller and are addressed by index, never by shared reference.

use crate::{CoreError, CoreResult, PieceId, SimRng, Status, Tick};

/// A simulated person: position, heading, and infection state.
///
/// `(dx, dy)` is a unit heading at placement time; collision resolution
/// preserves direction under reflection but need not keep it unit length.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub status: Status,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    /// Tick after which the infection expires.  `Some` iff `Infected`.
    pub infected_until: Option<Tick>,
    /// Sheltering pieces never move, even after catching the infection.
    pub sheltering: bool,
}

impl Piece {
    /// A fresh healthy piece with no position; the board assigns one via
    /// `place`.
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            status: Status::Healthy,
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            infected_until: None,
            sheltering: false,
        }
    }

    /// Expose this piece to the infection at `turn`.
    ///
    /// Returns `true` if it caught it.  Non-susceptible pieces (already
    /// infected, recovered, or dead) are a no-op — in particular, repeat
    /// exposure never resets `infected_until`.
    ///
    /// The per-piece infectious duration is `duration_ticks × (1.5 - next())`
    /// — uniform in `[0.5, 1.5] × duration_ticks`, deliberately centered
    /// above the nominal length to desynchronize recovery across the
    /// population.  Draws from the RNG only on success.
    pub fn infect(&mut self, turn: Tick, duration_ticks: u64, rng: &mut SimRng) -> bool {
        if !self.status.is_susceptible() {
            return false;
        }
        let ticks = (duration_ticks as f64 * (1.5 - rng.next())) as u64;
        self.status = Status::Infected;
        self.infected_until = Some(turn.offset(ticks));
        true
    }

    /// Mark a freshly placed piece as sheltering in place.
    ///
    /// Placement-time only: a sheltering piece starts in `Shelter` and never
    /// moves, though it can still catch the infection through contact.
    pub fn shelter(&mut self) {
        debug_assert_eq!(self.status, Status::Healthy, "shelter is decided at placement");
        self.status = Status::Shelter;
        self.sheltering = true;
    }

    /// Resolve an expired infection: `Infected → Dead | Recovered`.
    ///
    /// Calling this on a non-infected piece is a state-machine violation and
    /// reported as fatal rather than silently absorbed.
    pub fn resolve(&mut self, dies: bool) -> CoreResult<()> {
        if self.status != Status::Infected {
            return Err(CoreError::InvalidTransition {
                id:   self.id,
                from: self.status,
                to:   if dies { Status::Dead } else { Status::Recovered },
            });
        }
        self.status = if dies { Status::Dead } else { Status::Recovered };
        self.infected_until = None;
        Ok(())
    }

    /// `true` once the infection has run its course at `turn`.
    #[inline]
    pub fn infection_expired(&self, turn: Tick) -> bool {
        matches!(self.infected_until, Some(until) if until < turn)
    }

    /// Dead and sheltering pieces stay put; everyone else integrates motion.
    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.status != Status::Dead && !self.sheltering
    }
}
