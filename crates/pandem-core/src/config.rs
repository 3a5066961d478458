//! Top-level simulation configuration.
//!
//! Typically deserialized from the embedding application's settings form and
//! passed to `Simulation::new`.  `Default` carries the canonical values used
//! throughout the test suite.

use crate::{CoreError, CoreResult};

/// Which spatial-domain strategy the simulation runs on.
///
/// A tagged strategy, selected once at construction: the continuous board
/// moves pieces through real-valued space with elastic collisions; the
/// discrete board steps them across integer grid cells with
/// cellular-automaton spread.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    #[default]
    Continuous,
    Discrete,
}

/// Simulation configuration.  All fields required; `Default` supplies the
/// canonical values.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Population size.  Fixed for the lifetime of a run.
    pub people: usize,

    /// How many pieces the initial seeding phase tries to infect.
    pub infected: usize,

    /// Probability in `[0, 1]` that an expiring infection resolves to death.
    pub lethality: f64,

    /// Nominal infection length in simulated time units; the per-piece tick
    /// duration is randomized around `duration / dt`.
    pub duration: u32,

    /// Side length of the square domain.
    pub size: u32,

    /// Piece radius (continuous board): collision threshold is `(2·radius)²`.
    pub radius: f64,

    /// Integration timestep for Euler motion.
    pub dt: f64,

    /// Probability in `[0, 1]` that a piece shelters in place.
    pub shelter: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u32,

    /// Spatial-domain strategy.
    pub board: BoardKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            people:    200,
            infected:  1,
            lethality: 0.1,
            duration:  100,
            size:      500,
            radius:    5.0,
            dt:        0.1,
            shelter:   0.1,
            seed:      12345,
            board:     BoardKind::Continuous,
        }
    }
}

impl SimConfig {
    /// Nominal infection length in ticks: `duration / dt`.
    #[inline]
    pub fn duration_ticks(&self) -> u64 {
        (self.duration as f64 / self.dt) as u64
    }

    /// Try budget for the infection-seeding loop.
    #[inline]
    pub fn max_tries(&self) -> usize {
        self.people * 2
    }

    /// Reject configurations the simulation cannot run.  Fatal — callers
    /// must not construct a simulation from an invalid config.
    pub fn validate(&self) -> CoreResult<()> {
        if self.people == 0 {
            return Err(CoreError::Config("people must be > 0".into()));
        }
        if self.infected > self.people {
            return Err(CoreError::Config(format!(
                "cannot infect {} of {} people",
                self.infected, self.people
            )));
        }
        if !(0.0..=1.0).contains(&self.lethality) {
            return Err(CoreError::Config("lethality must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.shelter) {
            return Err(CoreError::Config("shelter must be in [0, 1]".into()));
        }
        if self.dt <= 0.0 || self.radius <= 0.0 || self.size == 0 {
            return Err(CoreError::Config(
                "dt, radius, and size must be positive".into(),
            ));
        }
        Ok(())
    }
}
