//! `pandem-sim` — the epidemic engine: stepper, statistics, and controller.
//!
//! # Per-tick algorithm (continuous variant)
//!
//! ```text
//! step():
//!   ① advance the clock
//!   ② motion    — Euler-integrate every mobile piece
//!   ③ collisions (every COLLISION_SKIP ticks):
//!        wall bounce → O(n²) pair sweep (separate, reflect, transmit)
//!        → wall bounce → bounds invariant check
//!   ④ expiry    — expired infections resolve Dead | Recovered
//!   ⑤ stats     — at most one sample per wall-clock interval
//!   ⑥ observer  — on_step_end / on_sample hooks for the renderer
//! ```
//!
//! The discrete variant replaces ②③ with single-cell grid moves and
//! cellular-automaton spread over the radius-1 neighborhood.
//!
//! # Determinism
//!
//! One seeded [`pandem_core::SimRng`] drives everything; draw order is fixed
//! (ascending piece id, ascending pair order), so a seed and a config fully
//! determine the run.  Golden-snapshot tests in [`tests`] pin this down.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pandem_core::SimConfig;
//! use pandem_sim::Simulation;
//!
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.start();
//! sim.step()?; // driven by the embedding application's timer
//! let frame = sim.scatter();
//! ```

pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod stepper;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Domain, ScatterPoint, Simulation, Symbol, SYMBOL_SIZE};
pub use stats::{StatsRecorder, StatsSample, SAMPLE_RATE_MS};
pub use stepper::{COLLISION_SKIP, SURGE_MULTIPLIER, SURGE_THRESHOLD};
