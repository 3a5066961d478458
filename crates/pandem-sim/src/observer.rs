//! Observer trait for the external rendering layer.
//!
//! The engine never self-schedules and never pushes pixels; the embedding
//! application drives `step()` from its own timer and reacts to these hooks.
//! All methods have default no-op implementations.

use pandem_core::{StatusCounts, Tick};

use crate::StatsSample;

/// Callbacks invoked at the end of every [`crate::Simulation::step_with`]
/// call.
pub trait SimObserver {
    /// Called after each completed step with the fresh per-status counts.
    fn on_step_end(&mut self, _turn: Tick, _counts: &StatusCounts) {}

    /// Called when the stats recorder accepted a sample this step (at most
    /// once per sampling interval).
    fn on_sample(&mut self, _sample: &StatsSample) {}
}

/// A [`SimObserver`] that does nothing.  Used by `step()` when the caller
/// polls state instead of subscribing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
