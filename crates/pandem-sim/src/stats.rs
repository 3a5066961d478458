//! Time-sampled aggregate statistics.
//!
//! Samples are taken on a wall-clock cadence, not a tick cadence: the
//! controller passes elapsed real time since `start()` and the recorder
//! accepts at most one sample per interval however many ticks land inside
//! it.  The history is append-only and never rewritten — external chart
//! widgets read it as-is.

use pandem_core::{StatusCounts, Tick};

/// Default sampling cadence in milliseconds of elapsed real time.
pub const SAMPLE_RATE_MS: u64 = 100;

/// One recorded sample: when (both clocks) and the per-status census.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatsSample {
    pub elapsed_ms: u64,
    pub turn: Tick,
    pub counts: StatusCounts,
}

/// Append-only sample history with interval-based suppression.
#[derive(Clone, Debug)]
pub struct StatsRecorder {
    sample_rate_ms: u64,
    history: Vec<StatsSample>,
}

impl StatsRecorder {
    pub fn new(sample_rate_ms: u64) -> Self {
        Self {
            sample_rate_ms,
            history: Vec::new(),
        }
    }

    /// Offer a sample; returns it if accepted.
    ///
    /// Suppressed when:
    /// - the epidemic is over (`infected == 0` — steady state, nothing left
    ///   to chart), or
    /// - the history already covers every elapsed interval (prevents a
    ///   backlog of duplicate samples after a pause/resume).
    ///
    /// The acceptance rule bounds the history length by
    /// `elapsed_ms / sample_rate_ms + 1` at all times.
    pub fn record(
        &mut self,
        elapsed_ms: u64,
        turn: Tick,
        counts: StatusCounts,
    ) -> Option<&StatsSample> {
        if counts.infected == 0 {
            return None;
        }
        if self.history.len() as u64 > elapsed_ms / self.sample_rate_ms {
            return None;
        }
        self.history.push(StatsSample {
            elapsed_ms,
            turn,
            counts,
        });
        self.history.last()
    }

    pub fn history(&self) -> &[StatsSample] {
        &self.history
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn sample_rate_ms(&self) -> u64 {
        self.sample_rate_ms
    }
}
