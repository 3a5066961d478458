//! `StatsOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pandem_sim::{SimObserver, StatsSample};

use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that streams every accepted stats sample into any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct StatsOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StatsOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Flush the backend.  Call once the driver stops stepping.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for StatsOutputObserver<W> {
    fn on_sample(&mut self, sample: &StatsSample) {
        let result = self.writer.write_sample(sample);
        self.store_err(result);
    }
}
