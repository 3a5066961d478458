//! The backend trait every output writer implements.

use pandem_sim::StatsSample;

use crate::OutputResult;

/// A sink for the sampled epidemic history.
///
/// Writers buffer internally; nothing is guaranteed on disk until
/// [`finish`][OutputWriter::finish] returns.
pub trait OutputWriter {
    /// Append one sample.
    fn write_sample(&mut self, sample: &StatsSample) -> OutputResult<()>;

    /// Append an entire recorded history in order.
    fn write_history(&mut self, history: &[StatsSample]) -> OutputResult<()> {
        for sample in history {
            self.write_sample(sample)?;
        }
        Ok(())
    }

    /// Flush and close.  Must be idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
