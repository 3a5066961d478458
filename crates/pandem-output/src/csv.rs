//! CSV output backend.
//!
//! One file: `stats.csv`, one row per accepted stats sample.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use pandem_sim::StatsSample;

use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes the sampled epidemic history to a single CSV file.
pub struct StatsCsvWriter {
    stats:    Writer<File>,
    finished: bool,
}

impl StatsCsvWriter {
    /// Open (or create) `stats.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stats = Writer::from_path(dir.join("stats.csv"))?;
        stats.write_record([
            "elapsed_ms",
            "turn",
            "healthy",
            "shelter",
            "infected",
            "recovered",
            "dead",
        ])?;
        Ok(Self {
            stats,
            finished: false,
        })
    }
}

impl OutputWriter for StatsCsvWriter {
    fn write_sample(&mut self, sample: &StatsSample) -> OutputResult<()> {
        self.stats.write_record(&[
            sample.elapsed_ms.to_string(),
            sample.turn.0.to_string(),
            sample.counts.healthy.to_string(),
            sample.counts.shelter.to_string(),
            sample.counts.infected.to_string(),
            sample.counts.recovered.to_string(),
            sample.counts.dead.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stats.flush()?;
        Ok(())
    }
}
