//! `pandem-output` — recorded-history sinks for the pandem engine.
//!
//! Two sinks are provided:
//!
//! | Sink        | Form                                                      |
//! |-------------|-----------------------------------------------------------|
//! | [`StatsCsvWriter`] | `stats.csv`, one row per accepted stats sample     |
//! | [`StripPlot`]      | an RGBA8 pixel strip, one column per plotted tick  |
//!
//! The CSV backend implements [`OutputWriter`] and is driven by
//! [`StatsOutputObserver`]; the strip plot implements
//! `pandem_sim::SimObserver` directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pandem_output::{StatsCsvWriter, StatsOutputObserver};
//!
//! let writer = StatsCsvWriter::new(Path::new("./output"))?;
//! let mut obs = StatsOutputObserver::new(writer);
//! while sim.is_running() {
//!     sim.step_with(&mut obs)?;
//! }
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod plot;
pub mod writer;


pub use csv::StatsCsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsOutputObserver;
pub use plot::{status_color, StripPlot};
pub use writer::OutputWriter;
