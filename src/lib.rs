//! Aligns per-country epidemic time series on a population-scaled outbreak
//! cutoff so the curves can be compared across countries.
//!
//! The pipeline is a single synchronous pass over fully in-memory tables:
//! ingest the wide date-columned case data, reshape it into a long
//! time-series, split it per region, re-index every region relative to the
//! first day it crosses its population-scaled threshold, derive
//! delta/smoothed metrics, and concatenate everything into one combined
//! dataset sharing a days-since-cutoff index.
//!
//! ```no_run
//! use epicurve::process::{reshape, WideTable};
//! use epicurve::{fetch_populations, prepare_aligned, Metric};
//!
//! # fn main() -> Result<(), epicurve::PipelineError> {
//! let client = reqwest::blocking::Client::new();
//! let populations = fetch_populations(&client)?;
//!
//! let confirmed = WideTable::from_path("confirmed.csv")?;
//! let deaths = WideTable::from_path("deaths.csv")?;
//! let long = reshape::merge([
//!     reshape::to_timeseries(&confirmed, Metric::Confirmed),
//!     reshape::to_timeseries(&deaths, Metric::Deaths),
//! ]);
//!
//! let combined = prepare_aligned(&long, &populations, 100.0)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pipeline;
pub mod plot;
pub mod population;
pub mod process;
pub mod series;

pub use error::PipelineError;
pub use pipeline::{attach_population, prepare_aligned};
pub use plot::{plot, PlotBackend, SeriesField};
pub use population::{fetch_populations, PopulationTable};
pub use series::{
    AlignedRow, AlignedSeries, CombinedDataset, LongTable, Metric, MetricSet, MetricValues,
    Observation,
};
