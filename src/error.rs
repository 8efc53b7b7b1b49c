use thiserror::Error;

/// Everything that can abort a pipeline run.
///
/// A region that never crosses its threshold is *not* an error; the aligner
/// reports that as `Ok(None)` and the pipeline drops the region.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A country name (canonical or alternate spelling) was inserted twice
    /// with differing population values.
    #[error("{name} already in population table with a differing value")]
    ConflictingPopulation { name: String },

    /// A single-region operation received rows from more than one region.
    #[error("expected rows from a single region, found {0:?}")]
    MultipleRegions(Vec<String>),

    /// A date column header did not match the fixed `M/D/YY` format.
    #[error("date column header {0:?} does not match M/D/YY")]
    BadDateHeader(String),

    /// The wide input table is missing one of its fixed identifier columns.
    #[error("missing column {0:?} in header row")]
    MissingColumn(String),

    /// A non-empty cell in a date column failed to parse as a number.
    #[error("cell {value:?} in column {column:?} is not numeric")]
    InvalidNumber { column: String, value: String },

    /// The reference region used for threshold scaling has no population
    /// entry.
    #[error("reference region {0:?} not present in population table")]
    UnknownReferenceRegion(String),

    #[error("population fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
