use std::ops::{Index, IndexMut};

use chrono::NaiveDate;
use serde::Serialize;

/// The fixed set of tracked metrics.
///
/// Derived columns are not extra metrics: every metric carries its own
/// raw/previous/delta/smooth slots in [`MetricValues`], so there is no
/// runtime column-name assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Confirmed,
    Recovered,
    Deaths,
    ConfirmedPerCapita,
    RecoveredPerCapita,
    DeathsPerCapita,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Confirmed,
        Metric::Recovered,
        Metric::Deaths,
        Metric::ConfirmedPerCapita,
        Metric::RecoveredPerCapita,
        Metric::DeathsPerCapita,
    ];

    /// The three counts reported directly by the case data; the per-capita
    /// variants are derived from these once a population is attached.
    pub const BASE: [Metric; 3] = [Metric::Confirmed, Metric::Recovered, Metric::Deaths];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Recovered => "recovered",
            Metric::Deaths => "deaths",
            Metric::ConfirmedPerCapita => "confirmed_per_capita",
            Metric::RecoveredPerCapita => "recovered_per_capita",
            Metric::DeathsPerCapita => "deaths_per_capita",
        }
    }

    /// Per-capita counterpart of a base metric; `None` for metrics that are
    /// already per-capita.
    pub fn per_capita(self) -> Option<Metric> {
        match self {
            Metric::Confirmed => Some(Metric::ConfirmedPerCapita),
            Metric::Recovered => Some(Metric::RecoveredPerCapita),
            Metric::Deaths => Some(Metric::DeathsPerCapita),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Metric::Confirmed => 0,
            Metric::Recovered => 1,
            Metric::Deaths => 2,
            Metric::ConfirmedPerCapita => 3,
            Metric::RecoveredPerCapita => 4,
            Metric::DeathsPerCapita => 5,
        }
    }
}

/// One metric's value plus its derived columns. `None` means missing (no
/// data, no previous row, no full smoothing window) — there are no NaN
/// sentinels anywhere in the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricValues {
    pub raw: Option<f64>,
    pub previous: Option<f64>,
    pub delta: Option<f64>,
    /// Centered 3-point average of `delta`.
    pub smooth: Option<f64>,
}

/// Fixed-size store of [`MetricValues`], indexable by [`Metric`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSet {
    values: [MetricValues; 6],
}

impl Index<Metric> for MetricSet {
    type Output = MetricValues;

    fn index(&self, metric: Metric) -> &MetricValues {
        &self.values[metric.slot()]
    }
}

impl IndexMut<Metric> for MetricSet {
    fn index_mut(&mut self, metric: Metric) -> &mut MetricValues {
        &mut self.values[metric.slot()]
    }
}

/// One (region, date) row of the long-format table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Sub-region identifier from the source data, empty for most countries.
    pub province: Option<String>,
    pub region: String,
    pub date: NaiveDate,
    /// Attached by the pipeline from the population table; missing when the
    /// region has no entry.
    pub population: Option<f64>,
    pub metrics: MetricSet,
}

impl Observation {
    pub fn new(province: Option<String>, region: String, date: NaiveDate) -> Self {
        Observation {
            province,
            region,
            date,
            population: None,
            metrics: MetricSet::default(),
        }
    }
}

/// Long-format table: one row per (region, date) observation, keyed by date.
/// Dates are not unique across regions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LongTable {
    pub rows: Vec<Observation>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A row of a cutoff-relative series: the observation plus its integer
/// days-since-cutoff index (≥ 1, the cutoff day itself is excluded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub days_after_cutoff: i64,
    pub observation: Observation,
}

/// One region's series re-indexed relative to its epidemic-start cutoff.
#[derive(Debug, Clone, Serialize)]
pub struct AlignedSeries {
    pub region: String,
    pub rows: Vec<AlignedRow>,
}

/// Row-wise union of every surviving region's aligned series, grouped by
/// the shared days-since-cutoff index. Rows from different regions share
/// index values on purpose — that is what lines the curves up.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CombinedDataset {
    pub rows: Vec<AlignedRow>,
}

impl CombinedDataset {
    /// Region names present in the dataset, deduplicated, in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            let region = row.observation.region.as_str();
            if !seen.contains(&region) {
                seen.push(region);
            }
        }
        seen
    }
}
