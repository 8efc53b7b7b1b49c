//! Boundary to an external charting collaborator. Nothing is rendered
//! here; a backend gets one polyline per region, drawn against the shared
//! days-since-cutoff index.

use std::collections::BTreeMap;

use crate::error::PipelineError;
use crate::series::{CombinedDataset, Metric, MetricValues};

/// Which slot of which metric to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Raw(Metric),
    Previous(Metric),
    Delta(Metric),
    Smooth(Metric),
}

impl SeriesField {
    pub fn value(self, values: &MetricValues) -> Option<f64> {
        match self {
            SeriesField::Raw(_) => values.raw,
            SeriesField::Previous(_) => values.previous,
            SeriesField::Delta(_) => values.delta,
            SeriesField::Smooth(_) => values.smooth,
        }
    }

    fn metric(self) -> Metric {
        match self {
            SeriesField::Raw(m)
            | SeriesField::Previous(m)
            | SeriesField::Delta(m)
            | SeriesField::Smooth(m) => m,
        }
    }

    /// Axis label, e.g. `smooth_delta_confirmed_per_capita`.
    pub fn label(self) -> String {
        match self {
            SeriesField::Raw(m) => m.name().to_string(),
            SeriesField::Previous(m) => format!("previous_{}", m.name()),
            SeriesField::Delta(m) => format!("delta_{}", m.name()),
            SeriesField::Smooth(m) => format!("smooth_delta_{}", m.name()),
        }
    }
}

/// A charting collaborator. Side-effect only; the pipeline never reads
/// anything back.
pub trait PlotBackend {
    fn line_plot(&mut self, dataset: &CombinedDataset, field: SeriesField)
        -> Result<(), PipelineError>;
}

/// Hand `dataset`/`field` to a backend.
pub fn plot(
    backend: &mut dyn PlotBackend,
    dataset: &CombinedDataset,
    field: SeriesField,
) -> Result<(), PipelineError> {
    backend.line_plot(dataset, field)
}

impl CombinedDataset {
    /// One `(days_after_cutoff, value)` polyline per region, in row order.
    /// Missing values stay in the line so a backend can decide how to draw
    /// the gap.
    pub fn series_for(&self, field: SeriesField) -> BTreeMap<String, Vec<(i64, Option<f64>)>> {
        let mut lines: BTreeMap<String, Vec<(i64, Option<f64>)>> = BTreeMap::new();
        for row in &self.rows {
            let values = &row.observation.metrics[field.metric()];
            lines
                .entry(row.observation.region.clone())
                .or_default()
                .push((row.days_after_cutoff, field.value(values)));
        }
        lines
    }
}
