//! Single-pass orchestration: split → align (or exclude) → derive →
//! concatenate into the combined cutoff-indexed dataset.

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::population::PopulationTable;
use crate::process::align::ThresholdScaler;
use crate::process::{derive, split};
use crate::series::{CombinedDataset, LongTable, Metric, Observation};

/// Attach each observation's region population and fill the per-capita raw
/// variants (`raw / population`). Regions without a population entry keep
/// missing values throughout — the aligner will exclude them.
pub fn attach_population(rows: &mut [Observation], populations: &PopulationTable) {
    for obs in rows {
        let population = populations.get(&obs.region).map(|p| p as f64);
        obs.population = population;
        if let Some(population) = population {
            for metric in Metric::BASE {
                if let Some(raw) = obs.metrics[metric].raw {
                    let per_capita = metric.per_capita().expect("base metric");
                    obs.metrics[per_capita].raw = Some(raw / population);
                }
            }
        }
    }
}

/// Run the whole alignment pipeline over a merged long table.
///
/// Per region: attach population → align on the population-scaled cutoff
/// (regions that never cross drop out) → previous/delta for every metric →
/// smoothed delta of confirmed-per-capita. Surviving rows are concatenated
/// and stably re-grouped by the shared days-since-cutoff index. Any error
/// below aborts the run; exclusion is the only tolerated per-region outcome.
#[tracing::instrument(level = "info", skip(long, populations))]
pub fn prepare_aligned(
    long: &LongTable,
    populations: &PopulationTable,
    reference_count: f64,
) -> Result<CombinedDataset, PipelineError> {
    let per_region = split::split_by_region(long);
    let scaler = ThresholdScaler::new(populations, reference_count);

    let mut combined = Vec::new();
    let mut kept = 0usize;
    let mut excluded = 0usize;

    for (region, mut series) in per_region {
        attach_population(&mut series, populations);
        match scaler.align(&series)? {
            None => {
                debug!(%region, "excluded from combined dataset");
                excluded += 1;
            }
            Some(mut aligned) => {
                derive::shift_all(&mut aligned);
                derive::smooth(&mut aligned, Metric::ConfirmedPerCapita);
                combined.extend(aligned.rows);
                kept += 1;
            }
        }
    }

    // group rows sharing a days-since-cutoff value; region order within a
    // group stays as concatenated
    combined.sort_by_key(|row| row.days_after_cutoff);

    info!(kept, excluded, rows = combined.len(), "combined aligned dataset");
    Ok(CombinedDataset { rows: combined })
}
