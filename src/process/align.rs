use tracing::debug;

use crate::error::PipelineError;
use crate::population::PopulationTable;
use crate::series::{AlignedRow, AlignedSeries, Metric, Observation};

/// Region whose population anchors the threshold scaling.
pub const DEFAULT_REFERENCE_REGION: &str = "US";

/// Scales a reference case count into a per-region threshold.
///
/// With a reference count of 100 against the US population, a region's
/// threshold `n` is the count that represents the same share of that
/// region's population. The population table is an explicit dependency,
/// passed in by reference.
pub struct ThresholdScaler<'a> {
    populations: &'a PopulationTable,
    reference_region: &'a str,
    reference_count: f64,
}

impl<'a> ThresholdScaler<'a> {
    pub fn new(populations: &'a PopulationTable, reference_count: f64) -> Self {
        ThresholdScaler {
            populations,
            reference_region: DEFAULT_REFERENCE_REGION,
            reference_count,
        }
    }

    pub fn with_reference_region(mut self, region: &'a str) -> Self {
        self.reference_region = region;
        self
    }

    /// `population * reference_count / reference_population`. A missing
    /// reference region is a hard error, not a filtering outcome.
    pub fn threshold_for(&self, population: f64) -> Result<f64, PipelineError> {
        let reference_population = self
            .populations
            .get(self.reference_region)
            .ok_or_else(|| {
                PipelineError::UnknownReferenceRegion(self.reference_region.to_string())
            })? as f64;
        Ok(population * self.reference_count / reference_population)
    }

    /// Re-index one region's date-sorted series relative to the first date
    /// its confirmed count strictly exceeds the scaled threshold.
    ///
    /// Rows up to and including the cutoff date are discarded; the rest are
    /// indexed by whole days since the cutoff (1, 2, …). `Ok(None)` means
    /// the region never crossed the threshold (or has no population to
    /// scale against) and drops out of the pipeline. Multi-region input is
    /// a contract violation.
    pub fn align(&self, series: &[Observation]) -> Result<Option<AlignedSeries>, PipelineError> {
        let first = match series.first() {
            Some(first) => first,
            None => return Ok(None),
        };

        let mut regions: Vec<String> = Vec::new();
        for obs in series {
            if !regions.iter().any(|r| r == &obs.region) {
                regions.push(obs.region.clone());
            }
        }
        if regions.len() > 1 {
            return Err(PipelineError::MultipleRegions(regions));
        }

        let population = match first.population {
            Some(population) => population,
            None => {
                debug!(region = %first.region, "no population, excluding");
                return Ok(None);
            }
        };
        let n = self.threshold_for(population)?;

        let cutoff = series.iter().find(|obs| {
            obs.metrics[Metric::Confirmed]
                .raw
                .map_or(false, |confirmed| confirmed > n)
        });
        let cutoff_date = match cutoff {
            Some(obs) => obs.date,
            None => {
                debug!(region = %first.region, threshold = n, "never crossed threshold");
                return Ok(None);
            }
        };

        let rows: Vec<AlignedRow> = series
            .iter()
            .filter(|obs| obs.date > cutoff_date)
            .map(|obs| AlignedRow {
                days_after_cutoff: (obs.date - cutoff_date).num_days(),
                observation: obs.clone(),
            })
            .collect();

        debug!(
            region = %first.region,
            threshold = n,
            cutoff = %cutoff_date,
            rows = rows.len(),
            "aligned series on cutoff"
        );
        Ok(Some(AlignedSeries {
            region: first.region.clone(),
            rows,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;

    fn series(region: &str, population: f64, confirmed: &[f64]) -> Vec<Observation> {
        confirmed
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut obs = Observation::new(
                    None,
                    region.to_string(),
                    NaiveDate::from_ymd_opt(2020, 3, 1).unwrap() + chrono::Days::new(i as u64),
                );
                obs.population = Some(population);
                obs.metrics[Metric::Confirmed].raw = Some(count);
                obs
            })
            .collect()
    }

    fn populations() -> PopulationTable {
        let mut table = PopulationTable::new();
        table.insert("US", 2000).unwrap();
        table
    }

    #[test]
    fn threshold_scales_with_region_population() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        // 100 cases in a population of 2000 → 5% → 50 for a population of 1000
        assert_eq!(scaler.threshold_for(1000.0)?, 50.0);
        Ok(())
    }

    #[test]
    fn missing_reference_region_is_fatal() {
        let populations = PopulationTable::new();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        match scaler.threshold_for(1000.0) {
            Err(PipelineError::UnknownReferenceRegion(region)) => assert_eq!(region, "US"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn reindexes_strictly_after_the_first_crossing() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        let rows = series("A", 1000.0, &[0.0, 0.0, 50.0, 120.0, 200.0]);

        let aligned = scaler.align(&rows)?.expect("A crosses the threshold");
        assert_eq!(aligned.region, "A");
        assert_eq!(aligned.rows.len(), 2);

        // n = 50 and the comparison is strict, so 50.0 itself is no crossing;
        // day 4 (count 120) is the cutoff and is itself excluded.
        let days: Vec<i64> = aligned.rows.iter().map(|r| r.days_after_cutoff).collect();
        assert_eq!(days, vec![1, 2]);
        let confirmed: Vec<Option<f64>> = aligned
            .rows
            .iter()
            .map(|r| r.observation.metrics[Metric::Confirmed].raw)
            .collect();
        assert_eq!(confirmed, vec![Some(120.0), Some(200.0)]);
        Ok(())
    }

    #[test]
    fn day_indices_follow_calendar_gaps() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        let mut rows = series("A", 1000.0, &[60.0, 70.0, 80.0]);
        // skip a calendar day between the last two observations
        rows[2].date = rows[1].date + chrono::Days::new(2);

        let aligned = scaler.align(&rows)?.unwrap();
        let days: Vec<i64> = aligned.rows.iter().map(|r| r.days_after_cutoff).collect();
        assert_eq!(days, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn region_never_crossing_is_excluded_not_an_error() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        let rows = series("Tiny", 100.0, &[0.0, 1.0, 2.0]);
        assert!(scaler.align(&rows)?.is_none());
        Ok(())
    }

    #[test]
    fn region_without_population_is_excluded() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        let mut rows = series("A", 1000.0, &[100.0, 200.0]);
        for obs in &mut rows {
            obs.population = None;
        }
        assert!(scaler.align(&rows)?.is_none());
        Ok(())
    }

    #[test]
    fn multi_region_input_is_a_contract_violation() {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        let mut rows = series("A", 1000.0, &[100.0, 200.0]);
        rows.extend(series("B", 1000.0, &[100.0, 200.0]));

        match scaler.align(&rows) {
            Err(PipelineError::MultipleRegions(regions)) => {
                assert_eq!(regions, vec!["A".to_string(), "B".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_series_aligns_to_nothing() -> Result<()> {
        let populations = populations();
        let scaler = ThresholdScaler::new(&populations, 100.0);
        assert!(scaler.align(&[])?.is_none());
        Ok(())
    }
}
