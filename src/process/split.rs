use std::collections::BTreeMap;

use tracing::debug;

use crate::series::{LongTable, Observation};

/// Partition a long table into independent per-region series, each stably
/// sorted ascending by date. Ties on date (multiple provinces of one
/// region) keep their input order.
pub fn split_by_region(table: &LongTable) -> BTreeMap<String, Vec<Observation>> {
    let mut fragments: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
    for obs in &table.rows {
        fragments
            .entry(obs.region.clone())
            .or_default()
            .push(obs.clone());
    }
    for series in fragments.values_mut() {
        series.sort_by_key(|obs| obs.date);
    }
    debug!(regions = fragments.len(), "split long table by region");
    fragments
}
