use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::process::WideTable;
use crate::series::{LongTable, Metric, Observation};

/// Reshape a wide table into the long format: one observation per
/// (row, date), with the cell stored as `metric`'s raw value. Date becomes
/// the lookup key (non-unique across regions); Lat/Long are gone.
pub fn to_timeseries(table: &WideTable, metric: Metric) -> LongTable {
    let mut rows = Vec::with_capacity(table.rows.len() * table.dates.len());
    for wide in &table.rows {
        for (i, &date) in table.dates.iter().enumerate() {
            let mut obs = Observation::new(wide.province.clone(), wide.region.clone(), date);
            obs.metrics[metric].raw = wide.values[i];
            rows.push(obs);
        }
    }
    debug!(rows = rows.len(), metric = metric.name(), "reshaped wide table");
    LongTable { rows }
}

/// Union several single-metric long tables on (region, province, date).
///
/// The upstream dataset ships one wide file per metric; merging gives each
/// observation its full metric set. Later tables win on the rare overlap of
/// the same raw slot.
pub fn merge<I>(tables: I) -> LongTable
where
    I: IntoIterator<Item = LongTable>,
{
    type Key = (String, Option<String>, NaiveDate);
    let mut merged: BTreeMap<Key, Observation> = BTreeMap::new();

    for table in tables {
        for obs in table.rows {
            let key = (obs.region.clone(), obs.province.clone(), obs.date);
            match merged.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(obs);
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    for metric in Metric::ALL {
                        if let Some(value) = obs.metrics[metric].raw {
                            existing.metrics[metric].raw = Some(value);
                        }
                    }
                }
            }
        }
    }

    LongTable {
        rows: merged.into_values().collect(),
    }
}
