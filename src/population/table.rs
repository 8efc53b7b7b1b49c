use std::collections::HashMap;

use crate::error::PipelineError;
use crate::population::CountryRecord;

/// Name → population mapping covering canonical country names and every
/// alternate spelling the source reports.
///
/// Insertion is a set-union with conflict detection: re-inserting a key with
/// the same value is a no-op, a differing value is a hard error. The case
/// data and the population source disagree on one name, so `get` normalizes
/// `"United Kingdom"` to `"UK"` before the lookup; the alias lives here and
/// nowhere else.
#[derive(Debug, Default)]
pub struct PopulationTable {
    map: HashMap<String, u64>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert. Fails with
    /// [`PipelineError::ConflictingPopulation`] if `name` already maps to a
    /// different value.
    pub fn insert(&mut self, name: &str, population: u64) -> Result<(), PipelineError> {
        match self.map.get(name) {
            Some(&existing) if existing != population => {
                Err(PipelineError::ConflictingPopulation {
                    name: name.to_string(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.map.insert(name.to_string(), population);
                Ok(())
            }
        }
    }

    /// Fold fetched records into a table, registering the canonical name and
    /// every alternate spelling.
    pub fn from_records<I>(records: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = CountryRecord>,
    {
        let mut table = Self::new();
        for record in records {
            table.insert(&record.name, record.population)?;
            for alt in &record.alt_spellings {
                table.insert(alt, record.population)?;
            }
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.map.get(Self::canonical(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The case data calls the United Kingdom `"United Kingdom"`, the
    /// population source calls it `"UK"`.
    fn canonical(name: &str) -> &str {
        if name == "United Kingdom" {
            "UK"
        } else {
            name
        }
    }
}
