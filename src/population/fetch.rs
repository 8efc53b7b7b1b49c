use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::population::PopulationTable;

/// Country dataset endpoint, filtered down to the three fields we consume.
pub const POPULATION_URL: &str = "https://restcountries.eu/rest/v2/all";

/// One country as reported by the population source.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub population: u64,
    #[serde(rename = "altSpellings", default)]
    pub alt_spellings: Vec<String>,
}

/// Fetch the country dataset and build the population table.
///
/// One blocking GET, no retries; HTTP and decode failures propagate to the
/// caller, as does a conflicting duplicate in the response body.
#[tracing::instrument(level = "info", skip(client))]
pub fn fetch_populations(client: &Client) -> Result<PopulationTable, PipelineError> {
    debug!("fetching {}", POPULATION_URL);
    let records: Vec<CountryRecord> = client
        .get(POPULATION_URL)
        .query(&[("fields", "name;population;altSpellings")])
        .send()?
        .error_for_status()?
        .json()?;

    let table = PopulationTable::from_records(records)?;
    info!(names = table.len(), "population table built");
    Ok(table)
}
