//! Country population lookup, built once per run from the remote
//! country dataset.

mod fetch;
mod table;

pub use fetch::{fetch_populations, CountryRecord, POPULATION_URL};
pub use table::PopulationTable;
