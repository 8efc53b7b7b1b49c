//! Table operations: CSV ingestion, wide-to-long reshaping, per-region
//! splitting, cutoff alignment, and derived metrics.

pub mod align;
pub mod date_parser;
pub mod derive;
pub mod reshape;
pub mod split;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::PipelineError;
use date_parser::parse_date_header;

/// Fixed identifier columns of the wide input table, in order. This exact
/// header shape is the contract with the upstream dataset.
pub const PROVINCE_COL: &str = "Province/State";
pub const REGION_COL: &str = "Country/Region";
pub const LAT_COL: &str = "Lat";
pub const LONG_COL: &str = "Long";

const DATE_COLS_START: usize = 4;

/// Wide input table: one column per calendar date. Lat/Long are validated
/// in the header and then dropped — nothing downstream uses them.
#[derive(Debug)]
pub struct WideTable {
    /// Parsed date headers, in column order.
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<WideRow>,
}

/// One region row of the wide table; `values[i]` belongs to `dates[i]`.
#[derive(Debug)]
pub struct WideRow {
    pub province: Option<String>,
    pub region: String,
    pub values: Vec<Option<f64>>,
}

impl WideTable {
    /// Parse a wide CSV from any reader.
    ///
    /// A missing fixed column or an unparseable date header aborts the load;
    /// empty cells become missing values, non-numeric non-empty cells are an
    /// error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = rdr.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(PipelineError::MissingColumn(PROVINCE_COL.to_string())),
        };

        // 1) validate the fixed identifier columns
        for (idx, expected) in [PROVINCE_COL, REGION_COL, LAT_COL, LONG_COL]
            .iter()
            .enumerate()
        {
            if header.get(idx).map(str::trim) != Some(*expected) {
                return Err(PipelineError::MissingColumn(expected.to_string()));
            }
        }

        // 2) parse every date header up front
        let mut raw_headers = Vec::new();
        let mut dates = Vec::new();
        for cell in header.iter().skip(DATE_COLS_START) {
            let date = parse_date_header(cell)
                .ok_or_else(|| PipelineError::BadDateHeader(cell.to_string()))?;
            raw_headers.push(cell.to_string());
            dates.push(date);
        }

        // 3) data rows; Lat/Long cells are skipped outright
        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let province = match record.get(0).map(str::trim) {
                Some("") | None => None,
                Some(p) => Some(p.to_string()),
            };
            let region = record
                .get(1)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| PipelineError::MissingColumn(REGION_COL.to_string()))?
                .to_string();

            let mut values = Vec::with_capacity(dates.len());
            for i in 0..dates.len() {
                let cell = record.get(DATE_COLS_START + i).map(str::trim).unwrap_or("");
                if cell.is_empty() {
                    values.push(None);
                } else {
                    let value =
                        cell.parse::<f64>()
                            .map_err(|_| PipelineError::InvalidNumber {
                                column: raw_headers[i].clone(),
                                value: cell.to_string(),
                            })?;
                    values.push(Some(value));
                }
            }
            rows.push(WideRow {
                province,
                region,
                values,
            });
        }

        debug!(
            rows = rows.len(),
            dates = dates.len(),
            "loaded wide table"
        );
        Ok(WideTable { dates, rows })
    }

    #[tracing::instrument(level = "info", skip(path), fields(file = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}
