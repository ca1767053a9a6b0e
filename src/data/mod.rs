//! CSV acquisition adapter for semicolon-delimited sensor exports.
//!
//! The air-quality export looks like:
//!
//! ```text
//! Date;Time;CO(GT);PT08.S1(CO);...;T;RH;AH;;
//! 10/03/2004;18.00.00;2,6;1360;...;13,6;48,9;0,7578;;
//! ```
//!
//! Decimals use a comma, trailing empty columns are common and the file is
//! often padded with rows of bare delimiters.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::{FieldValue, ObservationRow};
use crate::error::{ForecastError, Result};
use tracing::debug;

const DATE_COLUMN: &str = "Date";
const TIME_COLUMN: &str = "Time";

/// Delimiter and decimal separator of a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: u8,
    pub decimal: char,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal: ',',
        }
    }
}

impl CsvFormat {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_decimal(mut self, decimal: char) -> Self {
        self.decimal = decimal;
        self
    }

    /// Parse a numeric cell; `NaN` and infinity tokens are not readings.
    fn parse_number(&self, raw: &str) -> Option<f64> {
        let value: f64 = if self.decimal == '.' {
            raw.parse().ok()?
        } else {
            raw.replace(self.decimal, ".").parse().ok()?
        };
        value.is_finite().then_some(value)
    }
}

/// Read observation rows in the default format.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<ObservationRow>> {
    read_observations_with(reader, CsvFormat::default())
}

/// Read observation rows from a file in the default format.
pub fn load_csv_file(path: &Path) -> Result<Vec<ObservationRow>> {
    let file = File::open(path).map_err(|e| {
        ForecastError::precondition(format!("cannot open '{}': {}", path.display(), e))
    })?;
    read_observations(BufReader::new(file))
}

/// Read observation rows from any reader.
///
/// Row numbers in errors are zero-based over data records, header excluded.
pub fn read_observations_with<R: Read>(reader: R, format: CsvFormat) -> Result<Vec<ObservationRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ForecastError::parse(0, format!("unreadable header: {}", e)))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ForecastError::parse(0, format!("missing required column '{}'", name)))
    };
    let date_idx = column(DATE_COLUMN)?;
    let time_idx = column(TIME_COLUMN)?;

    // Every other named column is numeric
    let numeric: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|&(i, h)| i != date_idx && i != time_idx && !h.is_empty())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ForecastError::parse(row, e.to_string()))?;

        let date = record.get(date_idx).unwrap_or("");
        let time = record.get(time_idx).unwrap_or("");
        if date.is_empty() && time.is_empty() {
            skipped += 1;
            continue;
        }

        let mut fields = BTreeMap::new();
        for &(idx, name) in &numeric {
            let value = match record.get(idx).unwrap_or("") {
                "" => FieldValue::Missing,
                raw => format.parse_number(raw).map(FieldValue::Value).ok_or_else(|| {
                    ForecastError::parse(row, format!("column '{}': invalid number '{}'", name, raw))
                })?,
            };
            fields.insert(name.to_string(), value);
        }

        rows.push(ObservationRow::new(date, time, fields));
    }

    debug!(rows = rows.len(), skipped, columns = numeric.len(), "read observations");

    Ok(rows)
}
