//! Turning raw observation rows into a prepared, filtered series.
//!
//! Preparation is a pure transform: timestamps are parsed from the split
//! date/time columns, rows are ordered chronologically, the target field is
//! selected and the validity predicate drops non-physical readings.

mod predicate;
mod timestamp;

pub use predicate::ValidityPredicate;
pub use timestamp::{parse_timestamp, TIMESTAMP_FORMAT};

use crate::core::{ObservationRow, Series};
use crate::error::{ForecastError, Result};
use tracing::debug;

/// Builds a [`Series`] for one target column out of raw rows.
#[derive(Debug, Clone)]
pub struct TimeSeriesPreparer {
    target_field: String,
    predicate: ValidityPredicate,
}

impl TimeSeriesPreparer {
    /// Create a preparer for `target_field` with the default `value > 0` filter.
    pub fn new(target_field: impl Into<String>) -> Self {
        Self {
            target_field: target_field.into(),
            predicate: ValidityPredicate::default(),
        }
    }

    /// Set the validity predicate.
    pub fn with_predicate(mut self, predicate: ValidityPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    pub fn predicate(&self) -> ValidityPredicate {
        self.predicate
    }

    /// Parse, order and select the target column, keeping missing values.
    ///
    /// Fails on the first row whose timestamp does not parse or that lacks the
    /// target column, and on duplicate timestamps.
    pub fn raw_series(&self, rows: &[ObservationRow]) -> Result<Series> {
        let mut records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let ts = parse_timestamp(row.date(), row.time(), i)?;
                let value = row.field(&self.target_field).ok_or_else(|| {
                    ForecastError::parse(
                        i,
                        format!("missing column '{}'", self.target_field),
                    )
                })?;
                Ok((i, ts, value.value()))
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable: equal timestamps keep input order, so the reported row is the later one.
        records.sort_by_key(|&(_, ts, _)| ts);

        if let Some(pair) = records.windows(2).find(|w| w[0].1 == w[1].1) {
            return Err(ForecastError::parse(
                pair[1].0,
                format!("duplicate timestamp {}", pair[1].1),
            ));
        }

        let (timestamps, values): (Vec<_>, Vec<_>) =
            records.into_iter().map(|(_, ts, v)| (ts, v)).unzip();
        Ok(Series::new(timestamps, values)?.with_name(self.target_field.clone()))
    }

    /// Prepare the filtered series: [`Self::raw_series`] then the predicate.
    pub fn prepare(&self, rows: &[ObservationRow]) -> Result<Series> {
        let raw = self.raw_series(rows)?;
        let predicate = self.predicate;
        let prepared = raw.filter(|v| predicate.test(v));

        debug!(
            target_field = %self.target_field,
            rows = rows.len(),
            kept = prepared.len(),
            dropped = raw.len() - prepared.len(),
            "prepared series"
        );

        Ok(prepared)
    }
}
