//! Series data structure for timestamp-indexed sensor values.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// A timestamp-indexed univariate series.
///
/// Timestamps are strictly increasing. Each value slot is `None` when the
/// observation is missing. A `Series` is never mutated after construction;
/// filtering and slicing produce new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<Option<f64>>,
    name: Option<String>,
}

impl Series {
    /// Create a new series, validating ordering and lengths.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<Option<f64>>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::TimestampError(format!(
                    "timestamps must be strictly increasing: {} follows {}",
                    timestamps[i],
                    timestamps[i - 1]
                )));
            }
        }

        Ok(Self {
            timestamps,
            values,
            name: None,
        })
    }

    /// Create a series with every value present.
    pub fn from_values(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::new(timestamps, values.into_iter().map(Some).collect())
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self {
            timestamps: vec![],
            values: vec![],
            name: None,
        }
    }

    /// Attach a name (usually the source column).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values, `None` where missing.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Get the value at a position.
    pub fn get(&self, index: usize) -> Option<(DateTime<Utc>, Option<f64>)> {
        Some((*self.timestamps.get(index)?, *self.values.get(index)?))
    }

    /// Iterate over `(timestamp, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<f64>)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Present values only, in order.
    pub fn observed(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// All values, failing if any is missing.
    pub fn complete_values(&self) -> Result<Vec<f64>> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.ok_or_else(|| {
                    ForecastError::precondition(format!(
                        "missing value at position {} ({})",
                        i, self.timestamps[i]
                    ))
                })
            })
            .collect()
    }

    /// Check if the series has missing values.
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    /// Keep only observations whose value is present and passes `keep`.
    ///
    /// Order is preserved; the source series is untouched.
    pub fn filter<F>(&self, keep: F) -> Series
    where
        F: Fn(f64) -> bool,
    {
        let (timestamps, values): (Vec<_>, Vec<_>) = self
            .iter()
            .filter(|(_, v)| v.is_some_and(&keep))
            .unzip();

        Series {
            timestamps,
            values,
            name: self.name.clone(),
        }
    }

    /// Extract the positions `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<Series> {
        if start > end {
            return Err(ForecastError::precondition("start must be <= end"));
        }
        if end > self.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.len(),
                got: end,
            });
        }

        Ok(Series {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            name: self.name.clone(),
        })
    }

    /// Split into `[0, index)` and `[index, len)`.
    pub fn split_at(&self, index: usize) -> Result<(Series, Series)> {
        Ok((self.slice(0, index)?, self.slice(index, self.len())?))
    }

    /// Whether both series share the same index, position by position.
    pub fn same_index(&self, other: &Series) -> bool {
        self.timestamps == other.timestamps
    }
}

/// Chronological train/test partition of a series.
///
/// `train` holds the earliest observations and `test` the rest; concatenating
/// their indices reproduces the source index exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub train: Series,
    pub test: Series,
}

impl Partition {
    /// Position in the source series where `test` starts.
    pub fn split_index(&self) -> usize {
        self.train.len()
    }

    /// Total number of observations across both parts.
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
