//! Chronological train/test partitioning.

use crate::core::{Partition, Series};
use crate::error::{ForecastError, Result};

/// Default share of observations used for training.
pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;

/// Position where the test suffix starts: `floor(ratio * len)`.
pub fn split_point(len: usize, ratio: f64) -> Result<usize> {
    validate_ratio(ratio)?;
    Ok(((len as f64) * ratio).floor() as usize)
}

/// Check that `ratio` is a finite value strictly inside (0, 1).
pub fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(ForecastError::precondition(format!(
            "split ratio must be in (0, 1), got {}",
            ratio
        )))
    }
}

/// Partition `series` into its earliest `floor(ratio * len)` observations and
/// the remaining suffix.
///
/// No shuffling: chronological position is the only criterion. An empty series
/// yields two empty parts; a split point equal to the length yields an empty
/// test part.
///
/// # Example
/// ```
/// use sensor_forecast::core::Series;
/// use sensor_forecast::utils::split::train_test_split;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let base = Utc.with_ymd_and_hms(2004, 3, 10, 18, 0, 0).unwrap();
/// let index: Vec<_> = (0..10).map(|i| base + Duration::hours(i)).collect();
/// let series = Series::from_values(index, (0..10).map(|i| i as f64).collect()).unwrap();
///
/// let partition = train_test_split(&series, 0.8).unwrap();
/// assert_eq!(partition.train.len(), 8);
/// assert_eq!(partition.test.len(), 2);
/// ```
pub fn train_test_split(series: &Series, ratio: f64) -> Result<Partition> {
    let at = split_point(series.len(), ratio)?;
    let (train, test) = series.split_at(at)?;
    Ok(Partition { train, test })
}
