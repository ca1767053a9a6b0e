//! Accuracy metrics for forecast evaluation.
//!
//! Actuals and forecasts are aligned by position. Pairs where either side is
//! missing are dropped before scoring; if nothing is left the evaluation fails
//! instead of reporting a perfect score.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Accuracy metrics for evaluating forecast performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (None if zeros in actual)
    pub mape: Option<f64>,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
    /// Number of pairs that were scored.
    pub n_scored: usize,
    /// Number of pairs dropped because a side was missing.
    pub n_dropped: usize,
}

/// Root mean squared error of a forecast against the test series it was made for.
///
/// Both must share the same index, position by position.
pub fn rmse(test: &Series, forecast: &Forecast) -> Result<f64> {
    let (actual, predicted, _) = aligned_pairs(test, forecast.series())?;
    rmse_values(&actual, &predicted)
}

/// Calculate all accuracy metrics of a forecast against its test series.
pub fn evaluate(test: &Series, forecast: &Forecast) -> Result<AccuracyMetrics> {
    let (actual, predicted, n_dropped) = aligned_pairs(test, forecast.series())?;
    let mut metrics = calculate_metrics(&actual, &predicted)?;
    metrics.n_dropped = n_dropped;
    Ok(metrics)
}

/// RMSE between two aligned, complete slices.
///
/// # Example
/// ```
/// use sensor_forecast::utils::metrics::rmse_values;
///
/// assert_eq!(rmse_values(&[5.0, 6.0], &[4.0, 7.0]).unwrap(), 1.0);
/// assert!(rmse_values(&[], &[]).is_err());
/// ```
pub fn rmse_values(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;
    Ok(mse(actual, predicted).sqrt())
}

/// Calculate accuracy metrics between aligned, complete slices.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;

    // MAE
    let mae: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse = mse(actual, predicted);

    // MAPE (only if no zeros in actual)
    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    // SMAPE
    let smape: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / n;

    Ok(AccuracyMetrics {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
        smape,
        n_scored: actual.len(),
        n_dropped: 0,
    })
}

/// Pair up present values of two series sharing one index.
///
/// Returns `(actual, predicted, dropped)`.
fn aligned_pairs(actual: &Series, predicted: &Series) -> Result<(Vec<f64>, Vec<f64>, usize)> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if !actual.same_index(predicted) {
        return Err(ForecastError::precondition(
            "forecast index is not aligned with the test index",
        ));
    }

    let (a, p): (Vec<f64>, Vec<f64>) = actual
        .values()
        .iter()
        .zip(predicted.values())
        .filter_map(|(a, p)| Some(((*a)?, (*p)?)))
        .unzip();
    let dropped = actual.len() - a.len();

    Ok((a, p, dropped))
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::EmptyEvaluation);
    }
    Ok(())
}

fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn index(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2005, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::hours(i as i64)).collect()
    }

    fn test_series(values: Vec<Option<f64>>) -> Series {
        Series::new(index(values.len()), values).unwrap()
    }

    #[test]
    fn perfect_forecast_scores_exactly_zero() {
        let test = test_series(vec![Some(5.0), Some(6.0)]);
        let forecast = Forecast::new(index(2), vec![5.0, 6.0]).unwrap();
        assert_eq!(rmse(&test, &forecast).unwrap(), 0.0);
    }

    #[test]
    fn unit_errors_score_one() {
        let test = test_series(vec![Some(5.0), Some(6.0)]);
        let forecast = Forecast::new(index(2), vec![4.0, 7.0]).unwrap();
        assert_eq!(rmse(&test, &forecast).unwrap(), 1.0);
    }

    #[test]
    fn missing_pairs_are_dropped() {
        let test = test_series(vec![Some(5.0), None, Some(6.0), Some(1.0)]);
        let forecast = Forecast::new(index(4), vec![4.0, 100.0, 7.0, f64::NAN]).unwrap();

        assert_eq!(rmse(&test, &forecast).unwrap(), 1.0);

        let metrics = evaluate(&test, &forecast).unwrap();
        assert_eq!(metrics.n_scored, 2);
        assert_eq!(metrics.n_dropped, 2);
    }

    #[test]
    fn no_valid_pairs_is_an_empty_evaluation() {
        let test = test_series(vec![None, Some(2.0)]);
        let forecast = Forecast::new(index(2), vec![1.0, f64::NAN]).unwrap();
        let err = rmse(&test, &forecast).unwrap_err();
        assert_eq!(err, ForecastError::EmptyEvaluation);
    }

    #[test]
    fn empty_test_is_an_empty_evaluation() {
        let err = rmse(&Series::empty(), &Forecast::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyEvaluation);
    }

    #[test]
    fn misaligned_index_is_rejected() {
        let test = test_series(vec![Some(1.0), Some(2.0)]);
        let shifted: Vec<_> = index(3)[1..].to_vec();
        let forecast = Forecast::new(shifted, vec![1.0, 2.0]).unwrap();
        let err = rmse(&test, &forecast).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let test = test_series(vec![Some(1.0), Some(2.0)]);
        let forecast = Forecast::new(index(1), vec![1.0]).unwrap();
        assert!(matches!(
            rmse(&test, &forecast),
            Err(ForecastError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn calculate_metrics_known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // Errors: 0.5, 0.5, 0.5, 0.5, 0.5

        let metrics = calculate_metrics(&actual, &predicted).unwrap();

        assert_relative_eq!(metrics.mae, 0.5, epsilon = 1e-10);
        assert_relative_eq!(metrics.mse, 0.25, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-10);
        assert_eq!(metrics.n_scored, 5);
    }

    #[test]
    fn calculate_metrics_mape_with_zeros() {
        let actual = vec![0.0, 1.0, 2.0];
        let predicted = vec![0.1, 1.1, 2.1];

        let metrics = calculate_metrics(&actual, &predicted).unwrap();

        assert!(metrics.mape.is_none()); // Can't compute MAPE with zeros
        assert!(metrics.smape.is_finite()); // SMAPE should still work
    }

    #[test]
    fn rmse_values_is_never_negative() {
        let r = rmse_values(&[1.0, -3.0, 2.0], &[-1.0, 3.0, 2.5]).unwrap();
        assert!(r > 0.0);
    }
}
