//! Forecast result structure, index-aligned to the period it predicts.

use crate::core::Series;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Point predictions over a target index, with optional prediction intervals.
///
/// Step `i` of the forecast belongs to the `i`-th timestamp of the index it
/// was produced for. Non-finite predictions are stored as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    point: Series,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
    level: Option<f64>,
}

impl Forecast {
    /// Create a forecast from point predictions over `index`.
    pub fn new(index: Vec<DateTime<Utc>>, predictions: Vec<f64>) -> Result<Self> {
        let values = predictions
            .into_iter()
            .map(|v| v.is_finite().then_some(v))
            .collect();
        Ok(Self {
            point: Series::new(index, values)?,
            lower: None,
            upper: None,
            level: None,
        })
    }

    /// Create a forecast with prediction intervals at `level`.
    pub fn with_intervals(
        index: Vec<DateTime<Utc>>,
        predictions: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        level: f64,
    ) -> Result<Self> {
        for bound in [&lower, &upper] {
            if bound.len() != predictions.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: predictions.len(),
                    got: bound.len(),
                });
            }
        }
        let mut forecast = Self::new(index, predictions)?;
        forecast.lower = Some(lower);
        forecast.upper = Some(upper);
        forecast.level = Some(level);
        Ok(forecast)
    }

    /// An empty forecast (zero steps).
    pub fn empty() -> Self {
        Self {
            point: Series::empty(),
            lower: None,
            upper: None,
            level: None,
        }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions as a series over the target index.
    pub fn series(&self) -> &Series {
        &self.point
    }

    /// Consume into the point series.
    pub fn into_series(self) -> Series {
        self.point
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        self.point.timestamps()
    }

    pub fn values(&self) -> &[Option<f64>] {
        self.point.values()
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Confidence level of the intervals, if any.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}
