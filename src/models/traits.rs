//! Forecaster traits defining the common interface for all models.

use crate::core::{Forecast, Series};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// An unfitted model specification.
///
/// Fitting never mutates the specification; it produces an independent
/// [`FittedModel`] that owns its training state.
pub trait Forecaster {
    /// The fitted model produced by [`Forecaster::fit`].
    type Fitted: FittedModel;

    /// Fit the model to a training series.
    fn fit(&self, train: &Series) -> Result<Self::Fitted>;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// A model that has been fitted and can forecast.
pub trait FittedModel {
    /// Point forecasts aligned positionally to `index`.
    fn forecast(&self, index: &[DateTime<Utc>]) -> Result<Forecast>;

    /// Forecasts with prediction intervals at `level`.
    fn forecast_with_intervals(&self, index: &[DateTime<Utc>], level: f64) -> Result<Forecast> {
        // Default implementation just returns point predictions
        let _ = level;
        self.forecast(index)
    }

    /// In-sample one-step predictions on the training index.
    fn fitted_values(&self) -> &Series;

    /// In-sample residuals (actual - fitted) on the training index.
    fn residuals(&self) -> &Series;

    /// Get the model name.
    fn name(&self) -> &str;
}
