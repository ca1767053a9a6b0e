//! Forecasting models.

mod traits;

pub mod arima;

pub use arima::{ArimaConfig, FittedARIMA, ModelOrder, ARIMA};
pub use traits::{FittedModel, Forecaster};
