//! ARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - ARIMA estimation with arbitrary (p, d, q) orders
//! - Point forecasts and Gaussian prediction intervals
//! - Differencing helpers

mod diff;
mod model;

pub use diff::{difference, integrate};
pub use model::{ArimaConfig, FittedARIMA, ModelOrder, ARIMA};
