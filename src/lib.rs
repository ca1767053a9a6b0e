//! # sensor-forecast
//!
//! ARIMA forecasting pipeline for sensor time series.
//!
//! Raw observation rows are turned into a filtered, chronologically ordered
//! series, split into a training prefix and a testing suffix, an ARIMA(p,d,q)
//! model is fitted on the prefix and its forecast over the suffix is scored
//! with RMSE. Results can be rendered into plot-ready chart views.
//!
//! ```no_run
//! use sensor_forecast::prelude::*;
//!
//! let file = std::fs::File::open("AirQualityUCI.csv")?;
//! let rows = sensor_forecast::data::read_observations(file)?;
//!
//! let result = ForecastPipeline::new(PipelineConfig::default()).run(&rows)?;
//! println!("RMSE: {:.4}", result.rmse);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prepare;
pub mod utils;
pub mod views;

pub use error::{ErrorKind, ForecastError, Result};

pub mod prelude {
    pub use crate::core::{FieldValue, Forecast, ObservationRow, Partition, Series};
    pub use crate::error::{ErrorKind, ForecastError, Result};
    pub use crate::models::{FittedModel, Forecaster, ModelOrder, ARIMA};
    pub use crate::pipeline::{ForecastPipeline, PipelineConfig, PipelineResult};
    pub use crate::prepare::{TimeSeriesPreparer, ValidityPredicate};
    pub use crate::utils::{evaluate, rmse, train_test_split, AccuracyMetrics};
    pub use crate::views::{render, ChartView};
}
