//! Core data structures for the forecasting pipeline.

mod forecast;
mod observation;
mod time_series;

pub use forecast::Forecast;
pub use observation::{FieldValue, ObservationRow};
pub use time_series::{Partition, Series};
