//! Splitting, evaluation and numerical helpers.

pub mod metrics;
pub mod optimization;
pub mod split;
pub mod stats;

pub use metrics::{calculate_metrics, evaluate, rmse, rmse_values, AccuracyMetrics};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use split::{train_test_split, DEFAULT_SPLIT_RATIO};
