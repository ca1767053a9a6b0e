//! End-to-end forecasting pipeline: prepare, split, fit, forecast, evaluate.

use crate::core::{Forecast, ObservationRow, Series};
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, Forecaster, ModelOrder, ARIMA};
use crate::prepare::{TimeSeriesPreparer, ValidityPredicate};
use crate::utils::metrics::{evaluate, AccuracyMetrics};
use crate::utils::split::{train_test_split, validate_ratio, DEFAULT_SPLIT_RATIO};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default target column of the air-quality export.
pub const DEFAULT_TARGET_FIELD: &str = "CO(GT)";

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column forecast by the pipeline.
    pub target_field: String,
    /// Filter applied to prepared values.
    pub validity_predicate: ValidityPredicate,
    /// Fraction of the prepared series used for training.
    pub split_ratio: f64,
    /// ARIMA order `(p, d, q)`.
    pub model_order: ModelOrder,
    /// Confidence level of prediction intervals; no intervals when `None`.
    pub interval_level: Option<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_field: DEFAULT_TARGET_FIELD.to_string(),
            validity_predicate: ValidityPredicate::default(),
            split_ratio: DEFAULT_SPLIT_RATIO,
            model_order: ModelOrder::default(),
            interval_level: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_target_field(mut self, target_field: impl Into<String>) -> Self {
        self.target_field = target_field.into();
        self
    }

    pub fn with_validity_predicate(mut self, predicate: ValidityPredicate) -> Self {
        self.validity_predicate = predicate;
        self
    }

    pub fn with_split_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
        self
    }

    pub fn with_model_order(mut self, order: ModelOrder) -> Self {
        self.model_order = order;
        self
    }

    pub fn with_interval_level(mut self, level: f64) -> Self {
        self.interval_level = Some(level);
        self
    }

    /// Check the configuration before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.target_field.is_empty() {
            return Err(ForecastError::precondition("target field must not be empty"));
        }
        validate_ratio(self.split_ratio)?;
        if let Some(level) = self.interval_level {
            if !(level > 0.0 && level < 1.0) {
                return Err(ForecastError::precondition(format!(
                    "interval level must be in (0, 1), got {}",
                    level
                )));
            }
        }
        Ok(())
    }
}

/// Everything a run produced, for scoring and presentation.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Prepared (filtered, ordered) series.
    pub prepared: Series,
    pub train: Series,
    pub test: Series,
    /// Forecast over exactly the test index.
    pub forecast: Forecast,
    /// In-sample fitted values over the train index.
    pub fitted: Series,
    /// Root mean squared error of the forecast against test.
    pub rmse: f64,
    pub metrics: AccuracyMetrics,
    pub order: ModelOrder,
}

/// Orchestrates one forecasting run.
///
/// Runs share no state; a pipeline can be used from several threads.
#[derive(Debug, Clone, Default)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline on raw observation rows.
    ///
    /// The first failing stage aborts the run and its error is returned as is.
    pub fn run(&self, rows: &[ObservationRow]) -> Result<PipelineResult> {
        self.config.validate()?;

        let preparer = TimeSeriesPreparer::new(self.config.target_field.clone())
            .with_predicate(self.config.validity_predicate);
        let prepared = preparer.prepare(rows)?;

        info!(rows = rows.len(), prepared = prepared.len(), "prepared input");
        self.run_prepared(prepared)
    }

    /// Run the pipeline on an already prepared series.
    pub fn run_series(&self, series: Series) -> Result<PipelineResult> {
        self.config.validate()?;
        self.run_prepared(series)
    }

    fn run_prepared(&self, prepared: Series) -> Result<PipelineResult> {
        if prepared.is_empty() {
            return Err(ForecastError::precondition(
                "prepared series is empty; no observations passed the validity predicate",
            ));
        }

        let partition = train_test_split(&prepared, self.config.split_ratio)?;
        debug!(train = partition.train.len(), test = partition.test.len(), "split series");

        let order = self.config.model_order;
        let model = ARIMA::new(order);
        let fitted = model.fit(&partition.train)?;

        let index = partition.test.timestamps();
        let forecast = match self.config.interval_level {
            Some(level) => fitted.forecast_with_intervals(index, level)?,
            None => fitted.forecast(index)?,
        };

        let metrics = evaluate(&partition.test, &forecast)?;

        info!(
            order = %order,
            train = partition.train.len(),
            test = partition.test.len(),
            rmse = metrics.rmse,
            "forecast evaluated"
        );

        Ok(PipelineResult {
            fitted: fitted.fitted_values().clone(),
            rmse: metrics.rmse,
            metrics,
            order,
            forecast,
            train: partition.train,
            test: partition.test,
            prepared,
        })
    }
}
