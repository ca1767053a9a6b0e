//! ARIMA (Autoregressive Integrated Moving Average) model.

use std::fmt;

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::{FittedModel, Forecaster};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{mean, population_variance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

/// Variance below which a differenced series is considered constant.
const DEGENERATE_VARIANCE: f64 = 1e-12;

/// ARIMA model order `(p, d, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ModelOrder {
    /// Create a new order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Create an order from signed components, rejecting negatives.
    pub fn try_new(p: i64, d: i64, q: i64) -> Result<Self> {
        let component = |name: &str, v: i64| {
            usize::try_from(v).map_err(|_| {
                ForecastError::precondition(format!(
                    "model order component {} must be non-negative, got {}",
                    name, v
                ))
            })
        };
        Ok(Self::new(component("p", p)?, component("d", d)?, component("q", q)?))
    }

    /// Whether a mean term is estimated. Only undifferenced models carry one.
    pub fn has_mean(&self) -> bool {
        self.d == 0
    }

    /// Number of estimated ARMA parameters (AR + MA + optional mean).
    pub fn num_params(&self) -> usize {
        self.p + self.q + usize::from(self.has_mean())
    }

    /// Smallest training length the order can be fitted on.
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q) + 2
    }
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self::new(5, 1, 1)
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.p, self.d, self.q)
    }
}

/// Optimiser settings for ARIMA estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaConfig {
    /// Maximum Nelder-Mead iterations.
    pub max_iter: usize,
    /// Relative convergence tolerance on the objective.
    pub tolerance: f64,
    /// AR and MA coefficients are kept within `[-bound, bound]`.
    pub coefficient_bound: f64,
}

impl Default for ArimaConfig {
    fn default() -> Self {
        Self {
            max_iter: 5000,
            tolerance: 1e-8,
            coefficient_bound: 0.99,
        }
    }
}

/// Unfitted ARIMA(p, d, q) estimator.
///
/// ARIMA(p, d, q) combines:
/// - AR(p): Autoregressive component
/// - I(d): Differencing for stationarity
/// - MA(q): Moving average component
///
/// Parameters are estimated by conditional maximum likelihood under Gaussian
/// innovations, which amounts to minimising the conditional sum of squares of
/// the one-step errors on the differenced series.
#[derive(Debug, Clone, Default)]
pub struct ARIMA {
    order: ModelOrder,
    config: ArimaConfig,
}

impl ARIMA {
    /// Create a new ARIMA estimator.
    pub fn new(order: ModelOrder) -> Self {
        Self {
            order,
            config: ArimaConfig::default(),
        }
    }

    /// Create an estimator with explicit optimiser settings.
    pub fn with_config(order: ModelOrder, config: ArimaConfig) -> Self {
        Self { order, config }
    }

    /// Create an AR(p) model (ARIMA with d=0, q=0).
    pub fn ar(p: usize) -> Self {
        Self::new(ModelOrder::new(p, 0, 0))
    }

    pub fn order(&self) -> ModelOrder {
        self.order
    }

    pub fn config(&self) -> &ArimaConfig {
        &self.config
    }

    /// Estimate `(mean, ar, ma)` on the differenced series.
    fn estimate(&self, diff: &[f64]) -> Result<(f64, Vec<f64>, Vec<f64>, usize)> {
        let ModelOrder { p, q, .. } = self.order;
        let has_mean = self.order.has_mean();
        let sample_mean = if has_mean { mean(diff) } else { 0.0 };

        if p == 0 && q == 0 {
            return Ok((sample_mean, vec![], vec![], 0));
        }

        let mut initial = Vec::with_capacity(self.order.num_params());
        if has_mean {
            initial.push(sample_mean);
        }
        initial.extend((0..p).map(|i| 0.1 / (i + 1) as f64));
        initial.extend((0..q).map(|i| 0.1 / (i + 1) as f64));

        let bound = self.config.coefficient_bound;
        let mut bounds = Vec::with_capacity(initial.len());
        if has_mean {
            bounds.push((f64::NEG_INFINITY, f64::INFINITY));
        }
        bounds.extend(std::iter::repeat((-bound, bound)).take(p + q));

        let n_eff = (diff.len() - p) as f64;

        let config = NelderMeadConfig {
            max_iter: self.config.max_iter,
            tolerance: self.config.tolerance,
            ..Default::default()
        };

        let result = nelder_mead(
            |params| {
                let (mu, ar, ma) = unpack(params, has_mean, p);
                sum_of_squares(&conditional_residuals(diff, ar, ma, mu), p) / n_eff
            },
            &initial,
            Some(bounds.as_slice()),
            config,
        );

        if !result.converged {
            return Err(ForecastError::Fit(format!(
                "ARIMA{} estimation did not converge after {} iterations",
                self.order, result.iterations
            )));
        }
        if !result.optimal_value.is_finite() {
            return Err(ForecastError::Fit(format!(
                "ARIMA{} estimation reached a non-finite objective",
                self.order
            )));
        }

        let (mu, ar, ma) = unpack(&result.optimal_point, has_mean, p);
        Ok((mu, ar.to_vec(), ma.to_vec(), result.iterations))
    }
}

impl Forecaster for ARIMA {
    type Fitted = FittedARIMA;

    fn fit(&self, train: &Series) -> Result<FittedARIMA> {
        let values = train.complete_values()?;
        let ModelOrder { p, d, q } = self.order;

        let needed = self.order.min_observations();
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let diff = difference(&values, d);

        if p + q > 0 && population_variance(&diff) < DEGENERATE_VARIANCE {
            return Err(ForecastError::Fit(format!(
                "training series has zero variance after {} difference(s)",
                d
            )));
        }

        let (mu, ar, ma, iterations) = self.estimate(&diff)?;

        let residuals = conditional_residuals(&diff, &ar, &ma, mu);
        let n_eff = diff.len() - p;
        let sigma2 = sum_of_squares(&residuals, p) / n_eff as f64;

        // Conditional Gaussian log-likelihood at the CSS optimum; sigma2 counts as a parameter
        let n = n_eff as f64;
        let k = (self.order.num_params() + 1) as f64;
        let log_likelihood = -0.5 * n * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0);
        let aic = -2.0 * log_likelihood + 2.0 * k;
        let bic = -2.0 * log_likelihood + k * n.ln();

        // Residuals on the differenced scale equal residuals on the original scale
        let in_sample: Vec<Option<f64>> = (0..values.len())
            .map(|i| (i >= d + p).then(|| residuals[i - d]))
            .collect();
        let fitted = Series::new(
            train.timestamps().to_vec(),
            in_sample
                .iter()
                .zip(&values)
                .map(|(r, y)| r.map(|r| y - r))
                .collect(),
        )?;
        let residual_series = Series::new(train.timestamps().to_vec(), in_sample)?;

        debug!(
            order = %self.order,
            n_obs = values.len(),
            iterations,
            mean = mu,
            ar = ?ar,
            ma = ?ma,
            sigma2,
            "fitted ARIMA"
        );

        Ok(FittedARIMA {
            order: self.order,
            mean: mu,
            ar,
            ma,
            train_values: values,
            train_end: train.timestamps().last().copied(),
            differenced: diff,
            residuals_diff: residuals,
            sigma2,
            log_likelihood,
            aic,
            bic,
            iterations,
            fitted,
            residuals: residual_series,
        })
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}

/// A fitted ARIMA model.
///
/// Owns everything needed to forecast from the end of its training series.
#[derive(Debug, Clone)]
pub struct FittedARIMA {
    order: ModelOrder,
    mean: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    train_values: Vec<f64>,
    train_end: Option<DateTime<Utc>>,
    differenced: Vec<f64>,
    residuals_diff: Vec<f64>,
    sigma2: f64,
    log_likelihood: f64,
    aic: f64,
    bic: f64,
    iterations: usize,
    fitted: Series,
    residuals: Series,
}

impl FittedARIMA {
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Get AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Get MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Mean of the differenced series (0 when `d > 0`).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Innovation variance estimate.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    pub fn aic(&self) -> f64 {
        self.aic
    }

    pub fn bic(&self) -> f64 {
        self.bic
    }

    /// Optimiser iterations spent in estimation.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Point forecasts for `steps` periods after the training series.
    pub fn predict(&self, steps: usize) -> Vec<f64> {
        if steps == 0 {
            return vec![];
        }

        let mut extended = self.differenced.clone();
        let mut innovations = self.residuals_diff.clone();

        for _ in 0..steps {
            let t = extended.len();
            let mut pred = self.mean;

            for (i, phi) in self.ar.iter().enumerate() {
                if t > i {
                    pred += phi * (extended[t - 1 - i] - self.mean);
                }
            }
            // Future innovations are zero
            for (i, theta) in self.ma.iter().enumerate() {
                if t > i {
                    pred += theta * innovations[t - 1 - i];
                }
            }

            extended.push(pred);
            innovations.push(0.0);
        }

        integrate(&extended[self.differenced.len()..], &self.train_values, self.order.d)
    }

    /// MA(∞) weights of the integrated process, `psi[0] = 1`.
    pub fn psi_weights(&self, horizon: usize) -> Vec<f64> {
        // (1 - phi_1 B - ... - phi_p B^p)(1 - B)^d
        let mut poly = Vec::with_capacity(self.ar.len() + self.order.d + 1);
        poly.push(1.0);
        poly.extend(self.ar.iter().map(|phi| -phi));
        for _ in 0..self.order.d {
            let mut next = vec![0.0; poly.len() + 1];
            for (i, c) in poly.iter().enumerate() {
                next[i] += c;
                next[i + 1] -= c;
            }
            poly = next;
        }
        let phi_star: Vec<f64> = poly[1..].iter().map(|c| -c).collect();

        let mut psi = vec![0.0; horizon];
        for j in 0..horizon {
            if j == 0 {
                psi[0] = 1.0;
                continue;
            }
            let mut value = self.ma.get(j - 1).copied().unwrap_or(0.0);
            for k in 1..=j.min(phi_star.len()) {
                value += phi_star[k - 1] * psi[j - k];
            }
            psi[j] = value;
        }
        psi
    }

    fn check_index(&self, index: &[DateTime<Utc>]) -> Result<()> {
        match (self.train_end, index.first()) {
            (Some(end), Some(first)) if *first <= end => Err(ForecastError::precondition(format!(
                "forecast index starts at {}, not after the training end {}",
                first, end
            ))),
            _ => Ok(()),
        }
    }

    /// Point forecasts, failing if the recursion diverged.
    fn finite_predictions(&self, steps: usize) -> Result<Vec<f64>> {
        let preds = self.predict(steps);
        match preds.iter().position(|v| !v.is_finite()) {
            Some(step) => Err(ForecastError::Fit(format!(
                "ARIMA{} forecast is not finite at step {}",
                self.order,
                step + 1
            ))),
            None => Ok(preds),
        }
    }
}

impl FittedModel for FittedARIMA {
    fn forecast(&self, index: &[DateTime<Utc>]) -> Result<Forecast> {
        self.check_index(index)?;
        Forecast::new(index.to_vec(), self.finite_predictions(index.len())?)
    }

    fn forecast_with_intervals(&self, index: &[DateTime<Utc>], level: f64) -> Result<Forecast> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ForecastError::precondition(format!(
                "interval level must be in (0, 1), got {}",
                level
            )));
        }
        self.check_index(index)?;

        let preds = self.finite_predictions(index.len())?;
        let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::Fit(e.to_string()))?;
        let z = normal.inverse_cdf((1.0 + level) / 2.0);

        let mut cumulative = 0.0;
        let (lower, upper): (Vec<f64>, Vec<f64>) = self
            .psi_weights(index.len())
            .iter()
            .zip(&preds)
            .map(|(psi, pred)| {
                cumulative += psi * psi;
                let se = (self.sigma2 * cumulative).sqrt();
                (pred - z * se, pred + z * se)
            })
            .unzip();

        Forecast::with_intervals(index.to_vec(), preds, lower, upper, level)
    }

    fn fitted_values(&self) -> &Series {
        &self.fitted
    }

    fn residuals(&self) -> &Series {
        &self.residuals
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}

/// One-step prediction errors of an ARMA recursion on `diff`.
///
/// The first `ar.len()` errors are conditioned to zero.
fn conditional_residuals(diff: &[f64], ar: &[f64], ma: &[f64], mean: f64) -> Vec<f64> {
    let p = ar.len();
    let mut residuals = vec![0.0; diff.len()];

    for t in p..diff.len() {
        let mut pred = mean;
        for (i, phi) in ar.iter().enumerate() {
            pred += phi * (diff[t - 1 - i] - mean);
        }
        for (i, theta) in ma.iter().enumerate() {
            if t > i {
                pred += theta * residuals[t - 1 - i];
            }
        }
        residuals[t] = diff[t] - pred;
    }

    residuals
}

/// Split an optimiser point into `(mean, ar, ma)`.
fn unpack(params: &[f64], has_mean: bool, p: usize) -> (f64, &[f64], &[f64]) {
    let offset = usize::from(has_mean);
    let mu = if has_mean { params[0] } else { 0.0 };
    (mu, &params[offset..offset + p], &params[offset + p..])
}

fn sum_of_squares(residuals: &[f64], skip: usize) -> f64 {
    residuals.iter().skip(skip).map(|r| r * r).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2004, 3, 10, 18, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::hours(i as i64)).collect()
    }

    fn make_series(values: Vec<f64>) -> Series {
        Series::from_values(make_timestamps(values.len()), values).unwrap()
    }

    /// Index continuing hourly after a series of length `n`.
    fn future_index(n: usize, steps: usize) -> Vec<DateTime<Utc>> {
        make_timestamps(n + steps)[n..].to_vec()
    }

    #[test]
    fn ar1_scenario_forecasts_towards_recent_mean() {
        let train = vec![2.0, 2.1, 2.3, 2.0, 1.9, 2.2, 2.4];
        let model = ARIMA::new(ModelOrder::new(1, 0, 0));
        let fitted = model.fit(&make_series(train.clone())).unwrap();

        let forecast = fitted.forecast(&future_index(7, 2)).unwrap();
        assert_eq!(forecast.horizon(), 2);

        let recent_mean = mean(&train);
        for value in forecast.values() {
            let value = value.unwrap();
            assert!((value - recent_mean).abs() < recent_mean.abs());
        }
    }

    #[test]
    fn arima_basic_fit() {
        let values: Vec<f64> = (0..50)
            .map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin())
            .collect();
        let fitted = ARIMA::new(ModelOrder::new(1, 1, 1))
            .fit(&make_series(values))
            .unwrap();

        assert_eq!(fitted.ar_coefficients().len(), 1);
        assert_eq!(fitted.ma_coefficients().len(), 1);
        assert_eq!(fitted.mean(), 0.0);

        let forecast = fitted.forecast(&future_index(50, 5)).unwrap();
        assert_eq!(forecast.horizon(), 5);
    }

    #[test]
    fn arima_ar1_recovers_positive_coefficient() {
        // y_t = 0.7 * y_{t-1} + e_t
        let mut values = vec![10.0];
        for i in 1..100 {
            values.push(0.7 * values[i - 1] + (i as f64 * 0.1).sin());
        }
        let fitted = ARIMA::ar(1).fit(&make_series(values)).unwrap();

        assert!(fitted.ar_coefficients()[0] > 0.3);
        assert!(fitted.sigma2() > 0.0);
    }

    #[test]
    fn arima_ma1() {
        let values: Vec<f64> = (0..100).map(|i| 10.0 + (i as f64 * 0.2).sin()).collect();
        let fitted = ARIMA::new(ModelOrder::new(0, 0, 1))
            .fit(&make_series(values))
            .unwrap();

        let forecast = fitted.forecast(&future_index(100, 5)).unwrap();
        assert_eq!(forecast.horizon(), 5);
        assert!(forecast.values().iter().all(Option::is_some));
    }

    #[test]
    fn differenced_forecast_continues_from_train_tail() {
        let values: Vec<f64> = (0..60)
            .map(|i| 10.0 + 2.0 * i as f64 + (i as f64 * 0.7).sin())
            .collect();
        let last = *values.last().unwrap();
        let fitted = ARIMA::new(ModelOrder::new(1, 1, 0))
            .fit(&make_series(values))
            .unwrap();

        let preds = fitted.predict(3);
        assert!(preds[0] > last - 5.0);
        assert!(preds[0] < last + 5.0);
    }

    #[test]
    fn white_noise_model_forecasts_the_mean() {
        let values = vec![1.0, 3.0, 2.0, 4.0, 5.0];
        let fitted = ARIMA::new(ModelOrder::new(0, 0, 0))
            .fit(&make_series(values))
            .unwrap();
        assert_eq!(fitted.iterations(), 0);
        for v in fitted.predict(3) {
            assert_relative_eq!(v, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn random_walk_forecasts_last_value() {
        let values = vec![1.0, 3.0, 2.0, 4.0, 5.0];
        let fitted = ARIMA::new(ModelOrder::new(0, 1, 0))
            .fit(&make_series(values))
            .unwrap();
        assert_eq!(fitted.predict(2), vec![5.0, 5.0]);
        assert_eq!(fitted.psi_weights(3), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn forecast_index_is_taken_positionally() {
        let values: Vec<f64> = (0..30).map(|i| 5.0 + (i as f64 * 0.9).cos()).collect();
        let fitted = ARIMA::ar(2).fit(&make_series(values)).unwrap();

        // Irregular spacing: the index is used as given
        let base = make_timestamps(31)[30];
        let index = vec![
            base,
            base + Duration::minutes(7),
            base + Duration::days(3),
        ];
        let forecast = fitted.forecast(&index).unwrap();
        assert_eq!(forecast.timestamps(), &index);

        let preds = fitted.predict(3);
        let values: Vec<f64> = forecast.values().iter().map(|v| v.unwrap()).collect();
        assert_eq!(values, preds);
    }

    #[test]
    fn forecast_before_train_end_is_rejected() {
        let fitted = ARIMA::ar(1)
            .fit(&make_series(vec![1.0, 2.0, 1.5, 2.5, 1.8]))
            .unwrap();
        let err = fitted.forecast(&make_timestamps(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }

    #[test]
    fn diverging_forecast_is_a_fit_error() {
        let mut fitted = ARIMA::ar(1)
            .fit(&make_series(vec![1.0, 2.0, 1.5, 2.5, 1.8]))
            .unwrap();
        fitted.mean = f64::NAN;

        let index = future_index(5, 3);
        let err = fitted.forecast(&index).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fit);
        assert!(err.to_string().contains("not finite"));
        assert!(fitted.forecast_with_intervals(&index, 0.9).is_err());
    }

    #[test]
    fn empty_index_gives_empty_forecast() {
        let fitted = ARIMA::ar(1)
            .fit(&make_series(vec![1.0, 2.0, 1.5, 2.5, 1.8]))
            .unwrap();
        assert_eq!(fitted.forecast(&[]).unwrap().horizon(), 0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let values: Vec<f64> = (0..80)
            .map(|i| 20.0 + (i as f64 * 0.37).sin() * 3.0 + (i % 7) as f64 * 0.2)
            .collect();
        let model = ARIMA::new(ModelOrder::new(2, 1, 1));
        let index = future_index(80, 10);

        let a = model.fit(&make_series(values.clone())).unwrap().forecast(&index).unwrap();
        let b = model.fit(&make_series(values)).unwrap().forecast(&index).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn arima_insufficient_data() {
        let model = ARIMA::new(ModelOrder::new(2, 1, 1));
        let err = model.fit(&make_series(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { needed: 5, got: 3 });
        assert_eq!(err.kind(), ErrorKind::Fit);
    }

    #[test]
    fn zero_variance_series_is_a_fit_error() {
        let constant = make_series(vec![4.0; 20]);
        let err = ARIMA::ar(1).fit(&constant).unwrap_err();
        assert!(matches!(err, ForecastError::Fit(_)));

        // Linear trend is constant after one difference
        let trend = make_series((0..20).map(|i| 1.0 + 2.0 * i as f64).collect());
        let err = ARIMA::new(ModelOrder::new(1, 1, 0)).fit(&trend).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fit);
    }

    #[test]
    fn missing_training_values_are_a_precondition_violation() {
        let series = Series::new(
            make_timestamps(6),
            vec![Some(1.0), Some(2.0), None, Some(2.0), Some(1.0), Some(3.0)],
        )
        .unwrap();
        let err = ARIMA::ar(1).fit(&series).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }

    #[test]
    fn non_convergence_is_a_fit_error() {
        let values: Vec<f64> = (0..40).map(|i| (i as f64 * 0.5).sin() + 3.0).collect();
        let config = ArimaConfig {
            max_iter: 2,
            tolerance: 1e-15,
            ..Default::default()
        };
        let err = ARIMA::with_config(ModelOrder::new(2, 0, 1), config)
            .fit(&make_series(values))
            .unwrap_err();
        assert!(err.to_string().contains("did not converge"));
    }

    #[test]
    fn fitted_values_plus_residuals_reconstruct_train() {
        let values: Vec<f64> = (0..40).map(|i| 8.0 + (i as f64 * 0.4).sin()).collect();
        let fitted = ARIMA::new(ModelOrder::new(2, 1, 0))
            .fit(&make_series(values.clone()))
            .unwrap();

        let in_sample = fitted.fitted_values();
        let residuals = fitted.residuals();
        assert_eq!(in_sample.len(), values.len());
        // Warm-up positions: d + p
        assert!(in_sample.values()[..3].iter().all(Option::is_none));
        for i in 3..values.len() {
            let f = in_sample.values()[i].unwrap();
            let r = residuals.values()[i].unwrap();
            assert_relative_eq!(f + r, values[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn information_criteria_are_finite() {
        let values: Vec<f64> = (0..50).map(|i| 10.0 + (i as f64 * 0.3).sin()).collect();
        let fitted = ARIMA::new(ModelOrder::new(1, 0, 1))
            .fit(&make_series(values))
            .unwrap();

        assert!(fitted.log_likelihood().is_finite());
        assert!(fitted.aic().is_finite());
        // ln(49) > 2, so the BIC penalty is heavier
        assert!(fitted.bic() > fitted.aic());
    }

    #[test]
    fn ar1_psi_weights_are_powers() {
        let mut values = vec![1.0];
        for i in 1..60 {
            values.push(0.6 * values[i - 1] + (i as f64 * 1.3).sin());
        }
        let fitted = ARIMA::ar(1).fit(&make_series(values)).unwrap();
        let phi = fitted.ar_coefficients()[0];
        let psi = fitted.psi_weights(4);
        for (j, w) in psi.iter().enumerate() {
            assert_relative_eq!(*w, phi.powi(j as i32), epsilon = 1e-12);
        }
    }

    #[test]
    fn intervals_widen_with_horizon() {
        let values: Vec<f64> = (0..60)
            .map(|i| 10.0 + i as f64 * 0.5 + (i as f64 * 0.3).sin())
            .collect();
        let fitted = ARIMA::new(ModelOrder::new(1, 1, 1))
            .fit(&make_series(values))
            .unwrap();

        let forecast = fitted
            .forecast_with_intervals(&future_index(60, 5), 0.95)
            .unwrap();
        assert!(forecast.has_intervals());
        assert_eq!(forecast.level(), Some(0.95));

        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        let widths: Vec<f64> = lower.iter().zip(upper).map(|(l, u)| u - l).collect();
        for w in widths.windows(2) {
            assert!(w[1] >= w[0]);
        }
        for (i, v) in forecast.values().iter().enumerate() {
            let v = v.unwrap();
            assert!(lower[i] <= v && v <= upper[i]);
        }
    }

    #[test]
    fn invalid_interval_level_is_rejected() {
        let fitted = ARIMA::ar(1)
            .fit(&make_series(vec![1.0, 2.0, 1.5, 2.5, 1.8]))
            .unwrap();
        for level in [0.0, 1.0, f64::NAN] {
            assert!(fitted.forecast_with_intervals(&future_index(5, 2), level).is_err());
        }
    }

    #[test]
    fn model_order_validation_and_display() {
        let order = ModelOrder::try_new(5, 1, 1).unwrap();
        assert_eq!(order, ModelOrder::default());
        assert_eq!(order.to_string(), "(5,1,1)");
        assert_eq!(order.num_params(), 6);
        assert_eq!(ModelOrder::new(1, 0, 0).num_params(), 2);
        assert_eq!(order.min_observations(), 8);

        let err = ModelOrder::try_new(1, -1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
    }
}
