//! Plot-ready chart data for the dashboard views.
//!
//! Rendering produces plain serializable data; drawing is left to whatever
//! front end consumes it.

use std::fmt;
use std::str::FromStr;

use crate::core::Series;
use crate::error::ForecastError;
use crate::pipeline::PipelineResult;
use crate::utils::stats::{autocorrelation, histogram};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of equal-width bins in the histogram view.
pub const HISTOGRAM_BINS: usize = 30;

/// The closed set of dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartView {
    Original,
    Histogram,
    Autocorrelation,
    Scatter,
    Residuals,
}

impl ChartView {
    pub const ALL: [ChartView; 5] = [
        Self::Original,
        Self::Histogram,
        Self::Autocorrelation,
        Self::Scatter,
        Self::Residuals,
    ];

    /// Stable identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Histogram => "histogram",
            Self::Autocorrelation => "autocorrelation",
            Self::Scatter => "scatter",
            Self::Residuals => "residuals",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "Original Time Series",
            Self::Histogram => "Histogram",
            Self::Autocorrelation => "Autocorrelation Plot",
            Self::Scatter => "Scatter Plot with ARIMA Forecast",
            Self::Residuals => "Residuals Plot",
        }
    }
}

impl fmt::Display for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartView {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|v| v.id()).collect();
                ForecastError::precondition(format!(
                    "unknown view '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Lines,
    Markers,
    Bars,
}

/// An x coordinate: a timestamp or a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Time(DateTime<Utc>),
    Number(f64),
}

/// One named series of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub mode: TraceMode,
    pub x: Vec<XValue>,
    pub y: Vec<f64>,
}

impl Trace {
    fn new(name: impl Into<String>, mode: TraceMode) -> Self {
        Self {
            name: name.into(),
            mode,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Observed points of a series; missing values leave gaps.
    fn from_series(name: impl Into<String>, mode: TraceMode, series: &Series) -> Self {
        let mut trace = Self::new(name, mode);
        for (ts, value) in series.iter() {
            if let Some(v) = value {
                trace.x.push(XValue::Time(ts));
                trace.y.push(v);
            }
        }
        trace
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// A rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub view: ChartView,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
}

/// Render `view` from a pipeline result.
pub fn render(view: ChartView, result: &PipelineResult) -> Chart {
    let target = result.prepared.name().unwrap_or("value").to_string();

    match view {
        ChartView::Original => Chart {
            view,
            title: view.label().to_string(),
            x_label: "Time".to_string(),
            y_label: target,
            traces: vec![Trace::from_series(
                view.label(),
                TraceMode::Lines,
                &result.prepared,
            )],
        },
        ChartView::Histogram => {
            let mut trace = Trace::new("Frequency", TraceMode::Bars);
            for bin in histogram(&result.prepared.observed(), HISTOGRAM_BINS) {
                trace.x.push(XValue::Number((bin.lower + bin.upper) / 2.0));
                trace.y.push(bin.count as f64);
            }
            Chart {
                view,
                title: format!("Histogram of {} Values", target),
                x_label: target,
                y_label: "Frequency".to_string(),
                traces: vec![trace],
            }
        }
        ChartView::Autocorrelation => {
            let values = result.prepared.observed();
            let mut trace = Trace::new("Lag 1", TraceMode::Markers);
            for pair in values.windows(2) {
                trace.x.push(XValue::Number(pair[0]));
                trace.y.push(pair[1]);
            }
            Chart {
                view,
                title: format!(
                    "{} (lag-1 autocorrelation {:.3})",
                    view.label(),
                    autocorrelation(&values, 1)
                ),
                x_label: "y(t)".to_string(),
                y_label: "y(t + 1)".to_string(),
                traces: vec![trace],
            }
        }
        ChartView::Scatter => Chart {
            view,
            title: format!("Scatter Plot of {} with ARIMA{} Forecast", target, result.order),
            x_label: "Time".to_string(),
            y_label: target,
            traces: vec![
                Trace::from_series("Train", TraceMode::Markers, &result.train),
                Trace::from_series("Test", TraceMode::Markers, &result.test),
                Trace::from_series("ARIMA Forecast", TraceMode::Markers, result.forecast.series()),
            ],
        },
        ChartView::Residuals => {
            let mut trace = Trace::new("Residuals", TraceMode::Lines);
            let pairs = result.fitted.iter().zip(result.train.values());
            for ((ts, fitted), actual) in pairs {
                if let (Some(f), Some(a)) = (fitted, actual) {
                    trace.x.push(XValue::Time(ts));
                    trace.y.push(f - a);
                }
            }
            Chart {
                view,
                title: view.label().to_string(),
                x_label: "Time".to_string(),
                y_label: "Residuals".to_string(),
                traces: vec![trace],
            }
        }
    }
}
