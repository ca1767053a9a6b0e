//! # forecast-report
//!
//! Load a sensor CSV export, run the forecasting pipeline and print the RMSE
//! together with one chart view as JSON.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sensor_forecast::data::read_observations;
use sensor_forecast::models::ModelOrder;
use sensor_forecast::pipeline::{ForecastPipeline, PipelineConfig};
use sensor_forecast::utils::AccuracyMetrics;
use sensor_forecast::views::{render, Chart, ChartView};
use sensor_forecast::ForecastError;
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type CliResult<T> = std::result::Result<T, ForecastError>;

#[derive(Parser)]
#[command(name = "forecast-report")]
#[command(about = "ARIMA forecast report for a sensor CSV export", long_about = None)]
struct Cli {
    /// Input CSV file (semicolon-delimited, comma decimals)
    #[arg(short, long)]
    input: PathBuf,

    /// Pipeline configuration as JSON; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Column to forecast
    #[arg(short, long)]
    target: Option<String>,

    /// Training fraction of the prepared series
    #[arg(short, long)]
    ratio: Option<f64>,

    /// ARIMA order as "p,d,q"
    #[arg(long)]
    order: Option<String>,

    /// Prediction interval level, e.g. 0.95
    #[arg(long)]
    level: Option<f64>,

    /// View to render (original, histogram, autocorrelation, scatter, residuals)
    #[arg(short, long, default_value = "scatter")]
    view: String,

    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    target: String,
    order: String,
    train_len: usize,
    test_len: usize,
    rmse: f64,
    metrics: AccuracyMetrics,
    chart: Chart,
}

fn parse_order(raw: &str) -> CliResult<ModelOrder> {
    let parts = raw
        .split(',')
        .map(|p| {
            p.trim().parse::<i64>().map_err(|_| {
                ForecastError::precondition(format!("invalid order component '{}'", p.trim()))
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    match parts.as_slice() {
        &[p, d, q] => ModelOrder::try_new(p, d, q),
        _ => Err(ForecastError::precondition(format!(
            "order must have three components \"p,d,q\", got '{}'",
            raw
        ))),
    }
}

fn load_config(cli: &Cli) -> CliResult<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                ForecastError::precondition(format!("cannot read '{}': {}", path.display(), e))
            })?;
            serde_json::from_str(&text)
                .map_err(|e| ForecastError::precondition(format!("invalid config: {}", e)))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(target) = &cli.target {
        config = config.with_target_field(target.clone());
    }
    if let Some(ratio) = cli.ratio {
        config = config.with_split_ratio(ratio);
    }
    if let Some(order) = &cli.order {
        config = config.with_model_order(parse_order(order)?);
    }
    if let Some(level) = cli.level {
        config = config.with_interval_level(level);
    }

    Ok(config)
}

fn run(cli: &Cli) -> CliResult<String> {
    // Resolve the view before any work is done
    let view: ChartView = cli.view.parse()?;
    let config = load_config(cli)?;

    let file = File::open(&cli.input).map_err(|e| {
        ForecastError::precondition(format!("cannot open '{}': {}", cli.input.display(), e))
    })?;
    let rows = read_observations(BufReader::new(file))?;

    let target = config.target_field.clone();
    let result = ForecastPipeline::new(config).run(&rows)?;

    let report = Report {
        target,
        order: result.order.to_string(),
        train_len: result.train.len(),
        test_len: result.test.len(),
        rmse: result.rmse,
        metrics: result.metrics.clone(),
        chart: render(view, &result),
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| ForecastError::precondition(format!("cannot serialize report: {}", e)))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensor_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let json = match run(&cli) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => println!("{}", json),
    }

    ExitCode::SUCCESS
}
