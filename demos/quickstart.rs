//! Quickstart demonstrating basic usage of sensor-forecast.
//!
//! Run with: cargo run --example quickstart

use chrono::{Duration, TimeZone, Utc};
use sensor_forecast::data::read_observations;
use sensor_forecast::prelude::*;

fn main() {
    println!("=== sensor-forecast Quickstart ===\n");

    // 1. Build a small hourly CO export with sensor sentinels (-200)
    let base = Utc.with_ymd_and_hms(2004, 3, 10, 18, 0, 0).unwrap();
    let mut csv = String::from("Date;Time;CO(GT);T\n");
    for i in 0..240 {
        let ts = base + Duration::hours(i);
        let co = if i % 23 == 7 {
            -200.0
        } else {
            2.0                                                             // base level
            + 0.8 * (2.0 * std::f64::consts::PI * i as f64 / 24.0).sin()    // daily cycle
            + 0.2 * (i as f64 * 1.3).cos()                                  // noise
        };
        csv.push_str(&format!(
            "{};{};{};12,5\n",
            ts.format("%d/%m/%Y"),
            ts.format("%H.%M.%S"),
            format!("{:.2}", co).replace('.', ",")
        ));
    }

    let rows = read_observations(csv.as_bytes()).unwrap();
    println!("Read {} observation rows", rows.len());

    // 2. Run the pipeline with an ARIMA(2,0,1) model and 95% intervals
    println!("\n--- Running ARIMA(2,0,1) pipeline ---");
    let config = PipelineConfig::default()
        .with_model_order(ModelOrder::new(2, 0, 1))
        .with_interval_level(0.95);
    let result = match ForecastPipeline::new(config).run(&rows) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e);
            return;
        }
    };

    println!("Prepared observations: {}", result.prepared.len());
    println!("Train / test: {} / {}", result.train.len(), result.test.len());

    // 3. Forecast against the held-out suffix
    println!("\n--- Forecast with 95% Prediction Intervals ---");
    println!(
        "{:>20} {:>10} {:>10} {:>10} {:>10}",
        "time", "actual", "lower", "forecast", "upper"
    );
    println!("{:-<64}", "");
    let (Some(lower), Some(upper)) = (result.forecast.lower(), result.forecast.upper()) else {
        return;
    };
    for (i, (ts, pred)) in result.forecast.series().iter().take(10).enumerate() {
        println!(
            "{:>20} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            ts.format("%Y-%m-%d %H:%M"),
            result.test.values()[i].unwrap_or(f64::NAN),
            lower[i],
            pred.unwrap_or(f64::NAN),
            upper[i]
        );
    }

    // 4. Accuracy
    println!("\n--- Accuracy ---");
    println!("RMSE:  {:.4}", result.rmse);
    println!("MAE:   {:.4}", result.metrics.mae);
    if let Some(mape) = result.metrics.mape {
        println!("MAPE:  {:.2}%", mape);
    }

    // 5. Chart views
    println!("\n--- Chart Views ---");
    for view in ChartView::ALL {
        let chart = render(view, &result);
        let points: usize = chart.traces.iter().map(|t| t.len()).sum();
        println!("{:<16} {:>5} points  {}", view.id(), points, chart.title);
    }

    println!("\n=== Quickstart Complete ===");
}
