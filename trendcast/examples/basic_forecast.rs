//! Forecast a synthetic DAU series, score a holdout and list spikes
//!
//! Run with `RUST_LOG=debug cargo run --example basic_forecast`.

use chrono::{Days, NaiveDate};
use trendcast::utils::train_test_split;
use trendcast::{AccuracyEvaluator, AnomalyDetector, TimeSeriesPoint, TrendForecaster};

fn main() -> trendcast::Result<()> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let series: Vec<TimeSeriesPoint> = (0..60u64)
        .map(|day| {
            let weekly = if day % 7 == 5 { 4_000.0 } else { 0.0 };
            let outage_rebound = if day == 41 { 15_000.0 } else { 0.0 };
            let value = 50_000.0 + 120.0 * day as f64 + weekly + outage_rebound;
            TimeSeriesPoint::new(start + Days::new(day), value)
        })
        .collect();

    let (history, holdout) = train_test_split(&series, 14);
    let forecast = TrendForecaster::new().forecast(history, holdout.len())?;

    println!("First forecast: {:?}", forecast.first());
    println!("Last forecast:  {:?}", forecast.last());

    let assessment = AccuracyEvaluator::new().assess(
        &holdout.iter().map(|p| p.value).collect::<Vec<_>>(),
        &forecast.iter().map(|p| p.predicted).collect::<Vec<_>>(),
    )?;
    print!("{}", assessment.report);
    println!("  Grade: {} ({:.2}%)", assessment.grade, assessment.percentage);

    for spike in AnomalyDetector::new().detect(&series)? {
        println!("Spike on {}: {:.0} (z = {:.2})", spike.date, spike.value, spike.z_score);
    }

    Ok(())
}
