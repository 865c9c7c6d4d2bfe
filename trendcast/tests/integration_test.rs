use std::io::Write;
use std::process::Command;
use tempfile::{Builder, NamedTempFile};
use trendcast::data::{aggregate_events, metric_series, EngagementEvent};
use trendcast::utils::train_test_split;
use trendcast::{
    AccuracyEvaluator, AnomalyDetector, DataLoader, GradingPolicy, HistoricalProfile,
    TrendForecaster,
};

// Helper function to create a simple test dataset
fn create_sample_data() -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();

    writeln!(file, "date,value").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();
    writeln!(file, "2023-01-02,102.0").unwrap();
    writeln!(file, "2023-01-03,101.0").unwrap();
    writeln!(file, "2023-01-04,103.0").unwrap();
    writeln!(file, "2023-01-05,102.0").unwrap();
    writeln!(file, "2023-01-06,104.0").unwrap();
    writeln!(file, "2023-01-07,103.0").unwrap();
    writeln!(file, "2023-01-08,105.0").unwrap();
    writeln!(file, "2023-01-09,104.0").unwrap();
    writeln!(file, "2023-01-10,160.0").unwrap();

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load data
    let data_file = create_sample_data();
    let data = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(data.len(), 10);

    // 2. Hold out the last three days and forecast them
    let (history, holdout) = train_test_split(data.points(), 3);
    let forecaster = TrendForecaster::new();
    let forecast = forecaster.forecast(history, holdout.len()).unwrap();
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0].date, holdout[0].date);

    // 3. Score the forecast once actuals are in
    let evaluator = AccuracyEvaluator::new();
    let report = evaluator.evaluate_forecast(holdout, &forecast).unwrap();
    assert!(report.mape > 0.0);
    assert!(report.rmse > 0.0);
    assert!(report.r2 <= 1.0);

    let actual: Vec<f64> = holdout.iter().map(|p| p.value).collect();
    let predicted: Vec<f64> = forecast.iter().map(|p| p.predicted).collect();
    let assessment = evaluator.assess(&actual, &predicted).unwrap();
    assert_eq!(assessment.report, report);
    assert_eq!(assessment.sample_size, 3);
    assert_eq!(assessment.grade, GradingPolicy::default().grade(report.mape));

    // 4. The jump on the last day stands out
    let anomalies = AnomalyDetector::new().detect(data.points()).unwrap();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].value, 160.0);

    // 5. Profile the recent window
    let profile = HistoricalProfile::compute(data.points(), 5).unwrap();
    assert_eq!(profile.historical_days, 10);
    assert!(profile.volatility.unwrap() > 0.0);
}

#[test]
fn test_events_to_forecast() {
    let events: Vec<EngagementEvent> = (1..=6)
        .flat_map(|day| {
            let date = chrono::NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            vec![
                EngagementEvent {
                    date,
                    metric: "DAU".to_string(),
                    value: 1000.0 + 10.0 * day as f64,
                    monetization: false,
                },
                EngagementEvent {
                    date,
                    metric: "revenue".to_string(),
                    value: 50.0,
                    monetization: day % 2 == 0,
                },
            ]
        })
        .collect();

    assert_eq!(aggregate_events(&events).len(), 12);

    let dau = metric_series(&events, "DAU");
    let forecast = TrendForecaster::new().forecast(&dau, 7).unwrap();
    assert_eq!(forecast.len(), 7);
    assert!((forecast[0].predicted - 1070.0).abs() < 1e-9);
}

#[test]
fn test_cli_forecast() {
    let data_file = create_sample_data();

    let output = Command::new(env!("CARGO_BIN_EXE_trendcast"))
        .args(["forecast", "--horizon", "4", "--input"])
        .arg(data_file.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let forecast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = forecast.as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0]["date"], "2023-01-11");
}

#[test]
fn test_cli_anomalies_and_profile() {
    let data_file = create_sample_data();

    let output = Command::new(env!("CARGO_BIN_EXE_trendcast"))
        .args(["anomalies", "--threshold", "2.5", "--input"])
        .arg(data_file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let anomalies: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(anomalies.as_array().unwrap().len(), 1);
    assert!(anomalies[0]["zScore"].as_f64().unwrap() > 2.5);

    let output = Command::new(env!("CARGO_BIN_EXE_trendcast"))
        .args(["profile", "--window", "5", "--input"])
        .arg(data_file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["historicalDays"], 10);
    assert_eq!(profile["window"], 5);
}

#[test]
fn test_cli_evaluate_truncates() {
    let mut actual = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        actual,
        r#"[{{"date":"2024-01-01","value":100.0}},{{"date":"2024-01-02","value":110.0}},{{"date":"2024-01-03","value":120.0}}]"#
    )
    .unwrap();
    let mut predicted = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        predicted,
        r#"[{{"date":"2024-01-01","value":105.0}},{{"date":"2024-01-02","value":108.0}}]"#
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_trendcast"))
        .arg("evaluate")
        .arg("--actual")
        .arg(actual.path())
        .arg("--predicted")
        .arg(predicted.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let assessment: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(assessment["sampleSize"], 2);
    assert_eq!(assessment["grade"], "A");
}

#[test]
fn test_cli_rejects_insufficient_history() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "date,value").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_trendcast"))
        .args(["forecast", "--horizon", "5", "--input"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Insufficient data"));
}
