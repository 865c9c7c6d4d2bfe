use approx::assert_abs_diff_eq;
use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use trendcast::anomaly::detect;
use trendcast::{AnomalyConfig, AnomalyDetector, ForecastError, TimeSeriesPoint};

fn create_test_data(values: &[f64]) -> Vec<TimeSeriesPoint> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSeriesPoint::new(start + Days::new(i as u64), v))
        .collect()
}

#[test]
fn test_spike_flagged_at_default_threshold() {
    let series = create_test_data(&[10.0, 10.0, 10.0, 10.0, 100.0]);

    let anomalies = AnomalyDetector::new().detect(&series).unwrap();

    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].value, 100.0);
    assert_eq!(anomalies[0].date, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
    // mean 28, population std dev 36
    assert_abs_diff_eq!(anomalies[0].z_score, 2.0, epsilon = 1e-12);
    assert!(anomalies[0].is_spike());
}

#[rstest]
#[case(0.5, 5)]
#[case(2.0, 1)]
#[case(2.5, 0)]
#[case(10.0, 0)]
fn test_threshold_boundary(#[case] threshold: f64, #[case] expected: usize) {
    let series = create_test_data(&[10.0, 10.0, 10.0, 10.0, 100.0]);
    let anomalies = detect(&series, threshold).unwrap();
    assert_eq!(anomalies.len(), expected);
}

#[test]
fn test_lower_threshold_flags_more() {
    let series = create_test_data(&[10.0, 10.0, 10.0, 10.0, 100.0]);

    let strict = detect(&series, 2.0).unwrap().len();
    let loose = detect(&series, 0.5).unwrap().len();
    let none = detect(&series, 10.0).unwrap().len();

    assert!(loose > strict);
    assert_eq!(none, 0);
}

#[test]
fn test_order_preserved_and_dips_flagged() {
    let series = create_test_data(&[50.0, 0.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 120.0]);

    let anomalies = detect(&series, 1.5).unwrap();

    assert_eq!(anomalies.len(), 2);
    assert_eq!(anomalies[0].value, 0.0);
    assert!(anomalies[0].z_score < 0.0);
    assert!(!anomalies[0].is_spike());
    assert_eq!(anomalies[1].value, 120.0);
    assert!(anomalies[0].date < anomalies[1].date);
    assert_eq!(anomalies[0].magnitude(), anomalies[0].z_score.abs());
}

#[test]
fn test_constant_series_has_no_anomalies() {
    let series = create_test_data(&[7.0; 12]);
    assert!(detect(&series, 0.0).unwrap().is_empty());
}

#[test]
fn test_empty_series() {
    assert!(AnomalyDetector::new().detect(&[]).unwrap().is_empty());
}

#[test]
fn test_invalid_threshold() {
    assert!(matches!(
        AnomalyDetector::with_threshold(-1.0),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(AnomalyDetector::with_threshold(f64::NAN).is_err());
    assert!(AnomalyDetector::new_with_config(AnomalyConfig { threshold: 3.0 }).is_ok());
}

#[test]
fn test_non_finite_input_rejected() {
    let series = create_test_data(&[1.0, f64::NAN, 3.0]);
    assert!(matches!(
        detect(&series, 2.0),
        Err(ForecastError::InvalidData(_))
    ));
}

#[test]
fn test_anomaly_json_field_names() {
    let series = create_test_data(&[10.0, 10.0, 10.0, 10.0, 100.0]);
    let anomalies = detect(&series, 2.0).unwrap();

    let json = serde_json::to_value(anomalies[0]).unwrap();
    assert_eq!(json["date"], "2024-02-05");
    assert_eq!(json["value"], 100.0);
    assert_abs_diff_eq!(json["zScore"].as_f64().unwrap(), 2.0, epsilon = 1e-12);
}
