use approx::assert_abs_diff_eq;
use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;
use trendcast::summary::{EngagementSummary, MarketSummary};
use trendcast::{ForecastError, TimeSeriesPoint};

fn create_test_data(values: &[f64]) -> Vec<TimeSeriesPoint> {
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSeriesPoint::new(start + Days::new(i as u64), v))
        .collect()
}

#[test]
fn test_engagement_summary() {
    // 8 points: the first is exactly one week before the last
    let dau = create_test_data(&[1000.0, 1010.0, 1020.0, 1030.0, 1040.0, 1050.0, 1060.0, 1100.0]);
    let revenue = create_test_data(&[300.0, 300.0, 600.0]);

    let summary = EngagementSummary::compute(&dau, &revenue, 30).unwrap();

    assert_eq!(summary.current_dau, 1100.0);
    assert_abs_diff_eq!(summary.dau_growth, 10.0, epsilon = 1e-9);
    assert_eq!(summary.total_revenue, 1200.0);
    assert_abs_diff_eq!(summary.avg_daily_revenue, 40.0, epsilon = 1e-12);
}

#[test]
fn test_engagement_summary_short_history() {
    let dau = create_test_data(&[500.0, 600.0]);

    let summary = EngagementSummary::compute(&dau, &[], 30).unwrap();
    assert_eq!(summary.current_dau, 600.0);
    assert_eq!(summary.dau_growth, 0.0);
    assert_eq!(summary.total_revenue, 0.0);

    let empty = EngagementSummary::compute(&[], &[], 30).unwrap();
    assert_eq!(empty.current_dau, 0.0);

    assert!(matches!(
        EngagementSummary::compute(&dau, &[], 0),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_market_summary() {
    let summary = MarketSummary::compute(165e9, 51e9, 24.7, 51e6).unwrap();

    assert_abs_diff_eq!(summary.sam_penetration, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.tam_penetration, 51e6 / 165e9 * 100.0, epsilon = 1e-12);
    assert_eq!(summary.addressable_market, 51e9 - 51e6);
    assert_eq!(summary.adoption_rate, 24.7);

    let json = serde_json::to_value(summary).unwrap();
    assert!(json["samPenetration"].is_number());
    assert!(json["addressableMarket"].is_number());
}

#[test]
fn test_market_summary_requires_positive_market() {
    assert!(matches!(
        MarketSummary::compute(165e9, 0.0, 24.7, 1.0),
        Err(ForecastError::DivisionByZero(_))
    ));
    assert!(MarketSummary::compute(f64::NAN, 1.0, 0.0, 1.0).is_err());
}
