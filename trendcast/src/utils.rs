//! Utility functions for the trendcast crate

use crate::data::TimeSeriesPoint;
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Split a series into a fitting history and a held-out tail
///
/// The last `holdout` points form the test set. Returns the whole series as
/// history and an empty tail when `holdout` is 0 or not smaller than the
/// series.
pub fn train_test_split(
    series: &[TimeSeriesPoint],
    holdout: usize,
) -> (&[TimeSeriesPoint], &[TimeSeriesPoint]) {
    if holdout == 0 || holdout >= series.len() {
        return (series, &[]);
    }
    series.split_at(series.len() - holdout)
}

/// Consecutive calendar days following `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as u64)
        .map(|k| {
            last_date.checked_add_days(Days::new(k)).ok_or_else(|| {
                ForecastError::InvalidData(format!("Date overflow: {} + {} days", last_date, k))
            })
        })
        .collect()
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ForecastError::InvalidData(format!("Invalid date '{}': {}", s, e)))
}
