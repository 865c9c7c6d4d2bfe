//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A single dated observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Check the preconditions every engine component relies on
///
/// Values must be finite and dates must be non-decreasing. Duplicate dates
/// are allowed; each duplicate is an independent sample at its position.
pub fn validate_points(points: &[TimeSeriesPoint]) -> Result<()> {
    if let Some((i, point)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !p.value.is_finite())
    {
        return Err(ForecastError::InvalidData(format!(
            "Non-finite value {} at position {} ({})",
            point.value, i, point.date
        )));
    }

    if let Some(i) = points.windows(2).position(|w| w[1].date < w[0].date) {
        return Err(ForecastError::InvalidData(format!(
            "Dates out of order at position {}: {} follows {}",
            i + 1,
            points[i + 1].date,
            points[i].date
        )));
    }

    Ok(())
}

/// Validated, chronologically ordered series
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Create a series, rejecting non-finite values and unsorted dates
    pub fn new(points: Vec<TimeSeriesPoint>) -> Result<Self> {
        validate_points(&points)?;
        Ok(Self { points })
    }

    /// Create a series from parallel date and value vectors
    pub fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::InvalidData(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        let points = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| TimeSeriesPoint { date, value })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last `n` points (or all of them if the series is shorter)
    pub fn tail(&self, n: usize) -> &[TimeSeriesPoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    pub fn into_points(self) -> Vec<TimeSeriesPoint> {
        self.points
    }
}

impl AsRef<[TimeSeriesPoint]> for TimeSeries {
    fn as_ref(&self) -> &[TimeSeriesPoint] {
        &self.points
    }
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file with a `date,value` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let mut reader = csv::Reader::from_path(path)?;
        let points = reader
            .deserialize::<TimeSeriesPoint>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        TimeSeries::new(points)
    }

    /// Load a series from a JSON array of `{"date": ..., "value": ...}` objects
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let file = File::open(path)?;
        let points: Vec<TimeSeriesPoint> = serde_json::from_reader(BufReader::new(file))?;

        TimeSeries::new(points)
    }

    /// Load a series, picking the format from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::from_csv(path),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(path),
            _ => Err(ForecastError::InvalidParameter(format!(
                "Unsupported input format: {} (expected .csv or .json)",
                path.display()
            ))),
        }
    }
}

/// Raw engagement event as supplied by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub date: NaiveDate,
    /// Metric name, e.g. `DAU`, `sessions`, `revenue`
    pub metric: String,
    pub value: f64,
    #[serde(default)]
    pub monetization: bool,
}

/// Per-(date, metric) aggregate of engagement events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetric {
    pub date: NaiveDate,
    pub metric: String,
    /// Mean of the grouped event values
    pub value: f64,
    pub count: usize,
    pub has_monetization: bool,
}

#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    monetization: bool,
}

/// Group events by `(date, metric)` and average each group
///
/// Output is ordered by date, then metric name.
pub fn aggregate_events(events: &[EngagementEvent]) -> Vec<AggregatedMetric> {
    let groups = events.iter().fold(
        BTreeMap::<(NaiveDate, &str), Accumulator>::new(),
        |mut groups, event| {
            let acc = groups
                .entry((event.date, event.metric.as_str()))
                .or_default();
            acc.sum += event.value;
            acc.count += 1;
            acc.monetization |= event.monetization;
            groups
        },
    );

    groups
        .into_iter()
        .map(|((date, metric), acc)| AggregatedMetric {
            date,
            metric: metric.to_string(),
            value: acc.sum / acc.count as f64,
            count: acc.count,
            has_monetization: acc.monetization,
        })
        .collect()
}

/// Extract one metric's observations, sorted ascending by date
///
/// The sort is stable, so same-day events keep their input order.
pub fn metric_series(events: &[EngagementEvent], metric: &str) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = events
        .iter()
        .filter(|e| e.metric == metric)
        .map(|e| TimeSeriesPoint::new(e.date, e.value))
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
