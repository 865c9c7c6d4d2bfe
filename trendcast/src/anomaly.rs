//! Z-score spike detection

use crate::data::{validate_points, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use trend_math::stats;

/// Default z-score threshold
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// A point whose z-score reached the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub z_score: f64,
}

impl AnomalyPoint {
    /// Distance from the mean in standard deviations, regardless of direction
    pub fn magnitude(&self) -> f64 {
        self.z_score.abs()
    }

    pub fn is_spike(&self) -> bool {
        self.z_score > 0.0
    }
}

/// Detector configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Flags points far from the series mean
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom threshold
    pub fn with_threshold(threshold: f64) -> Result<Self> {
        Self::new_with_config(AnomalyConfig { threshold })
    }

    pub fn new_with_config(config: AnomalyConfig) -> Result<Self> {
        if !config.threshold.is_finite() || config.threshold < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Threshold must be finite and non-negative, got {}",
                config.threshold
            )));
        }
        Ok(Self { config })
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Return the points with `|z| >= threshold`, in input order
    ///
    /// Scores use the population standard deviation. An empty or constant
    /// series yields no anomalies.
    pub fn detect(&self, series: &[TimeSeriesPoint]) -> Result<Vec<AnomalyPoint>> {
        if series.is_empty() {
            return Ok(Vec::new());
        }
        validate_points(series)?;

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let mean = stats::mean(&values)?;
        let std_dev = stats::population_std_dev(&values)?;

        let anomalies: Vec<AnomalyPoint> = series
            .iter()
            .filter_map(|point| {
                let z_score = stats::z_score(point.value, mean, std_dev)?;
                (z_score.abs() >= self.config.threshold).then_some(AnomalyPoint {
                    date: point.date,
                    value: point.value,
                    z_score,
                })
            })
            .collect();

        debug!(
            "Scored {} points (mean={:.4}, std_dev={:.4}): {} at or above |z|={}",
            series.len(),
            mean,
            std_dev,
            anomalies.len(),
            self.config.threshold
        );

        Ok(anomalies)
    }
}

/// Detect anomalies with the given threshold
pub fn detect(series: &[TimeSeriesPoint], threshold: f64) -> Result<Vec<AnomalyPoint>> {
    AnomalyDetector::with_threshold(threshold)?.detect(series)
}
