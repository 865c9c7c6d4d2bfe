//! Linear trend forecasting with confidence bands
//!
//! The forecaster fits ordinary least squares over index positions and
//! extends the index sequence one step per calendar day. The band is
//! `±band_sigmas` residual standard deviations around the projection; with
//! the default [`BandShape::Constant`] its absolute width does not grow with
//! the horizon. That is a dashboard-grade approximation, not a rigorous
//! prediction interval.

use crate::data::{validate_points, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::utils::future_dates;
use chrono::NaiveDate;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use trend_math::{stats, LinearTrend};

/// Minimum number of historical points needed to fit a trend
pub const MIN_HISTORY: usize = 2;

/// How the confidence band width evolves with the forecast step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandShape {
    /// Same absolute width at every step
    #[default]
    Constant,
    /// Width scaled by `sqrt(k)` at step `k`
    SqrtHorizon,
}

/// Forecaster configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Half-width of the band in residual standard deviations
    pub band_sigmas: f64,
    /// Confidence reported at the near end of the horizon
    pub confidence_start: f64,
    /// Total confidence lost across the horizon
    pub confidence_decay: f64,
    /// Confidence never drops below this
    pub confidence_floor: f64,
    pub band_shape: BandShape,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            band_sigmas: 2.0,
            confidence_start: 0.95,
            confidence_decay: 0.20,
            confidence_floor: 0.70,
            band_shape: BandShape::Constant,
        }
    }
}

impl ForecastConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !self.band_sigmas.is_finite() || self.band_sigmas < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "band_sigmas must be finite and non-negative, got {}",
                self.band_sigmas
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_start) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence_start must be within [0, 1], got {}",
                self.confidence_start
            )));
        }
        if !(0.0..=self.confidence_start).contains(&self.confidence_floor) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence_floor must be within [0, confidence_start], got {}",
                self.confidence_floor
            )));
        }
        if !self.confidence_decay.is_finite() || self.confidence_decay < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence_decay must be finite and non-negative, got {}",
                self.confidence_decay
            )));
        }
        Ok(())
    }

    /// Confidence at step `step` of a `horizon`-step forecast
    pub fn confidence_at(&self, step: usize, horizon: usize) -> f64 {
        let elapsed = step as f64 / horizon as f64;
        let decayed = self.confidence_start - elapsed * self.confidence_decay;
        decayed.max(self.confidence_floor)
    }

    fn band_half_width(&self, std_dev: f64, step: usize) -> f64 {
        let base = self.band_sigmas * std_dev;
        match self.band_shape {
            BandShape::Constant => base,
            BandShape::SqrtHorizon => base * (step as f64).sqrt(),
        }
    }
}

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

/// Trend fitted to a particular history, ready to project
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedTrend {
    trend: LinearTrend,
    last_date: NaiveDate,
}

impl FittedTrend {
    /// Project `horizon_days` days past the last historical date
    pub fn project(
        &self,
        horizon_days: usize,
        config: &ForecastConfig,
    ) -> Result<Vec<ForecastPoint>> {
        if horizon_days == 0 {
            return Err(ForecastError::InvalidHorizon(horizon_days));
        }

        let std_dev = self.trend.residual_std_dev();
        let dates = future_dates(self.last_date, horizon_days)?;

        let points = dates
            .into_iter()
            .zip(1..=horizon_days)
            .map(|(date, step)| {
                let raw = self.trend.project(step);
                let half_width = config.band_half_width(std_dev, step);
                // Domain values (users, revenue) are never negative
                let point = ForecastPoint {
                    date,
                    predicted: raw.max(0.0),
                    lower: (raw - half_width).max(0.0),
                    upper: (raw + half_width).max(0.0),
                    confidence: config.confidence_at(step, horizon_days),
                };
                trace!("step {}: {:?}", step, point);
                point
            })
            .collect();

        Ok(points)
    }

    /// Goodness of fit against the history the trend was fitted on
    pub fn r_squared(&self, history: &[TimeSeriesPoint]) -> Result<f64> {
        let values: Vec<f64> = history.iter().map(|p| p.value).collect();
        Ok(self.trend.r_squared(&values)?)
    }

    pub fn slope(&self) -> f64 {
        self.trend.slope()
    }

    pub fn intercept(&self) -> f64 {
        self.trend.intercept()
    }

    pub fn residual_std_dev(&self) -> f64 {
        self.trend.residual_std_dev()
    }

    pub fn observations(&self) -> usize {
        self.trend.observations()
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Fitted values for each historical position
    pub fn fitted_values(&self) -> Vec<f64> {
        self.trend.fitted_values()
    }
}

/// Fits a linear trend to a history and projects it forward
#[derive(Debug, Clone, Default)]
pub struct TrendForecaster {
    config: ForecastConfig,
}

impl TrendForecaster {
    /// Create a forecaster with the default 2-sigma band and 0.95 → 0.75 confidence decay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecaster with custom configuration
    pub fn new_with_config(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fit the trend without projecting
    pub fn fit(&self, series: &[TimeSeriesPoint]) -> Result<FittedTrend> {
        if series.len() < MIN_HISTORY {
            return Err(ForecastError::InsufficientData {
                required: MIN_HISTORY,
                actual: series.len(),
            });
        }
        validate_points(series)?;

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let trend = LinearTrend::fit(&values)?;
        let last_date = series[series.len() - 1].date;

        debug!(
            "Fitted trend over {} points: slope={:.4}, intercept={:.4}, residual_std_dev={:.4}",
            trend.observations(),
            trend.slope(),
            trend.intercept(),
            trend.residual_std_dev()
        );

        Ok(FittedTrend { trend, last_date })
    }

    /// Forecast `horizon_days` days past the end of `series`
    ///
    /// `series` must hold at least two points in ascending date order.
    /// Historical positions are treated as consecutive days even when the
    /// dates have gaps.
    pub fn forecast(
        &self,
        series: &[TimeSeriesPoint],
        horizon_days: usize,
    ) -> Result<Vec<ForecastPoint>> {
        if horizon_days == 0 {
            return Err(ForecastError::InvalidHorizon(horizon_days));
        }
        self.fit(series)?.project(horizon_days, &self.config)
    }
}

/// Forecast with the default configuration
pub fn forecast(series: &[TimeSeriesPoint], horizon_days: usize) -> Result<Vec<ForecastPoint>> {
    TrendForecaster::new().forecast(series, horizon_days)
}

/// Default window for [`HistoricalProfile`]
pub const DEFAULT_PROFILE_WINDOW: usize = 30;

/// Summary of the history a forecast is built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalProfile {
    /// Total number of historical points
    pub historical_days: usize,
    /// Number of trailing points the averages are computed over
    pub window: usize,
    /// Mean of the trailing window
    pub avg_historical_value: f64,
    /// Coefficient of variation of the trailing window, in percent; `None` for a zero mean
    pub volatility: Option<f64>,
}

impl HistoricalProfile {
    /// Profile the last `window` points of `series`
    pub fn compute(series: &[TimeSeriesPoint], window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Profile window must be positive".to_string(),
            ));
        }
        if series.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        validate_points(series)?;

        let recent: Vec<f64> = series[series.len().saturating_sub(window)..]
            .iter()
            .map(|p| p.value)
            .collect();
        let avg_historical_value = stats::mean(&recent)?;
        let volatility = if avg_historical_value == 0.0 {
            None
        } else {
            Some(stats::coefficient_of_variation(&recent)?)
        };

        Ok(Self {
            historical_days: series.len(),
            window: recent.len(),
            avg_historical_value,
            volatility,
        })
    }
}
