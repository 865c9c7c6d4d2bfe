//! # Trendcast
//!
//! Forecasting and accuracy-evaluation engine for dashboard time series.
//!
//! ## Features
//!
//! - Linear trend forecasting with confidence bands ([`TrendForecaster`])
//! - Accuracy statistics and letter grades ([`AccuracyEvaluator`])
//! - Z-score spike detection ([`AnomalyDetector`])
//! - CSV/JSON loading and engagement-event aggregation
//! - Engagement and market KPIs for the dashboard summary
//!
//! Every operation is a pure function of its arguments: no shared state, no
//! I/O outside [`DataLoader`], safe to call from any number of threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trendcast::{AccuracyEvaluator, AnomalyDetector, TimeSeriesPoint, TrendForecaster};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history: Vec<TimeSeriesPoint> = [100.0, 110.0, 120.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &v)| TimeSeriesPoint::new(start + chrono::Days::new(i as u64), v))
//!     .collect();
//!
//! let forecast = TrendForecaster::new().forecast(&history, 2)?;
//! assert_eq!(forecast[0].predicted, 130.0);
//!
//! let report = AccuracyEvaluator::new().evaluate(&[130.0, 141.0], &[130.0, 140.0])?;
//! assert!(report.rmse > 0.0);
//!
//! let spikes = AnomalyDetector::new().detect(&history)?;
//! assert!(spikes.is_empty());
//! # Ok::<(), trendcast::ForecastError>(())
//! ```

pub mod anomaly;
pub mod data;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use crate::anomaly::{AnomalyConfig, AnomalyDetector, AnomalyPoint};
pub use crate::data::{DataLoader, TimeSeries, TimeSeriesPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{
    BandShape, FittedTrend, ForecastConfig, ForecastPoint, HistoricalProfile, TrendForecaster,
};
pub use crate::metrics::{
    AccuracyAssessment, AccuracyEvaluator, AccuracyReport, EvaluatorConfig, Grade,
    GradingPolicy, ZeroActualPolicy,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
