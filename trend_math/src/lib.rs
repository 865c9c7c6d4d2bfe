//! # Trend Math
//!
//! Numeric building blocks for trend forecasting.
//! This crate provides a closed-form least squares trend fit over index
//! positions and the population statistics used for confidence bands and
//! anomaly scoring.

use thiserror::Error;

pub mod regression;
pub mod stats;

pub use regression::LinearTrend;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
