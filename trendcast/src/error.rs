//! Error types for the trendcast crate

use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the trendcast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few observations for the requested operation
    #[error("Insufficient data: need at least {required} points, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Forecast horizon must be at least one day
    #[error("Invalid horizon: {0} days (must be positive)")]
    InvalidHorizon(usize),

    /// Actual and predicted sequences differ in length or are empty
    #[error("Length mismatch: {actual} actual values vs {predicted} predicted values")]
    LengthMismatch { actual: usize, predicted: usize },

    /// A statistic would divide by zero
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Input series violates a precondition (non-finite value, unsorted dates)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numeric primitives
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON parsing or serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
