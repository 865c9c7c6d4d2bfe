//! Population statistics
//!
//! All dispersion measures here use divisor `n`, not `n - 1`.

use crate::{MathError, Result};
use statrs::statistics::Statistics;

fn ensure_non_empty(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute statistics of an empty series".to_string(),
        ));
    }
    Ok(())
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(Statistics::mean(values.iter()))
}

/// Population variance (divisor `n`)
pub fn population_variance(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(Statistics::population_variance(values.iter()))
}

/// Population standard deviation (divisor `n`)
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(Statistics::population_std_dev(values.iter()))
}

/// Number of standard deviations `value` lies from `mean`
///
/// Returns `None` when `std_dev` is zero, since every point of a constant
/// series sits exactly at the mean.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> Option<f64> {
    if std_dev == 0.0 {
        None
    } else {
        Some((value - mean) / std_dev)
    }
}

/// Coefficient of variation in percent (`std_dev / mean * 100`)
pub fn coefficient_of_variation(values: &[f64]) -> Result<f64> {
    let avg = mean(values)?;
    if avg == 0.0 {
        return Err(MathError::CalculationError(
            "Coefficient of variation is undefined for a zero mean".to_string(),
        ));
    }
    Ok(population_std_dev(values)? / avg * 100.0)
}
