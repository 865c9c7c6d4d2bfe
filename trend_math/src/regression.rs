//! Ordinary least squares trend fitting
//!
//! The independent variable is the 0-based position of each observation,
//! so a series is treated as equally spaced regardless of its timestamps.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Linear trend `value = slope * index + intercept` fitted by closed-form OLS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
    residual_std_dev: f64,
    observations: usize,
}

impl LinearTrend {
    /// Fit a trend to `values` indexed `0..n`
    ///
    /// Requires at least two observations. The residual standard deviation
    /// uses divisor `n` (mean of squared residuals).
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 observations to fit a trend, have {}",
                values.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Non-finite value at position {}",
                pos
            )));
        }

        let n = values.len() as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_x2 = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let denominator = n * sum_x2 - sum_x * sum_x;
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_x) / n;

        let squared_residuals: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let r = y - (slope * i as f64 + intercept);
                r * r
            })
            .sum();
        let residual_std_dev = (squared_residuals / n).sqrt();

        Ok(Self {
            slope,
            intercept,
            residual_std_dev,
            observations: values.len(),
        })
    }

    /// Trend value at an arbitrary (possibly out-of-sample) index
    pub fn value_at(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }

    /// Trend value `steps_ahead` positions past the last observation
    ///
    /// `steps_ahead = 1` continues the index sequence at `n`, i.e. the
    /// position of the first unseen observation.
    pub fn project(&self, steps_ahead: usize) -> f64 {
        self.value_at((self.observations + steps_ahead - 1) as f64)
    }

    /// In-sample fitted values for indices `0..n`
    pub fn fitted_values(&self) -> Vec<f64> {
        (0..self.observations)
            .map(|i| self.value_at(i as f64))
            .collect()
    }

    /// Coefficient of determination of the fit against `values`
    ///
    /// A constant series has no variance to explain; it scores 1.0 when the
    /// fit is exact and 0.0 otherwise.
    pub fn r_squared(&self, values: &[f64]) -> Result<f64> {
        if values.len() != self.observations {
            return Err(MathError::InvalidInput(format!(
                "Expected {} values, got {}",
                self.observations,
                values.len()
            )));
        }

        let y_mean = values.iter().sum::<f64>() / values.len() as f64;
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (i, &y) in values.iter().enumerate() {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - self.value_at(i as f64)).powi(2);
        }

        Ok(explained_variance(ss_residual, ss_total))
    }

    /// Get the slope (change per index step)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept (trend value at index 0)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get the population standard deviation of in-sample residuals
    pub fn residual_std_dev(&self) -> f64 {
        self.residual_std_dev
    }

    /// Get the number of observations the trend was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }
}

/// `1 - ss_residual / ss_total`, with a deterministic value for `ss_total == 0`
pub fn explained_variance(ss_residual: f64, ss_total: f64) -> f64 {
    if ss_total == 0.0 {
        if ss_residual == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_residual / ss_total
    }
}
