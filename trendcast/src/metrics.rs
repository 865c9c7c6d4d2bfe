//! Metrics for evaluating forecast accuracy

use crate::data::TimeSeriesPoint;
use crate::error::{ForecastError, Result};
use crate::forecast::ForecastPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use trend_math::regression::explained_variance;

/// What to do with actual values of zero when computing MAPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroActualPolicy {
    /// Fail with [`ForecastError::DivisionByZero`]
    #[default]
    Reject,
    /// Average the percentage error over non-zero actuals only
    Skip,
}

/// Evaluator configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub zero_actuals: ZeroActualPolicy,
    pub grading: GradingPolicy,
}

/// Forecast accuracy statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Mean Absolute Percentage Error, in percent
    pub mape: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination (may be negative)
    pub r2: f64,
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAPE:  {:.2}%", self.mape)?;
        writeln!(f, "  RMSE:  {:.2}", self.rmse)?;
        writeln!(f, "  R2:    {:.4}", self.r2)?;
        Ok(())
    }
}

/// Letter grade for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(letter)
    }
}

/// Upper MAPE bounds (inclusive) for grades A, B and C; anything above is D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingPolicy {
    pub a_max: f64,
    pub b_max: f64,
    pub c_max: f64,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            a_max: 15.0,
            b_max: 25.0,
            c_max: 35.0,
        }
    }
}

impl GradingPolicy {
    /// Create a policy, requiring `0 <= a_max <= b_max <= c_max`
    pub fn new(a_max: f64, b_max: f64, c_max: f64) -> Result<Self> {
        let policy = Self { a_max, b_max, c_max };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.a_max && self.a_max <= self.b_max && self.b_max <= self.c_max;
        if !ordered || !self.c_max.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Grade thresholds must be finite and ascending, got A<={} B<={} C<={}",
                self.a_max, self.b_max, self.c_max
            )));
        }
        Ok(())
    }

    /// Grade a MAPE value
    pub fn grade(&self, mape: f64) -> Grade {
        if mape <= self.a_max {
            Grade::A
        } else if mape <= self.b_max {
            Grade::B
        } else if mape <= self.c_max {
            Grade::C
        } else {
            Grade::D
        }
    }
}

/// Graded accuracy as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyAssessment {
    #[serde(flatten)]
    pub report: AccuracyReport,
    pub grade: Grade,
    /// `100 - mape`, floored at zero
    pub percentage: f64,
    pub sample_size: usize,
}

/// Scores predicted values against actuals
#[derive(Debug, Clone, Default)]
pub struct AccuracyEvaluator {
    config: EvaluatorConfig,
}

impl AccuracyEvaluator {
    /// Create an evaluator that rejects zero actuals and uses the default grading
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom configuration
    pub fn new_with_config(config: EvaluatorConfig) -> Result<Self> {
        config.grading.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Compute MAPE, RMSE and R² for equal-length, non-empty sequences
    pub fn evaluate(&self, actual: &[f64], predicted: &[f64]) -> Result<AccuracyReport> {
        if actual.len() != predicted.len() || actual.is_empty() {
            return Err(ForecastError::LengthMismatch {
                actual: actual.len(),
                predicted: predicted.len(),
            });
        }
        if actual.iter().chain(predicted).any(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidData(
                "Accuracy inputs must be finite".to_string(),
            ));
        }

        let n = actual.len() as f64;
        let mape = self.mean_absolute_percentage_error(actual, predicted)?;

        let ss_residual: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let rmse = (ss_residual / n).sqrt();

        let mean = actual.iter().sum::<f64>() / n;
        let ss_total: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
        let r2 = explained_variance(ss_residual, ss_total);

        Ok(AccuracyReport { mape, rmse, r2 })
    }

    fn mean_absolute_percentage_error(&self, actual: &[f64], predicted: &[f64]) -> Result<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;

        for (i, (&a, &p)) in actual.iter().zip(predicted).enumerate() {
            if a == 0.0 {
                match self.config.zero_actuals {
                    ZeroActualPolicy::Reject => {
                        return Err(ForecastError::DivisionByZero(format!(
                            "MAPE is undefined: actual value at position {} is zero",
                            i
                        )))
                    }
                    ZeroActualPolicy::Skip => continue,
                }
            }
            sum += (a - p).abs() / a.abs();
            count += 1;
        }

        if count == 0 {
            return Err(ForecastError::DivisionByZero(
                "MAPE is undefined: every actual value is zero".to_string(),
            ));
        }

        Ok(sum / count as f64 * 100.0)
    }

    /// Evaluate and grade
    pub fn assess(&self, actual: &[f64], predicted: &[f64]) -> Result<AccuracyAssessment> {
        let report = self.evaluate(actual, predicted)?;
        Ok(AccuracyAssessment {
            report,
            grade: self.config.grading.grade(report.mape),
            percentage: (100.0 - report.mape).max(0.0),
            sample_size: actual.len(),
        })
    }

    /// Evaluate a forecast against actuals that share its dates
    ///
    /// Points are paired by date; forecast days with no actual (and actuals
    /// outside the forecast) are ignored. If an actual date repeats, the
    /// first occurrence is used.
    pub fn evaluate_forecast(
        &self,
        actuals: &[TimeSeriesPoint],
        forecast: &[ForecastPoint],
    ) -> Result<AccuracyReport> {
        let mut by_date = HashMap::with_capacity(actuals.len());
        for point in actuals {
            by_date.entry(point.date).or_insert(point.value);
        }

        let (actual, predicted): (Vec<f64>, Vec<f64>) = forecast
            .iter()
            .filter_map(|f| by_date.get(&f.date).map(|&a| (a, f.predicted)))
            .unzip();

        if actual.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        self.evaluate(&actual, &predicted)
    }
}

/// Evaluate with the default configuration
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<AccuracyReport> {
    AccuracyEvaluator::new().evaluate(actual, predicted)
}

/// Cut both sequences to the shorter one's length
pub fn truncate_to_common_length<'a>(
    actual: &'a [f64],
    predicted: &'a [f64],
) -> (&'a [f64], &'a [f64]) {
    let len = actual.len().min(predicted.len());
    (&actual[..len], &predicted[..len])
}
