//! Dashboard KPIs derived from engagement and market inputs

use crate::data::TimeSeriesPoint;
use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Number of points back used for week-over-week growth
pub const GROWTH_LOOKBACK: usize = 7;

/// Engagement KPIs over a reporting window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    /// Latest daily active users (0 without data)
    pub current_dau: f64,
    /// DAU change versus [`GROWTH_LOOKBACK`] points earlier, in percent
    pub dau_growth: f64,
    pub total_revenue: f64,
    pub avg_daily_revenue: f64,
}

impl EngagementSummary {
    /// Summarize DAU and revenue series covering `window_days` days
    ///
    /// Growth is 0 when there is no earlier point or it is not positive.
    pub fn compute(
        dau: &[TimeSeriesPoint],
        revenue: &[TimeSeriesPoint],
        window_days: usize,
    ) -> Result<Self> {
        if window_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Summary window must be positive".to_string(),
            ));
        }

        let current_dau = dau.last().map_or(0.0, |p| p.value);
        let previous_dau = dau
            .len()
            .checked_sub(GROWTH_LOOKBACK + 1)
            .map_or(0.0, |i| dau[i].value);
        let dau_growth = if previous_dau > 0.0 {
            (current_dau - previous_dau) / previous_dau * 100.0
        } else {
            0.0
        };

        let total_revenue: f64 = revenue.iter().map(|p| p.value).sum();

        Ok(Self {
            current_dau,
            dau_growth,
            total_revenue,
            avg_daily_revenue: total_revenue / window_days as f64,
        })
    }
}

/// Market sizing KPIs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub tam: f64,
    pub sam: f64,
    pub adoption_rate: f64,
    /// Current users as a percentage of SAM
    pub sam_penetration: f64,
    /// Current users as a percentage of TAM
    pub tam_penetration: f64,
    /// SAM not yet captured
    pub addressable_market: f64,
}

impl MarketSummary {
    pub fn compute(tam: f64, sam: f64, adoption_rate: f64, current_users: f64) -> Result<Self> {
        if tam.is_nan() || sam.is_nan() || tam <= 0.0 || sam <= 0.0 {
            return Err(ForecastError::DivisionByZero(format!(
                "Market penetration needs positive TAM and SAM, got TAM={} SAM={}",
                tam, sam
            )));
        }

        Ok(Self {
            tam,
            sam,
            adoption_rate,
            sam_penetration: current_users / sam * 100.0,
            tam_penetration: current_users / tam * 100.0,
            addressable_market: sam - current_users,
        })
    }
}
