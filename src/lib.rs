//! # Trendcast workspace
//!
//! Facade over the workspace crates: [`trendcast`] for forecasting,
//! evaluation and anomaly detection, [`trend_math`] for the underlying
//! numeric primitives.
//!
//! ## Example
//!
//! ```
//! use trendcast_workspace::trendcast::metrics::evaluate;
//!
//! let report = evaluate(&[100.0, 110.0], &[100.0, 110.0]).unwrap();
//! assert_eq!(report.r2, 1.0);
//! ```

pub use trend_math;
pub use trendcast;
