//! Data models for health analysis.
//!
//! This module contains the input table, the normalized series and every
//! per-metric output type assembled into an [`AnalysisResult`].

mod anomaly;
mod result;
mod series;
mod summary;
mod table;
mod trend;

pub use anomaly::{Anomaly, AnomalySeverity};
pub use result::{AnalysisResult, DateGap, IngestionReport, MetricCoverage};
pub use series::{MetricSeries, Observation};
pub use summary::{RollingSummary, WindowMean};
pub use table::{Cell, Table};
pub use trend::{Movement, Polarity, TrendDirection, TrendResult, WindowSpan};
