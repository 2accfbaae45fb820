//! Per-metric stage traits.

use crate::model::{Anomaly, MetricSeries, Polarity, TrendResult};

/// Anomaly detector trait.
///
/// Implementations flag observations of a single series and return them in
/// chronological order.
pub trait AnomalyDetector: Send + Sync {
    /// Detect anomalies in one series.
    fn detect(&self, series: &MetricSeries) -> Vec<Anomaly>;

    /// Number of leading observations that can never be flagged.
    fn warmup(&self) -> usize;
}

/// Trend classifier trait.
pub trait TrendClassifier: Send + Sync {
    /// Classify the trajectory of one series.
    fn classify(&self, series: &MetricSeries, polarity: Polarity) -> TrendResult;
}
