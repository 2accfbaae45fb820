//! Aggregate analysis result.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::anomaly::Anomaly;
use super::series::MetricSeries;
use super::summary::RollingSummary;
use super::trend::TrendResult;

/// Run of calendar days with no observation between two observed dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGap {
    pub after: NaiveDate,
    pub before: NaiveDate,
    pub missing_days: i64,
}

/// How well one metric column covered the dated rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCoverage {
    pub observations: usize,
    /// Dated rows whose cell was missing or non-numeric.
    pub missing: usize,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub gaps: Vec<DateGap>,
}

/// What ingestion kept and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionReport {
    pub date_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub total_rows: usize,
    /// Rows dropped for a missing or unparseable date.
    pub dropped_rows: usize,
    /// Rows collapsed because a later row had the same date.
    pub duplicate_dates: usize,
    pub ignored_columns: Vec<String>,
    pub coverage: BTreeMap<String, MetricCoverage>,
}

/// Complete analysis of one uploaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: BTreeMap<String, RollingSummary>,
    pub trends: BTreeMap<String, TrendResult>,
    /// Grouped by metric name, chronological within a metric.
    pub anomalies: Vec<Anomaly>,
    pub timeseries: BTreeMap<String, MetricSeries>,
    pub ingestion: IngestionReport,
}

impl AnalysisResult {
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.timeseries.keys().map(String::as_str)
    }

    pub fn anomalies_for<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = &'a Anomaly> + 'a {
        self.anomalies.iter().filter(move |a| a.metric == metric)
    }

    /// Anomalies ranked by absolute score, largest first.
    ///
    /// Returns a copy; the stored order stays chronological.
    pub fn anomalies_by_severity(&self) -> Vec<&Anomaly> {
        let mut ranked: Vec<&Anomaly> = self.anomalies.iter().collect();
        ranked.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
        ranked
    }
}
