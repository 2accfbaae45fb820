//! Result assembly and consistency checks.

use std::collections::BTreeMap;

use health_spi::{
    AnalysisError, AnalysisResult, Anomaly, IngestionReport, MetricSeries, Result, RollingSummary,
    TrendResult,
};

/// Every stage output for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAnalysis {
    pub series: MetricSeries,
    pub summary: RollingSummary,
    pub trend: TrendResult,
    pub anomalies: Vec<Anomaly>,
}

/// Merge per-metric outputs into one result and check its invariants.
pub fn assemble(metrics: Vec<MetricAnalysis>, ingestion: IngestionReport) -> Result<AnalysisResult> {
    let mut summary = BTreeMap::new();
    let mut trends = BTreeMap::new();
    let mut timeseries = BTreeMap::new();
    let mut grouped: BTreeMap<String, Vec<Anomaly>> = BTreeMap::new();

    for metric in metrics {
        let name = metric.series.name.clone();
        if timeseries.contains_key(&name) {
            return Err(AnalysisError::Assembly(format!(
                "metric '{}' produced twice",
                name
            )));
        }
        summary.insert(name.clone(), metric.summary);
        trends.insert(name.clone(), metric.trend);
        grouped.insert(name.clone(), metric.anomalies);
        timeseries.insert(name, metric.series);
    }

    let result = AnalysisResult {
        summary,
        trends,
        anomalies: grouped.into_values().flatten().collect(),
        timeseries,
        ingestion,
    };
    verify(&result)?;
    Ok(result)
}

/// Check the completeness and consistency invariants of a result.
pub fn verify(result: &AnalysisResult) -> Result<()> {
    for name in result.summary.keys().chain(result.trends.keys()) {
        if !result.timeseries.contains_key(name) {
            return Err(AnalysisError::Assembly(format!(
                "metric '{}' has no timeseries",
                name
            )));
        }
    }
    for name in result.timeseries.keys() {
        if !result.summary.contains_key(name) {
            return Err(AnalysisError::Assembly(format!(
                "metric '{}' missing from summary",
                name
            )));
        }
        if !result.trends.contains_key(name) {
            return Err(AnalysisError::Assembly(format!(
                "metric '{}' missing from trends",
                name
            )));
        }
    }

    let mut last_seen: BTreeMap<&str, chrono::NaiveDate> = BTreeMap::new();
    for anomaly in &result.anomalies {
        let present = result
            .timeseries
            .get(&anomaly.metric)
            .is_some_and(|series| series.contains(anomaly.date, anomaly.value));
        if !present {
            return Err(AnalysisError::Assembly(format!(
                "anomaly on '{}' at {} is not in the timeseries",
                anomaly.metric, anomaly.date
            )));
        }
        if let Some(previous) = last_seen.insert(anomaly.metric.as_str(), anomaly.date) {
            if previous >= anomaly.date {
                return Err(AnalysisError::Assembly(format!(
                    "anomalies on '{}' are not chronological",
                    anomaly.metric
                )));
            }
        }
    }

    Ok(())
}
