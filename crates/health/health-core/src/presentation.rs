//! Display helpers applied at the presentation boundary.
//!
//! Analysis keeps full precision; rounding happens only here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use health_spi::{AnalysisResult, MetricSeries};
use serde::{Deserialize, Serialize};

use crate::rolling::rolling_means;

/// Round to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Flat summary keyed `<metric>_avg_<window>d`, e.g. `steps_avg_7d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryView(pub BTreeMap<String, f64>);

impl SummaryView {
    pub fn from_result(result: &AnalysisResult, precision: u32) -> Self {
        let mut values = BTreeMap::new();
        for (metric, summary) in &result.summary {
            let windows = std::iter::once(&summary.short).chain(summary.long.as_ref());
            for window in windows {
                values.insert(
                    format!("{}_avg_{}d", metric, window.window),
                    round_to(window.mean, precision),
                );
            }
        }
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }
}

/// One charted point: observed value plus its trailing mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub rolling_mean: f64,
}

/// Series with a trailing-mean overlay, rounded for display.
pub fn chart_points(series: &MetricSeries, window: usize, precision: u32) -> Vec<ChartPoint> {
    let means = rolling_means(&series.values(), window);
    series
        .observations
        .iter()
        .zip(means)
        .map(|(obs, rolling_mean)| ChartPoint {
            date: obs.date,
            value: round_to(obs.value, precision),
            rolling_mean: round_to(rolling_mean, precision),
        })
        .collect()
}
