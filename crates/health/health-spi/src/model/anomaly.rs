//! Anomaly types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse anomaly severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Warning,
    Critical,
}

/// A flagged observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub metric: String,
    pub date: NaiveDate,
    pub value: f64,
    /// Mean of the trailing window, excluding this point.
    pub mean: f64,
    /// Standard deviation of the trailing window, or the noise floor when
    /// that window was flat.
    pub std_dev: f64,
    /// Threshold in standard-deviation units.
    pub threshold: f64,
    /// Signed deviation in standard-deviation units.
    pub score: f64,
    pub severity: AnomalySeverity,
}

impl Anomaly {
    pub fn is_above_mean(&self) -> bool {
        self.score > 0.0
    }
}
