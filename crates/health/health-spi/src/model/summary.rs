//! Rolling summary types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mean over the trailing window ending at the last observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMean {
    /// Requested window size.
    pub window: usize,
    /// Observations actually averaged.
    pub observations: usize,
    /// Full-precision mean.
    pub mean: f64,
    /// Fewer than `window` observations were available.
    pub partial: bool,
}

/// Per-metric rolling averages as of the most recent observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingSummary {
    pub as_of: NaiveDate,
    pub short: WindowMean,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<WindowMean>,
}

impl RollingSummary {
    /// Short-window mean.
    pub fn value(&self) -> f64 {
        self.short.mean
    }

    pub fn is_partial(&self) -> bool {
        self.short.partial
    }
}
