//! Trend classification types.

use serde::{Deserialize, Serialize};

/// Whether an increase of a metric is beneficial or harmful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    pub fn flipped(self) -> Self {
        match self {
            Polarity::HigherIsBetter => Polarity::LowerIsBetter,
            Polarity::LowerIsBetter => Polarity::HigherIsBetter,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Polarity::HigherIsBetter => "higher is better",
            Polarity::LowerIsBetter => "lower is better",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "higher" | "up" | "higher_is_better" => Ok(Polarity::HigherIsBetter),
            "lower" | "down" | "lower_is_better" => Ok(Polarity::LowerIsBetter),
            other => Err(format!(
                "unknown polarity '{}': use 'higher' or 'lower'",
                other
            )),
        }
    }
}

/// Trajectory label for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    /// The prior window held fewer than two observations.
    InsufficientData,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
            TrendDirection::InsufficientData => "insufficient_data",
        };
        write!(f, "{}", s)
    }
}

/// Raw direction of change, independent of polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Rising,
    Falling,
    Flat,
}

/// Requested window size and the observations it actually held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub size: usize,
    pub observations: usize,
}

/// Trend of one metric: recent window compared with the window before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub movement: Movement,
    pub polarity: Polarity,
    /// `mean(recent) - mean(prior)`; `None` when the prior window is too thin.
    pub delta: Option<f64>,
    /// `delta / max(|mean(prior)|, epsilon)`.
    pub relative_change: Option<f64>,
    pub recent_mean: Option<f64>,
    pub prior_mean: Option<f64>,
    pub recent_window: WindowSpan,
    pub prior_window: WindowSpan,
}

impl TrendResult {
    pub fn is_insufficient(&self) -> bool {
        self.direction == TrendDirection::InsufficientData
    }
}
