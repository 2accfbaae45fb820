//! Window trend classifier.

use health_api::TrendConfig;
use health_spi::{
    MetricSeries, Movement, Polarity, TrendClassifier, TrendDirection, TrendResult, WindowSpan,
};

use crate::stats::mean;

/// Compares the mean of the last `window` observations with the mean of the
/// `window` observations before them.
#[derive(Debug, Clone)]
pub struct WindowTrendClassifier {
    window: usize,
    stability_threshold: f64,
    epsilon: f64,
}

impl WindowTrendClassifier {
    /// Create a classifier with the given window and stability threshold.
    pub fn new(window: usize, stability_threshold: f64) -> Self {
        Self {
            window,
            stability_threshold,
            epsilon: TrendConfig::default().epsilon,
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &TrendConfig) -> Self {
        Self {
            window: config.window,
            stability_threshold: config.stability_threshold,
            epsilon: config.epsilon,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for WindowTrendClassifier {
    fn default() -> Self {
        Self::from_config(&TrendConfig::default())
    }
}

impl TrendClassifier for WindowTrendClassifier {
    fn classify(&self, series: &MetricSeries, polarity: Polarity) -> TrendResult {
        let values = series.values();
        let split = values.len().saturating_sub(self.window);
        let recent = &values[split..];
        let prior = &values[split.saturating_sub(self.window)..split];

        let recent_mean = mean(recent);
        let prior_mean = mean(prior);
        let recent_window = WindowSpan {
            size: self.window,
            observations: recent.len(),
        };
        let prior_window = WindowSpan {
            size: self.window,
            observations: prior.len(),
        };

        let (recent_avg, prior_avg) = match (recent_mean, prior_mean) {
            (Some(r), Some(p)) if prior.len() >= 2 => (r, p),
            _ => {
                return TrendResult {
                    direction: TrendDirection::InsufficientData,
                    movement: Movement::Flat,
                    polarity,
                    delta: None,
                    relative_change: None,
                    recent_mean,
                    prior_mean,
                    recent_window,
                    prior_window,
                }
            }
        };

        let delta = recent_avg - prior_avg;
        let relative_change = delta / prior_avg.abs().max(self.epsilon);
        let stable = relative_change.abs() < self.stability_threshold;

        let movement = if stable || delta == 0.0 {
            Movement::Flat
        } else if delta > 0.0 {
            Movement::Rising
        } else {
            Movement::Falling
        };

        let direction = match (movement, polarity) {
            (Movement::Flat, _) => TrendDirection::Stable,
            (Movement::Rising, Polarity::HigherIsBetter)
            | (Movement::Falling, Polarity::LowerIsBetter) => TrendDirection::Improving,
            (Movement::Rising, Polarity::LowerIsBetter)
            | (Movement::Falling, Polarity::HigherIsBetter) => TrendDirection::Declining,
        };

        TrendResult {
            direction,
            movement,
            polarity,
            delta: Some(delta),
            relative_change: Some(relative_change),
            recent_mean,
            prior_mean,
            recent_window,
            prior_window,
        }
    }
}
