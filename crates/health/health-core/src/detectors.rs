//! Anomaly detector implementations.

use health_api::AnomalyConfig;
use health_spi::{Anomaly, AnomalyDetector, AnomalySeverity, MetricSeries};

use crate::stats::{mean, std_dev};

// ============================================================================
// Trailing Z-Score Detector
// ============================================================================

/// Trailing-window z-score detector.
///
/// Each point is scored against the mean and standard deviation of the
/// `window` observations before it. When that window is flat, its zero
/// standard deviation is replaced by `min_std_ratio * |mean|`, so a jump off
/// a constant baseline still gets a finite score. Any other window is scored
/// with its own standard deviation.
#[derive(Debug, Clone)]
pub struct TrailingZScoreDetector {
    window: usize,
    min_window: usize,
    threshold: f64,
    critical_threshold: f64,
    min_std_ratio: f64,
}

impl TrailingZScoreDetector {
    /// Create a detector with the given threshold and default windows.
    pub fn new(threshold: f64) -> Self {
        Self::from_config(&AnomalyConfig::new(threshold))
    }

    /// Create from configuration.
    pub fn from_config(config: &AnomalyConfig) -> Self {
        Self {
            window: config.window,
            min_window: config.min_window,
            threshold: config.threshold,
            critical_threshold: config.critical_threshold,
            min_std_ratio: config.min_std_ratio,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Signed z-score of `value` against a trailing window, if it can be scored.
    fn score(&self, trailing: &[f64], value: f64) -> Option<(f64, f64, f64)> {
        let first = *trailing.first()?;
        // Exact for flat windows, so a repeated value scores exactly zero.
        let (mean, raw_sigma) = if trailing.iter().all(|&x| x == first) {
            (first, 0.0)
        } else {
            let mean = mean(trailing)?;
            (mean, std_dev(trailing, mean))
        };
        let sigma = if raw_sigma > 0.0 {
            raw_sigma
        } else {
            self.min_std_ratio * mean.abs()
        };
        if sigma <= 0.0 || !sigma.is_finite() {
            return None;
        }
        Some(((value - mean) / sigma, mean, sigma))
    }
}

impl Default for TrailingZScoreDetector {
    fn default() -> Self {
        Self::from_config(&AnomalyConfig::default())
    }
}

impl AnomalyDetector for TrailingZScoreDetector {
    fn detect(&self, series: &MetricSeries) -> Vec<Anomaly> {
        let values = series.values();
        let mut anomalies = Vec::new();

        for (index, obs) in series.observations.iter().enumerate().skip(self.min_window) {
            let trailing = &values[index.saturating_sub(self.window)..index];
            let Some((score, mean, sigma)) = self.score(trailing, obs.value) else {
                continue;
            };
            if score.abs() <= self.threshold {
                continue;
            }

            let severity = if score.abs() >= self.critical_threshold {
                AnomalySeverity::Critical
            } else {
                AnomalySeverity::Warning
            };

            anomalies.push(Anomaly {
                metric: series.name.clone(),
                date: obs.date,
                value: obs.value,
                mean,
                std_dev: sigma,
                threshold: self.threshold,
                score,
                severity,
            });
        }

        anomalies
    }

    fn warmup(&self) -> usize {
        self.min_window
    }
}
