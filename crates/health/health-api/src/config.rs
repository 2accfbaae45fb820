//! Analysis configuration types.

use health_spi::{AnalysisError, Polarity, Result};
use serde::{Deserialize, Serialize};

use crate::polarity::PolarityMap;

// ============================================================================
// Stage Configuration
// ============================================================================

/// Ingestion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Date column name; detected from common names when `None`.
    pub date_column: Option<String>,
    /// User identifier column, never treated as a metric.
    pub user_column: Option<String>,
    /// Minimum share of numeric cells among a column's non-missing cells
    /// for it to count as a metric (default: 0.5).
    pub min_numeric_fraction: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            date_column: None,
            user_column: Some("user_id".to_string()),
            min_numeric_fraction: 0.5,
        }
    }
}

/// Rolling average configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    /// Short window in observations (default: 7).
    pub window: usize,
    /// Optional long window in observations (default: 30).
    pub long_window: Option<usize>,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            window: 7,
            long_window: Some(30),
        }
    }
}

impl RollingConfig {
    pub fn new(window: usize, long_window: Option<usize>) -> Self {
        Self {
            window,
            long_window,
        }
    }
}

/// Trend classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Size of the recent and prior windows (default: 7).
    pub window: usize,
    /// Relative change below which a metric is stable (default: 0.05).
    pub stability_threshold: f64,
    /// Lower bound on the prior mean magnitude when computing relative change.
    pub epsilon: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 7,
            stability_threshold: 0.05,
            epsilon: 1e-9,
        }
    }
}

impl TrendConfig {
    pub fn new(window: usize, stability_threshold: f64) -> Self {
        Self {
            window,
            stability_threshold,
            ..Self::default()
        }
    }
}

/// Trailing z-score anomaly configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Trailing window in observations (default: 7).
    pub window: usize,
    /// Prior observations required before a point can be flagged (default: 3).
    pub min_window: usize,
    /// Deviation threshold in standard deviations (default: 2.0).
    pub threshold: f64,
    /// Deviation at which an anomaly is critical (default: 5.0).
    pub critical_threshold: f64,
    /// Standard deviation floor as a fraction of the trailing mean's magnitude
    /// (default: 0.01). Zero disables flagging against flat windows entirely.
    pub min_std_ratio: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            window: 7,
            min_window: 3,
            threshold: 2.0,
            critical_threshold: 5.0,
            min_std_ratio: 0.01,
        }
    }
}

impl AnomalyConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

// ============================================================================
// Analysis Configuration
// ============================================================================

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ingestion: IngestionConfig,
    pub rolling: RollingConfig,
    pub trend: TrendConfig,
    pub anomaly: AnomalyConfig,
    pub polarity: PolarityMap,
    /// Decimal places used by presentation helpers (default: 2).
    pub display_precision: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ingestion: IngestionConfig::default(),
            rolling: RollingConfig::default(),
            trend: TrendConfig::default(),
            anomaly: AnomalyConfig::default(),
            polarity: PolarityMap::default(),
            display_precision: 2,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Check every parameter, returning the first invalid one.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.ingestion.min_numeric_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(AnalysisError::invalid_parameter(
                "min_numeric_fraction",
                "must be in (0, 1]",
            ));
        }

        require_positive_window("rolling.window", self.rolling.window)?;
        if let Some(long) = self.rolling.long_window {
            if long <= self.rolling.window {
                return Err(AnalysisError::invalid_parameter(
                    "rolling.long_window",
                    "must be larger than rolling.window",
                ));
            }
        }

        require_positive_window("trend.window", self.trend.window)?;
        require_non_negative("trend.stability_threshold", self.trend.stability_threshold)?;
        if !(self.trend.epsilon.is_finite() && self.trend.epsilon > 0.0) {
            return Err(AnalysisError::invalid_parameter(
                "trend.epsilon",
                "must be a positive finite number",
            ));
        }

        require_positive_window("anomaly.window", self.anomaly.window)?;
        if self.anomaly.min_window == 0 || self.anomaly.min_window > self.anomaly.window {
            return Err(AnalysisError::invalid_parameter(
                "anomaly.min_window",
                "must be in [1, anomaly.window]",
            ));
        }
        require_non_negative("anomaly.threshold", self.anomaly.threshold)?;
        require_non_negative("anomaly.critical_threshold", self.anomaly.critical_threshold)?;
        require_non_negative("anomaly.min_std_ratio", self.anomaly.min_std_ratio)?;

        Ok(())
    }
}

fn require_positive_window(name: &str, window: usize) -> Result<()> {
    if window == 0 {
        return Err(AnalysisError::invalid_parameter(name, "must be at least 1"));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnalysisError::invalid_parameter(
            name,
            "must be a non-negative finite number",
        ));
    }
    Ok(())
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Create a builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn date_column(mut self, name: &str) -> Self {
        self.config.ingestion.date_column = Some(name.to_string());
        self
    }

    pub fn user_column(mut self, name: Option<&str>) -> Self {
        self.config.ingestion.user_column = name.map(str::to_string);
        self
    }

    pub fn min_numeric_fraction(mut self, fraction: f64) -> Self {
        self.config.ingestion.min_numeric_fraction = fraction;
        self
    }

    /// Set the short rolling window.
    pub fn window(mut self, window: usize) -> Self {
        self.config.rolling.window = window;
        self
    }

    pub fn long_window(mut self, long_window: Option<usize>) -> Self {
        self.config.rolling.long_window = long_window;
        self
    }

    pub fn trend_window(mut self, window: usize) -> Self {
        self.config.trend.window = window;
        self
    }

    pub fn stability_threshold(mut self, threshold: f64) -> Self {
        self.config.trend.stability_threshold = threshold;
        self
    }

    pub fn anomaly_window(mut self, window: usize) -> Self {
        self.config.anomaly.window = window;
        self
    }

    pub fn min_window(mut self, min_window: usize) -> Self {
        self.config.anomaly.min_window = min_window;
        self
    }

    /// Set the anomaly threshold in standard deviations.
    pub fn sigma(mut self, threshold: f64) -> Self {
        self.config.anomaly.threshold = threshold;
        self
    }

    pub fn critical_sigma(mut self, threshold: f64) -> Self {
        self.config.anomaly.critical_threshold = threshold;
        self
    }

    pub fn min_std_ratio(mut self, ratio: f64) -> Self {
        self.config.anomaly.min_std_ratio = ratio;
        self
    }

    pub fn polarity(mut self, metric: &str, polarity: Polarity) -> Self {
        self.config.polarity.insert(metric, polarity);
        self
    }

    pub fn polarity_map(mut self, map: PolarityMap) -> Self {
        self.config.polarity = map;
        self
    }

    pub fn fallback_polarity(mut self, polarity: Polarity) -> Self {
        self.config.polarity.fallback = Some(polarity);
        self
    }

    pub fn display_precision(mut self, precision: u32) -> Self {
        self.config.display_precision = precision;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
