//! Per-metric polarity configuration.

use std::collections::BTreeMap;

use health_spi::Polarity;
use serde::{Deserialize, Serialize};

const HIGHER_IS_BETTER: &[&str] = &[
    "steps",
    "sleep",
    "sleep_hours",
    "water",
    "water_ml",
    "water_intake",
    "active_minutes",
    "distance_km",
    "hrv",
];

const LOWER_IS_BETTER: &[&str] = &[
    "heart_rate",
    "resting_heart_rate",
    "stress",
    "stress_level",
];

/// Polarity per metric name, with an optional fallback for unlisted metrics.
///
/// When deserialized, listed metrics are merged over the
/// [`common_health_metrics`](Self::common_health_metrics) preset unless
/// `"preset": false` is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PolarityMapSerde", into = "PolarityMapSerde")]
pub struct PolarityMap {
    pub metrics: BTreeMap<String, Polarity>,
    pub fallback: Option<Polarity>,
}

#[derive(Serialize, Deserialize)]
struct PolarityMapSerde {
    #[serde(default = "default_preset")]
    preset: bool,
    #[serde(default)]
    metrics: BTreeMap<String, Polarity>,
    #[serde(default)]
    fallback: Option<Polarity>,
}

fn default_preset() -> bool {
    true
}

impl From<PolarityMapSerde> for PolarityMap {
    fn from(raw: PolarityMapSerde) -> Self {
        let mut map = if raw.preset {
            Self::common_health_metrics()
        } else {
            Self::new()
        };
        for (metric, polarity) in raw.metrics {
            map.insert(metric, polarity);
        }
        map.fallback = raw.fallback;
        map
    }
}

impl From<PolarityMap> for PolarityMapSerde {
    // Written out in full, so reading it back reproduces the map exactly.
    fn from(map: PolarityMap) -> Self {
        Self {
            preset: false,
            metrics: map.metrics,
            fallback: map.fallback,
        }
    }
}

impl PolarityMap {
    /// An empty map with no fallback.
    pub fn new() -> Self {
        Self {
            metrics: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Preset for the columns common wearable exports produce.
    pub fn common_health_metrics() -> Self {
        let mut map = Self::new();
        for name in HIGHER_IS_BETTER {
            map.metrics.insert(name.to_string(), Polarity::HigherIsBetter);
        }
        for name in LOWER_IS_BETTER {
            map.metrics.insert(name.to_string(), Polarity::LowerIsBetter);
        }
        map
    }

    /// Set the polarity of one metric.
    pub fn with(mut self, metric: impl Into<String>, polarity: Polarity) -> Self {
        self.insert(metric, polarity);
        self
    }

    /// Set the polarity used for metrics not listed explicitly.
    pub fn with_fallback(mut self, polarity: Polarity) -> Self {
        self.fallback = Some(polarity);
        self
    }

    pub fn insert(&mut self, metric: impl Into<String>, polarity: Polarity) {
        self.metrics.insert(metric.into().trim().to_ascii_lowercase(), polarity);
    }

    /// Polarity for a metric; names match case-insensitively.
    pub fn get(&self, metric: &str) -> Option<Polarity> {
        let metric = metric.trim();
        self.metrics
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(metric))
            .map(|(_, polarity)| *polarity)
            .or(self.fallback)
    }
}

impl Default for PolarityMap {
    fn default() -> Self {
        Self::common_health_metrics()
    }
}
