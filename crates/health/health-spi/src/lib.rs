//! Health Analysis Service Provider Interface
//!
//! Defines the data model, error types and stage contracts shared by every
//! health analysis crate.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalyDetector, TrendClassifier};
pub use error::{AnalysisError, InputError, Result};
pub use model::{
    AnalysisResult, Anomaly, AnomalySeverity, Cell, DateGap, IngestionReport, MetricCoverage,
    MetricSeries, Movement, Observation, Polarity, RollingSummary, Table, TrendDirection,
    TrendResult, WindowMean, WindowSpan,
};
