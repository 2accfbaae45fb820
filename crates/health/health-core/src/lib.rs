//! Health Analysis Core
//!
//! Implementations of the ingestion, rolling statistics, trend and anomaly
//! stages, result assembly, and presentation helpers.
//!
//! Every stage is a pure function of one normalized series plus
//! configuration; nothing here performs I/O or logs.

pub mod analyzer;
pub mod assembly;
pub mod detectors;
pub mod ingest;
pub mod presentation;
pub mod rolling;
pub mod stats;
pub mod trend;

pub use analyzer::{analyze, analyze_metric, HealthAnalyzer};
pub use assembly::{assemble, verify, MetricAnalysis};
pub use detectors::TrailingZScoreDetector;
pub use ingest::{ingest, parse_date, NormalizedTable, DATE_COLUMN_CANDIDATES};
pub use presentation::{chart_points, round_to, ChartPoint, SummaryView};
pub use rolling::{rolling_means, rolling_summary, window_mean};
pub use trend::WindowTrendClassifier;
