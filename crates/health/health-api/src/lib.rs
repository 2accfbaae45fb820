//! Health Analysis API
//!
//! Configuration types and builders for health metric analysis.

mod config;
mod polarity;

// Re-export SPI types
pub use health_spi::{AnalysisError, Polarity, Result};

pub use config::{
    AnalysisConfig, AnalysisConfigBuilder, AnomalyConfig, IngestionConfig, RollingConfig,
    TrendConfig,
};
pub use polarity::PolarityMap;
