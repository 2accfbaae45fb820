//! Health Analysis Facade
//!
//! Unified re-exports for health metric analysis.
//!
//! This facade provides a single entry point to all analysis functionality:
//! - Data model, `AnalysisError` and the stage traits from SPI
//! - `AnalysisConfig`, its builder and `PolarityMap` from API
//! - `analyze`, `HealthAnalyzer` and the stage implementations from Core
//!
//! # Example
//!
//! ```rust
//! use health_facade::{analyze, AnalysisConfig, Table, TrendDirection};
//!
//! let table = Table::from_string_rows(
//!     ["date", "steps"],
//!     vec![
//!         vec!["2024-01-01", "4000"],
//!         vec!["2024-01-02", "4200"],
//!     ],
//! )
//! .unwrap();
//!
//! let result = analyze(&table, &AnalysisConfig::default()).unwrap();
//! assert_eq!(result.trends["steps"].direction, TrendDirection::InsufficientData);
//! ```

// Re-export everything from SPI
pub use health_spi::*;

// Re-export everything from API
pub use health_api::*;

// Re-export everything from Core
pub use health_core::*;
