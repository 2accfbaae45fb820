//! Error types for health analysis.
//!
//! This module contains error types and the Result alias.

mod analysis_error;

pub use analysis_error::{AnalysisError, InputError, Result};
