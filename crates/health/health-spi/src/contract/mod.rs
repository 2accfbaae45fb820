//! Contract definitions for health analysis stages.
//!
//! This module contains trait definitions that stage implementations provide.

mod stages;

pub use stages::{AnomalyDetector, TrendClassifier};
