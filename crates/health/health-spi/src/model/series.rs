//! Normalized per-metric time series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// One named metric with strictly increasing dates and finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub observations: Vec<Observation>,
}

impl MetricSeries {
    /// Create a series, sorting by date and keeping the last value for a repeated date.
    ///
    /// Non-finite values are dropped.
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Self {
        let mut observations: Vec<Observation> = observations
            .into_iter()
            .filter(|obs| obs.value.is_finite())
            .collect();
        observations.sort_by_key(|obs| obs.date);

        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            name: name.into(),
            observations: deduped,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Values in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.value).collect()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Whether an observation with exactly this date and value exists.
    pub fn contains(&self, date: NaiveDate, value: f64) -> bool {
        self.observations
            .binary_search_by_key(&date, |obs| obs.date)
            .map(|index| self.observations[index].value == value)
            .unwrap_or(false)
    }
}
