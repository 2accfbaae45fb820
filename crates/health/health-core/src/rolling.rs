//! Rolling statistics.

use health_api::RollingConfig;
use health_spi::{MetricSeries, RollingSummary, WindowMean};

use crate::stats::{mean, tail};

/// Mean of the last `window` values.
///
/// Short input degrades to the mean of everything available, flagged as
/// partial. Returns `None` only for empty input.
pub fn window_mean(values: &[f64], window: usize) -> Option<WindowMean> {
    let slice = tail(values, window);
    let mean = mean(slice)?;
    Some(WindowMean {
        window,
        observations: slice.len(),
        mean,
        partial: slice.len() < window,
    })
}

/// Short and optional long window means as of the last observation.
pub fn rolling_summary(series: &MetricSeries, config: &RollingConfig) -> Option<RollingSummary> {
    let as_of = series.last()?.date;
    let values = series.values();
    let short = window_mean(&values, config.window)?;
    let long = config
        .long_window
        .and_then(|window| window_mean(&values, window));

    Some(RollingSummary { as_of, short, long })
}

/// Trailing mean at every position, each over at most `window` values.
pub fn rolling_means(values: &[f64], window: usize) -> Vec<f64> {
    (1..=values.len())
        .filter_map(|end| mean(tail(&values[..end], window)))
        .collect()
}
