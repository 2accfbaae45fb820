//! Descriptive statistics over value slices.

/// Arithmetic mean; `None` for an empty slice.
///
/// Finite input always yields a finite mean, even when the plain sum would
/// overflow.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let n = data.len() as f64;
    let sum = data.iter().sum::<f64>();
    if sum.is_finite() {
        return Some(sum / n);
    }
    Some(data.iter().map(|x| x / n).sum())
}

/// Population standard deviation around a precomputed mean.
pub fn std_dev(data: &[f64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let n = data.len() as f64;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return variance.sqrt();
    }

    // Squared deviations overflowed: rescale by the largest half-deviation.
    let half_deviations: Vec<f64> = data.iter().map(|x| x / 2.0 - mean / 2.0).collect();
    let scale = half_deviations.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    let scaled = half_deviations.iter().map(|d| (d / scale).powi(2)).sum::<f64>() / n;
    2.0 * scale * scaled.sqrt()
}

/// The last `window` elements of `data`, or all of it when shorter.
pub fn tail(data: &[f64], window: usize) -> &[f64] {
    &data[data.len().saturating_sub(window)..]
}
