//! Least-squares slope estimation

/// Ordinary least-squares slope of `y` against `x = 0..n-1`
///
/// Returns 0.0 for an empty sequence and whenever the denominator vanishes
/// (a single point).
pub fn slope(y: &[f64]) -> f64 {
    let n = y.len() as f64;
    if y.is_empty() {
        return 0.0;
    }

    let sum_x: f64 = (0..y.len()).map(|i| i as f64).sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xx: f64 = (0..y.len()).map(|i| (i as f64).powi(2)).sum();
    let sum_xy: f64 = y.iter().enumerate().map(|(i, v)| i as f64 * v).sum();

    let denominator = n * sum_xx - sum_x.powi(2);
    if denominator == 0.0 {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Slope of a per-day count array
pub fn count_slope(counts: &[u32]) -> f64 {
    let y: Vec<f64> = counts.iter().map(|&c| f64::from(c)).collect();
    slope(&y)
}
