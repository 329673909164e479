/// Representative salary for a possibly one-sided range.
///
/// Recruiters often post a single bound; the missing one is approximated by
/// shifting the known bound 20% towards the expected midpoint.
pub fn estimate(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * 1.2),
        (None, Some(to)) => Some(to * 0.8),
        (None, None) => None,
    }
}

/// Integer-truncated mean of the collected estimates, 0 when there are none.
pub(crate) fn average(estimates: &[f64]) -> u64 {
    if estimates.is_empty() {
        return 0;
    }
    let sum: f64 = estimates.iter().sum();
    (sum / estimates.len() as f64) as u64
}
