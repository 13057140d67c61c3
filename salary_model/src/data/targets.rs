//! Training-time label derivation.
//!
//! The classification threshold only ever exists while training: it is computed from
//! the deduplicated `salary_in_usd` column and is never persisted nor asked for at
//! prediction time.

/// Computes the median of `values`.
///
/// # Returns
/// The middle value for an odd amount of values, the mean of the two middle values
/// for an even amount, or `None` if `values` is empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    Some(median)
}

/// Labels every salary as high (`1`) when it's strictly above `threshold`, low (`0`)
/// otherwise.
pub fn salary_levels(salaries_usd: &[f64], threshold: f64) -> Vec<u8> {
    salaries_usd
        .iter()
        .map(|&usd| u8::from(usd > threshold))
        .collect()
}
