//! Held-out scores of fitted models.

/// The coefficient of determination of `y_pred` against `y_true`.
///
/// When `y_true` is constant the score is `1.0` for a perfect prediction and `0.0`
/// for anything else.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len();
    if n == 0 {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / n as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / y_true.len() as f64
}

/// The fraction of matching labels.
pub fn accuracy_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    hits as f64 / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r2_of_perfect_and_mean_predictions() {
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(r2_score(&y, &y), 1.0);
        assert_eq!(r2_score(&y, &[2.5; 4]), 0.0);
        assert!(r2_score(&y, &[4.0, 3.0, 2.0, 1.0]) < 0.0);
    }

    #[test]
    fn r2_of_a_constant_target() {
        assert_eq!(r2_score(&[3.0, 3.0], &[3.0, 3.0]), 1.0);
        assert_eq!(r2_score(&[3.0, 3.0], &[3.0, 4.0]), 0.0);
    }

    #[test]
    fn mse_and_accuracy() {
        assert_eq!(mean_squared_error(&[0.0, 0.0], &[1.0, 3.0]), 5.0);
        assert_eq!(accuracy_score(&[1, 0, 1, 1], &[1, 1, 1, 0]), 0.5);
    }
}
