//! Prediction accuracy metrics for offline evaluation.

/// Root mean squared error over paired actual/predicted ratings.
/// Returns 0.0 for empty input.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    (sum / actual.len() as f64).sqrt()
}

/// Mean absolute error over paired actual/predicted ratings.
/// Returns 0.0 for empty input.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    let sum: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    sum / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_score_zero() {
        let v = [3.0, 4.0, 5.0];
        assert_eq!(rmse(&v, &v), 0.0);
        assert_eq!(mae(&v, &v), 0.0);
    }

    #[test]
    fn rmse_penalizes_large_errors_more_than_mae() {
        let actual = [3.0, 3.0, 3.0, 3.0];
        let predicted = [3.0, 3.0, 3.0, 5.0];
        assert!(rmse(&actual, &predicted) > mae(&actual, &predicted));
    }

    #[test]
    fn known_values() {
        let actual = [1.0, 2.0];
        let predicted = [2.0, 4.0];
        assert!((mae(&actual, &predicted) - 1.5).abs() < 1e-12);
        assert!((rmse(&actual, &predicted) - (2.5f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(rmse(&[], &[]), 0.0);
        assert_eq!(mae(&[], &[]), 0.0);
    }
}
