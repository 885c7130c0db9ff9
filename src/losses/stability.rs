// src/losses/stability.rs
// Numerically stable softmax building blocks shared by both evaluators.
// Softmax is invariant to adding a constant to every score of a row, so
// subtracting the row maximum before exponentiating keeps exp() <= 1
// without changing the resulting distribution.

use crate::backend::LossFloat;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Largest score of a row.
pub fn row_max<T: LossFloat>(scores: ArrayView1<'_, T>) -> T {
    scores.fold(T::neg_infinity(), |acc, &s| acc.max(s))
}

/// Largest score of every row of an (N, C) score matrix.
pub fn row_maxima<T: LossFloat>(scores: ArrayView2<'_, T>) -> Array1<T> {
    scores.fold_axis(Axis(1), T::neg_infinity(), |&acc, &s| acc.max(s))
}

/// Subtracts the row maximum from every score, so the largest entry becomes 0.
pub fn shift_by_max<T: LossFloat>(scores: ArrayView1<'_, T>) -> Array1<T> {
    let max = row_max(scores);
    scores.mapv(|s| s - max)
}

/// `log(sum(exp(scores)))` computed as `max + log(sum(exp(scores - max)))`.
pub fn log_sum_exp<T: LossFloat>(scores: ArrayView1<'_, T>) -> T {
    let max = row_max(scores);
    let sum_exp = scores.fold(T::zero(), |acc, &s| acc + (s - max).exp());
    max + sum_exp.ln()
}

/// Probability distribution over the classes of one score row.
pub fn softmax<T: LossFloat>(scores: ArrayView1<'_, T>) -> Array1<T> {
    let exp_shifted = shift_by_max(scores).mapv(|s| s.exp());
    let sum_exp = exp_shifted.sum();
    exp_shifted.mapv(|e| e / sum_exp)
}

/// Log-probabilities of one score row.
/// Stays finite even when a probability underflows to zero.
pub fn log_softmax<T: LossFloat>(scores: ArrayView1<'_, T>) -> Array1<T> {
    let log_norm = log_sum_exp(scores);
    scores.mapv(|s| s - log_norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    #[test]
    fn test_shift_by_max_zeroes_the_largest_score() {
        let shifted = shift_by_max(array![1.0f64, 5.0, -2.0].view());
        assert_eq!(shifted, array![-4.0, 0.0, -7.0]);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(array![0.3f64, -1.2, 2.5, 0.0].view());
        assert_relative_eq!(probs.sum(), 1.0, epsilon = 1e-12);
        assert!(probs.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_softmax_is_shift_invariant() {
        let scores = array![0.5f64, 1.5, -0.25];
        let shifted = scores.mapv(|s| s + 123.456);
        let a = softmax(scores.view());
        let b = softmax(shifted.view());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*pa, *pb, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_large_scores_do_not_overflow() {
        let probs = softmax(array![1000.0f64, 1001.0, 999.0].view());
        assert!(probs.iter().all(|p| p.is_finite()));
        assert_relative_eq!(probs.sum(), 1.0, epsilon = 1e-12);

        let lse = log_sum_exp(array![1000.0f64, 1000.0].view());
        assert_relative_eq!(lse, 1000.0 + 2.0f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_log_softmax_stays_finite_when_probability_underflows() {
        let log_probs = log_softmax(array![0.0f64, -2000.0].view());
        assert!(log_probs.iter().all(|l| l.is_finite()));
        assert_relative_eq!(log_probs[1], -2000.0, epsilon = 1e-9);

        // The plain softmax rounds the second entry to zero.
        let probs = softmax(array![0.0f64, -2000.0].view());
        assert_eq!(probs[1], 0.0);
    }

    #[test]
    fn test_row_maxima_is_per_row() {
        let scores: Array2<f64> = array![[1.0, 9.0], [-3.0, -4.0], [7.0, 7.0]];
        assert_eq!(row_maxima(scores.view()), array![9.0, -3.0, 7.0]);
    }
}
