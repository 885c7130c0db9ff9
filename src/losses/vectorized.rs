// src/losses/vectorized.rs

use crate::backend::LossFloat;
use crate::error::{LossError, Result};
use crate::losses::stability::row_maxima;
use crate::losses::{check_inputs, ensure_finite, l2_penalty};
use ndarray::{Array2, Axis};

/// Softmax loss function, vectorized version.
///
/// Inputs and outputs are the same as [`softmax_loss_naive`](super::softmax_loss_naive).
/// The (N, C) score matrix comes from a single matrix product and is shifted
/// by the maximum of each row before exponentiating.
pub fn softmax_loss_vectorized<T: LossFloat>(
    w: &Array2<T>,
    x: &Array2<T>,
    y: &[usize],
    reg: T,
) -> Result<(T, Array2<T>)> {
    let dims = check_inputs(w, x, y, reg)?;
    let _span = tracing::debug_span!(
        "softmax_loss_vectorized",
        n = dims.num_train,
        d = dims.dim,
        c = dims.num_classes
    )
    .entered();

    let mut scores = x.dot(w);
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(LossError::NumericDegeneracy(
            "class scores overflowed".to_string(),
        ));
    }

    // Row-wise shift; the global maximum would let small rows underflow.
    let maxima = row_maxima(scores.view());
    scores -= &maxima.insert_axis(Axis(1));

    let exp_scores = scores.mapv(|s| s.exp());
    let sum_exp = exp_scores.sum_axis(Axis(1)).insert_axis(Axis(1));
    let log_probs = &scores - &sum_exp.mapv(|s| s.ln());
    let mut probs = &exp_scores / &sum_exp;

    let num_train = T::from_count(dims.num_train);
    // Gather the true-class entries; a masked product would turn -inf * 0 into NaN.
    let true_log_probs = y
        .iter()
        .enumerate()
        .fold(T::zero(), |acc, (i, &label)| acc + log_probs[[i, label]]);
    let data_loss = -true_log_probs / num_train;
    let loss = data_loss + l2_penalty(w, reg);

    // One-hot indicator of the true class of every row.
    let true_class = one_hot::<T>(y, dims.num_classes);
    probs -= &true_class;
    let mut dw = x.t().dot(&probs);
    dw.mapv_inplace(|g| g / num_train);
    dw.scaled_add(reg, w);

    ensure_finite(loss, &dw)?;
    tracing::trace!(loss = loss.as_f64(), "vectorized softmax loss");
    Ok((loss, dw))
}

/// (N, C) matrix with a one at `(i, y[i])` and zeros elsewhere.
pub fn one_hot<T: LossFloat>(y: &[usize], num_classes: usize) -> Array2<T> {
    let mut indicator = Array2::<T>::zeros((y.len(), num_classes));
    for (mut row, &label) in indicator.rows_mut().into_iter().zip(y) {
        row[label] = T::one();
    }
    indicator
}

#[cfg(test)]
mod tests {
    use super::one_hot;
    use ndarray::array;

    #[test]
    fn test_one_hot_marks_true_class() {
        let indicator = one_hot::<f64>(&[2, 0, 1], 3);
        assert_eq!(
            indicator,
            array![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }
}
