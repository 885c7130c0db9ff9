// src/losses/naive.rs

use crate::backend::LossFloat;
use crate::error::{LossError, Result};
use crate::losses::stability::log_softmax;
use crate::losses::{check_inputs, ensure_finite, l2_penalty};
use ndarray::Array2;

/// Softmax loss function, naive implementation (with loops).
///
/// Inputs have dimension D, there are C classes, and we operate on minibatches
/// of N examples:
/// - `w`: weights of shape (D, C)
/// - `x`: a minibatch of data of shape (N, D)
/// - `y`: labels of length N; `y[i] = c` means `x[i]` has label c, where 0 <= c < C
/// - `reg`: regularization strength
///
/// Returns the averaged cross-entropy loss plus `0.5 * reg * sum(W^2)`, and the
/// gradient with respect to `w`, freshly allocated with the same shape as `w`.
pub fn softmax_loss_naive<T: LossFloat>(
    w: &Array2<T>,
    x: &Array2<T>,
    y: &[usize],
    reg: T,
) -> Result<(T, Array2<T>)> {
    let dims = check_inputs(w, x, y, reg)?;
    let _span = tracing::debug_span!(
        "softmax_loss_naive",
        n = dims.num_train,
        d = dims.dim,
        c = dims.num_classes
    )
    .entered();

    let mut loss = T::zero();
    let mut dw = Array2::<T>::zeros(w.raw_dim());

    for i in 0..dims.num_train {
        let xi = x.row(i);
        let scores = xi.dot(w);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(LossError::NumericDegeneracy(format!(
                "class scores of example {} overflowed",
                i
            )));
        }

        // Max-shifted log-probabilities; exp() of them is the softmax row.
        let log_probs = log_softmax(scores.view());

        for j in 0..dims.num_classes {
            let prob = log_probs[j].exp();
            if y[i] == j {
                loss = loss - log_probs[j];
                dw.column_mut(j).scaled_add(-(T::one() - prob), &xi);
            } else {
                dw.column_mut(j).scaled_add(prob, &xi);
            }
        }
    }

    let num_train = T::from_count(dims.num_train);
    let loss = loss / num_train + l2_penalty(w, reg);
    dw.mapv_inplace(|g| g / num_train);
    dw.scaled_add(reg, w);

    ensure_finite(loss, &dw)?;
    tracing::trace!(loss = loss.as_f64(), "naive softmax loss");
    Ok((loss, dw))
}
