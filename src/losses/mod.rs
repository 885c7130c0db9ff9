// src/losses/mod.rs
// Softmax cross-entropy loss for a linear classifier, in a loop form and a
// whole-matrix form that must agree within floating-point tolerance.

pub mod naive;
pub mod stability;
pub mod vectorized;


use crate::backend::LossFloat;
use crate::error::{LossError, Result};
use ndarray::Array2;

pub use naive::softmax_loss_naive;
pub use vectorized::softmax_loss_vectorized;

/// Common interface of the two evaluators.
/// Lets gradient checks and benchmarks treat both forms interchangeably.
pub trait LossEvaluator<T>
where
    T: LossFloat,
{
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Computes `(loss, dW)` for weights `w` (D, C), data `x` (N, D),
    /// labels `y` (N) and L2 strength `reg`.
    fn evaluate(
        &self,
        w: &Array2<T>,
        x: &Array2<T>,
        y: &[usize],
        reg: T,
    ) -> Result<(T, Array2<T>)>;
}

/// Per-example, per-class loops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Naive;

/// One matrix product plus row-wise reductions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vectorized;

impl<T: LossFloat> LossEvaluator<T> for Naive {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn evaluate(
        &self,
        w: &Array2<T>,
        x: &Array2<T>,
        y: &[usize],
        reg: T,
    ) -> Result<(T, Array2<T>)> {
        softmax_loss_naive(w, x, y, reg)
    }
}

impl<T: LossFloat> LossEvaluator<T> for Vectorized {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn evaluate(
        &self,
        w: &Array2<T>,
        x: &Array2<T>,
        y: &[usize],
        reg: T,
    ) -> Result<(T, Array2<T>)> {
        softmax_loss_vectorized(w, x, y, reg)
    }
}

/// Problem dimensions agreed on by W, X and y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dims {
    pub num_train: usize,
    pub dim: usize,
    pub num_classes: usize,
}

/// Validates a call before any arithmetic runs.
/// Checks, in order: D, N, emptiness, labels, reg, finiteness of W and X.
pub(crate) fn check_inputs<T: LossFloat>(
    w: &Array2<T>,
    x: &Array2<T>,
    y: &[usize],
    reg: T,
) -> Result<Dims> {
    let (dim, num_classes) = w.dim();
    let (num_train, x_dim) = x.dim();

    if x_dim != dim {
        return Err(LossError::ShapeMismatch {
            context: "columns of X must equal rows of W",
            expected: dim,
            got: x_dim,
        });
    }
    if y.len() != num_train {
        return Err(LossError::ShapeMismatch {
            context: "length of y must equal rows of X",
            expected: num_train,
            got: y.len(),
        });
    }
    if num_train == 0 {
        return Err(LossError::EmptyInput("minibatch has no examples"));
    }
    if num_classes == 0 {
        return Err(LossError::EmptyInput("weight matrix has no classes"));
    }
    if let Some((index, &label)) = y.iter().enumerate().find(|&(_, &l)| l >= num_classes) {
        return Err(LossError::InvalidLabel {
            index,
            label,
            num_classes,
        });
    }
    if !reg.is_finite() || reg < T::zero() {
        return Err(LossError::InvalidRegularization(reg.as_f64()));
    }
    if w.iter().any(|v| !v.is_finite()) {
        return Err(LossError::NumericDegeneracy(
            "weight matrix contains a non-finite entry".to_string(),
        ));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(LossError::NumericDegeneracy(
            "data matrix contains a non-finite entry".to_string(),
        ));
    }

    Ok(Dims {
        num_train,
        dim,
        num_classes,
    })
}

/// `0.5 * reg * sum(W^2)`, exactly zero when `reg` is zero.
pub(crate) fn l2_penalty<T: LossFloat>(w: &Array2<T>, reg: T) -> T {
    if reg == T::zero() {
        return T::zero();
    }
    let squared = w.fold(T::zero(), |acc, &v| acc + v * v);
    T::from_literal(0.5) * reg * squared
}

/// Final guard shared by both forms: a finite input must never produce NaN or inf.
pub(crate) fn ensure_finite<T: LossFloat>(loss: T, grad: &Array2<T>) -> Result<()> {
    if !loss.is_finite() {
        return Err(LossError::NumericDegeneracy(format!(
            "loss evaluated to {}",
            loss
        )));
    }
    if let Some(pos) = grad.iter().position(|g| !g.is_finite()) {
        return Err(LossError::NumericDegeneracy(format!(
            "gradient entry {} is not finite",
            pos
        )));
    }
    Ok(())
}
