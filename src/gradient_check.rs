// src/gradient_check.rs
// Finite-difference checks for analytic gradients of a scalar function of W.

use crate::backend::LossFloat;
use crate::error::{LossError, Result};
use ndarray::Array2;
use rand::Rng;

/// Result of comparing one gradient entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheck<T> {
    pub index: (usize, usize),
    pub numerical: T,
    pub analytic: T,
    pub rel_error: T,
}

/// `|a - b| / max(1e-8, |a| + |b|)`
pub fn rel_error<T: LossFloat>(a: T, b: T) -> T {
    let denom = T::from_literal(1e-8).max(a.abs() + b.abs());
    (a - b).abs() / denom
}

/// Largest elementwise relative error between two matrices of the same shape.
pub fn max_rel_error<T: LossFloat>(a: &Array2<T>, b: &Array2<T>) -> Result<T> {
    check_same_shape(a, b)?;
    Ok(a
        .iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc.max(rel_error(x, y))))
}

/// Centered difference `(f(W + h) - f(W - h)) / 2h` for every entry of `w`.
/// `f` sees a perturbed copy; `w` itself is never modified.
pub fn numerical_gradient<T, F>(mut f: F, w: &Array2<T>, h: T) -> Result<Array2<T>>
where
    T: LossFloat,
    F: FnMut(&Array2<T>) -> Result<T>,
{
    let mut probe = w.clone();
    let mut grad = Array2::<T>::zeros(w.raw_dim());

    for ((r, c), g) in grad.indexed_iter_mut() {
        *g = centered_difference(&mut f, &mut probe, (r, c), h)?;
    }
    Ok(grad)
}

/// Compares `analytic` against centered differences at `num_checks` randomly
/// sampled entries of `w`.
pub fn grad_check_sparse<T, F, R>(
    mut f: F,
    w: &Array2<T>,
    analytic: &Array2<T>,
    num_checks: usize,
    h: T,
    rng: &mut R,
) -> Result<Vec<GradCheck<T>>>
where
    T: LossFloat,
    F: FnMut(&Array2<T>) -> Result<T>,
    R: Rng + ?Sized,
{
    check_same_shape(w, analytic)?;
    if w.is_empty() {
        return Err(LossError::EmptyInput("weight matrix has no entries"));
    }

    let (rows, cols) = w.dim();
    let mut probe = w.clone();
    let mut checks = Vec::with_capacity(num_checks);

    for _ in 0..num_checks {
        let index = (rng.random_range(0..rows), rng.random_range(0..cols));
        let numerical = centered_difference(&mut f, &mut probe, index, h)?;
        let check = GradCheck {
            index,
            numerical,
            analytic: analytic[[index.0, index.1]],
            rel_error: rel_error(numerical, analytic[[index.0, index.1]]),
        };
        tracing::debug!(
            row = index.0,
            col = index.1,
            numerical = numerical.as_f64(),
            analytic = check.analytic.as_f64(),
            rel_error = check.rel_error.as_f64(),
            "gradient check"
        );
        checks.push(check);
    }
    Ok(checks)
}

// Perturbs one entry of `probe` in both directions and restores it.
fn centered_difference<T, F>(
    f: &mut F,
    probe: &mut Array2<T>,
    (r, c): (usize, usize),
    h: T,
) -> Result<T>
where
    T: LossFloat,
    F: FnMut(&Array2<T>) -> Result<T>,
{
    let original = probe[[r, c]];

    probe[[r, c]] = original + h;
    let plus = f(probe);
    probe[[r, c]] = original - h;
    let minus = f(probe);
    probe[[r, c]] = original;

    Ok((plus? - minus?) / (h + h))
}

fn check_same_shape<T>(a: &Array2<T>, b: &Array2<T>) -> Result<()> {
    if a.nrows() != b.nrows() {
        return Err(LossError::ShapeMismatch {
            context: "compared matrices must have the same number of rows",
            expected: a.nrows(),
            got: b.nrows(),
        });
    }
    if a.ncols() != b.ncols() {
        return Err(LossError::ShapeMismatch {
            context: "compared matrices must have the same number of columns",
            expected: a.ncols(),
            got: b.ncols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sum_of_squares(w: &Array2<f64>) -> Result<f64> {
        Ok(w.iter().map(|v| v * v).sum())
    }

    #[test]
    fn test_rel_error() {
        assert_eq!(rel_error(1.0, 1.0), 0.0);
        assert_relative_eq!(rel_error(1.0, 3.0), 0.5);
        // Both near zero: denominator is floored.
        assert_relative_eq!(rel_error(0.0, 1e-10), 1e-2, epsilon = 1e-15);
    }

    #[test]
    fn test_numerical_gradient_of_sum_of_squares() {
        let w = array![[1.0, -2.0], [0.5, 3.0]];
        let grad = numerical_gradient(sum_of_squares, &w, 1e-5).unwrap();
        let expected = w.mapv(|v| 2.0 * v);
        assert!(max_rel_error(&grad, &expected).unwrap() < 1e-8);
    }

    #[test]
    fn test_probe_is_restored() {
        let w = array![[1.0, 2.0, 3.0]];
        let mut seen = Vec::new();
        numerical_gradient(
            |probe: &Array2<f64>| {
                seen.push(probe.sum());
                Ok(probe.sum())
            },
            &w,
            0.5,
        )
        .unwrap();
        // Every evaluation differs from the original sum by exactly +-h.
        assert!(seen.iter().all(|s| (s - 6.0).abs() == 0.5));
    }

    #[test]
    fn test_grad_check_sparse_reports_every_sample() {
        let w = array![[0.3, -0.7, 1.1], [2.0, 0.0, -1.5]];
        let analytic = w.mapv(|v| 2.0 * v);
        let mut rng = StdRng::seed_from_u64(42);

        let checks = grad_check_sparse(sum_of_squares, &w, &analytic, 8, 1e-5, &mut rng).unwrap();
        assert_eq!(checks.len(), 8);
        for check in checks {
            assert!(check.index.0 < 2 && check.index.1 < 3);
            assert!(check.rel_error < 1e-7);
        }
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let a = Array2::<f64>::zeros((2, 3));
        let b = Array2::<f64>::zeros((3, 2));
        assert!(matches!(
            max_rel_error(&a, &b),
            Err(LossError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_errors_from_f_propagate() {
        let w = array![[1.0]];
        let result = numerical_gradient(
            |_: &Array2<f64>| Err(LossError::EmptyInput("nothing")),
            &w,
            1e-5,
        );
        assert_eq!(result, Err(LossError::EmptyInput("nothing")));
    }
}
