use crate::backend::LossFloat;
use crate::error::{LossError, Result};
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Small Gaussian weights: `scale * N(0, 1)` of shape (dim, num_classes).
/// With `scale = 1e-4` every class starts out nearly equally likely, so the
/// initial loss sits close to `log(num_classes)`.
pub fn small_random_weights<T, R>(
    dim: usize,
    num_classes: usize,
    scale: f64,
    rng: &mut R,
) -> Result<Array2<T>>
where
    T: LossFloat,
    R: Rng + ?Sized,
{
    if !scale.is_finite() || scale < 0.0 {
        return Err(LossError::InvalidConfig(format!(
            "weight scale must be finite and non-negative, got {}",
            scale
        )));
    }

    Ok(Array2::from_shape_simple_fn((dim, num_classes), || {
        let z: f64 = StandardNormal.sample(rng);
        T::from_literal(scale * z)
    }))
}

/// Gaussian matrix `N(mean, std)` of the given shape.
pub fn normal_matrix<T, R>(
    shape: (usize, usize),
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Array2<T>>
where
    T: LossFloat,
    R: Rng + ?Sized,
{
    if !std.is_finite() || std < 0.0 {
        return Err(LossError::InvalidConfig(format!(
            "standard deviation must be finite and non-negative, got {}",
            std
        )));
    }
    let normal = Normal::new(mean, std)
        .map_err(|e| LossError::InvalidConfig(format!("invalid normal distribution: {}", e)))?;
    Ok(Array2::from_shape_simple_fn(shape, || {
        T::from_literal(normal.sample(rng))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_small_random_weights_shape_and_scale() {
        let mut rng = StdRng::seed_from_u64(7);
        let w: Array2<f64> = small_random_weights(20, 4, 1e-4, &mut rng).unwrap();
        assert_eq!(w.dim(), (20, 4));
        assert!(w.iter().all(|v| v.abs() < 1e-2));
        assert!(w.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_negative_scale_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = small_random_weights::<f64, _>(2, 2, -1.0, &mut rng);
        assert!(matches!(result, Err(LossError::InvalidConfig(_))));
    }

    #[test]
    fn test_normal_matrix_rejects_negative_std() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            normal_matrix::<f64, _>((2, 2), 0.0, -1.0, &mut rng),
            Err(LossError::InvalidConfig(_))
        ));
        assert!(matches!(
            normal_matrix::<f64, _>((2, 2), 0.0, f64::INFINITY, &mut rng),
            Err(LossError::InvalidConfig(_))
        ));
    }
}
