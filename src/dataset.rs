// src/dataset.rs
// Synthetic minibatches standing in for the data loader of a training harness.

use crate::backend::LossFloat;
use crate::config::ProblemConfig;
use crate::error::Result;
use crate::initializers::normal_matrix;
use ndarray::Array2;
use rand::Rng;

/// A minibatch of N examples: data `x` of shape (N, D) and labels `y` in [0, C).
#[derive(Debug, Clone, PartialEq)]
pub struct Minibatch<T>
where
    T: LossFloat,
{
    pub x: Array2<T>,
    pub y: Vec<usize>,
    pub num_classes: usize,
}

impl<T> Minibatch<T>
where
    T: LossFloat,
{
    /// Gaussian features with uniformly drawn labels, shaped after `config`.
    pub fn random<R: Rng + ?Sized>(config: &ProblemConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let x = normal_matrix((config.num_train, config.dim), 0.0, 1.0, rng)?;
        let y = (0..config.num_train)
            .map(|_| rng.random_range(0..config.num_classes))
            .collect();

        Ok(Self {
            x,
            y,
            num_classes: config.num_classes,
        })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.x.ncols()
    }
}
