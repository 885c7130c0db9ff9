use crate::error::{LossError, Result};

/// Shape and hyperparameters of a randomly generated softmax problem.
/// Only the demo binary and the tests build problems this way; the loss
/// functions themselves take every input as an argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemConfig {
    pub num_train: usize,
    pub dim: usize,
    pub num_classes: usize,
    /// Standard deviation of the initial weights.
    pub weight_scale: f64,
    pub reg: f64,
    pub seed: u64,
    /// Number of sampled entries per sparse gradient check.
    pub grad_checks: usize,
}

impl ProblemConfig {
    pub fn new(num_train: usize, dim: usize, num_classes: usize) -> Self {
        Self {
            num_train,
            dim,
            num_classes,
            ..Self::tiny()
        }
    }

    /// Small problem for quick checks.
    pub fn tiny() -> Self {
        Self {
            num_train: 5,
            dim: 4,
            num_classes: 3,
            weight_scale: 1e-2,
            reg: 0.1,
            seed: 0,
            grad_checks: 10,
        }
    }

    /// CIFAR-10 development-set shape: 500 images of 32x32x3 pixels plus a
    /// bias column, 10 classes.
    pub fn dev() -> Self {
        Self {
            num_train: 500,
            dim: 3073,
            num_classes: 10,
            weight_scale: 1e-4,
            reg: 5e-6,
            seed: 0,
            grad_checks: 10,
        }
    }

    pub fn with_reg(mut self, reg: f64) -> Self {
        self.reg = reg;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_train == 0 || self.dim == 0 || self.num_classes == 0 {
            return Err(LossError::InvalidConfig(format!(
                "sizes must be positive, got N={} D={} C={}",
                self.num_train, self.dim, self.num_classes
            )));
        }
        if !self.weight_scale.is_finite() || self.weight_scale < 0.0 {
            return Err(LossError::InvalidConfig(format!(
                "weight scale must be finite and non-negative, got {}",
                self.weight_scale
            )));
        }
        if !self.reg.is_finite() || self.reg < 0.0 {
            return Err(LossError::InvalidConfig(format!(
                "regularization must be finite and non-negative, got {}",
                self.reg
            )));
        }
        Ok(())
    }
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self::tiny()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ProblemConfig::tiny().validate().is_ok());
        assert!(ProblemConfig::dev().validate().is_ok());
        assert_eq!(ProblemConfig::new(8, 2, 5).num_classes, 5);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(ProblemConfig::new(0, 2, 2).validate().is_err());
        assert!(ProblemConfig::tiny().with_reg(-1.0).validate().is_err());

        let mut config = ProblemConfig::tiny();
        config.weight_scale = f64::NAN;
        assert!(matches!(config.validate(), Err(LossError::InvalidConfig(_))));
    }
}
