// src/error.rs

/// Errors raised by the loss evaluators and their helpers.
/// Every variant names the invariant that the call violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LossError {
    /// W, X and y disagree on D or N.
    #[error("shape mismatch: {context} (expected {expected}, got {got})")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("label {label} at index {index} is outside [0, {num_classes})")]
    InvalidLabel {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("regularization strength must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),

    /// Inputs so extreme that the max-shift cannot keep the result finite.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LossError>;
