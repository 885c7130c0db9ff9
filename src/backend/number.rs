// src/backend/number.rs

use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::{Float, NumAssignOps};
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Element type accepted by the loss evaluators.
/// Combines the floating-point functions the softmax needs (`exp`, `ln`, `max`),
/// in-place arithmetic, and the scalar bounds `ndarray` requires for matrix
/// products and broadcasting. Implemented for `f32` and `f64`.
pub trait LossFloat:
    Float
    + NumAssignOps
    + LinalgScalar
    + ScalarOperand
    + Sum
    + Debug
    + Display
    + Default
    + Send
    + Sync
{
    /// Converts an `f64` constant into this type, rounding if needed.
    fn from_literal(value: f64) -> Self;

    /// Converts an element count (N, C) into this type.
    fn from_count(count: usize) -> Self;

    /// Widens to `f64` for logging and error reporting.
    fn as_f64(self) -> f64;
}

impl LossFloat for f32 {
    fn from_literal(value: f64) -> Self {
        value as f32
    }

    fn from_count(count: usize) -> Self {
        count as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl LossFloat for f64 {
    fn from_literal(value: f64) -> Self {
        value
    }

    fn from_count(count: usize) -> Self {
        count as f64
    }

    fn as_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::LossFloat;

    #[test]
    fn test_conversions_round_trip_small_values() {
        assert_eq!(<f64 as LossFloat>::from_literal(0.5), 0.5);
        assert_eq!(<f32 as LossFloat>::from_literal(0.5), 0.5f32);
        assert_eq!(<f64 as LossFloat>::from_count(7), 7.0);
        assert_eq!(<f32 as LossFloat>::from_count(3).as_f64(), 3.0);
    }
}
