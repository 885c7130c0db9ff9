//! # softmax-linear
//!
//! Softmax cross-entropy loss and its analytic gradient for a linear classifier
//! with weights `W` of shape (D, C), built on `ndarray`.
//!
//! ## Features
//!
//! - A loop-based evaluator and a vectorized evaluator that agree to within
//!   floating-point tolerance
//! - Per-row max-shift before exponentiating, so large scores never overflow
//! - L2 regularization `0.5 * reg * sum(W^2)` with gradient `reg * W`
//! - Finite-difference gradient checks
//! - Generic over `f32` and `f64`
//!
//! ```
//! use ndarray::Array2;
//! use softmax_linear::{softmax_loss_naive, softmax_loss_vectorized};
//!
//! let w = Array2::<f64>::zeros((3, 3));
//! let x = Array2::<f64>::eye(3);
//! let y = [0, 1, 2];
//!
//! let (loss, grad) = softmax_loss_vectorized(&w, &x, &y, 0.0).unwrap();
//! assert!((loss - 3.0f64.ln()).abs() < 1e-12);
//! assert_eq!(grad.dim(), (3, 3));
//!
//! let (naive_loss, _) = softmax_loss_naive(&w, &x, &y, 0.0).unwrap();
//! assert!((naive_loss - loss).abs() < 1e-12);
//! ```
pub mod backend;
pub mod config;
pub mod dataset;
pub mod error;
pub mod gradient_check;
pub mod initializers;
pub mod losses;

// Re-export commonly used types for convenience
pub use backend::LossFloat;
pub use error::{LossError, Result};
pub use losses::{LossEvaluator, Naive, Vectorized, softmax_loss_naive, softmax_loss_vectorized};
