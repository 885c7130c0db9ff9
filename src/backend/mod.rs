pub mod number;

pub use number::LossFloat;
