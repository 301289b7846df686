//! Linear and softmax regression with pluggable optimizers.
//!
//! Both estimators work on dense `f64` matrices. Targets are matrices too:
//! an `(n, 1)` column for regression and one-hot rows for classification.

pub use ndarray::{Array2, ArrayView2};

pub mod error;
pub mod linalg;
pub mod linear_model;
pub mod metrics;
pub mod numeric;
pub mod optim;

pub use error::{LinfitError, Result};
pub use linear_model::{FitOutput, LinearRegression, LogisticRegression};
pub use numeric::{one_hot, softmax};
pub use optim::{GradientDescent, GradientFn, Optimizer, StochasticGradientDescent, Trajectory};

pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let mat = Matrix::zeros((3, 4));
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
