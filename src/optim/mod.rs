//! Iterative optimizers for the linear models.
//!
//! The models never depend on a concrete optimizer. They hand their own
//! gradient to anything implementing [`Optimizer`] and keep the final weights
//! of the returned [`Trajectory`].
//!
//! - `GradientDescent`: full-batch steps with optional momentum
//! - `StochasticGradientDescent`: single-sample steps over shuffled epochs
//!
//! # Examples
//!
//! ```rust
//! use linfit::{GradientDescent, LinearRegression, FitOutput};
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![[3.0], [5.0], [7.0], [9.0]];
//!
//! let mut optimizer = GradientDescent::new().learning_rate(0.05).max_iters(5000);
//! let mut model = LinearRegression::new();
//! let output = model.fit(&x, &y, false, Some(&mut optimizer)).unwrap();
//!
//! if let FitOutput::History(history) = output {
//!     println!("took {} snapshots", history.len());
//! }
//! let w = model.weights().unwrap();
//! assert!((w[(1, 0)] - 2.0).abs() < 1e-3);
//! ```

mod gradient_descent;
mod sgd;

pub use gradient_descent::GradientDescent;
pub use sgd::StochasticGradientDescent;

use crate::{Matrix, Result};

/// Gradient of an objective: `(A, y, w) -> ∂cost/∂w`, shaped like `w`.
pub type GradientFn<'a> = &'a dyn Fn(&Matrix, &Matrix, &Matrix) -> Result<Matrix>;

/// Outcome of an optimizer run.
#[derive(Clone, Debug)]
pub struct Trajectory {
    /// Weights after the last step.
    pub weights: Matrix,
    /// Ordered weight snapshots, empty when history recording is disabled.
    pub history: Vec<Matrix>,
}

/// An iterative weight search.
pub trait Optimizer {
    /// Runs the search from `w0` on design matrix `a` and targets `y`.
    ///
    /// The optimizer owns its stopping rule; `gradient` is evaluated as often
    /// as it needs.
    fn run(
        &mut self,
        gradient: GradientFn<'_>,
        a: &Matrix,
        y: &Matrix,
        w0: Matrix,
    ) -> Result<Trajectory>;
}
