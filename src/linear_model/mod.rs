//! Linear models for regression and classification.
//!
//! This module provides:
//! - `LinearRegression`: least squares, solved analytically or by an optimizer
//! - `LogisticRegression`: multi-class softmax regression fitted by an optimizer
//!
//! Both prepend a bias column to X by default, so the first row of the
//! weight matrix holds the intercepts.
//!
//! # Examples
//!
//! ## Linear Regression
//! ```rust
//! use linfit::{FitOutput, LinearRegression};
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0]];
//! let y = array![[2.0], [4.0], [6.0]];
//!
//! let mut model = LinearRegression::new();
//! let output = model.fit(&x, &y, true, None).unwrap();
//! assert!(matches!(output, FitOutput::Weights(_)));
//!
//! let predictions = model.predict(&array![[4.0]], None).unwrap();
//! assert!((predictions[(0, 0)] - 8.0).abs() < 1e-8);
//! ```
//!
//! ## Logistic Regression
//! ```rust
//! use linfit::{GradientDescent, LogisticRegression};
//! use ndarray::array;
//!
//! let x = array![[-2.0], [-1.0], [1.0], [2.0]];
//! let y = array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]];
//!
//! let mut optimizer = GradientDescent::new().learning_rate(0.5).max_iters(500);
//! let mut model = LogisticRegression::new();
//! let history = model.fit(&x, &y, &mut optimizer).unwrap();
//!
//! assert!(!history.is_empty());
//! assert_eq!(model.predict(&x, None).unwrap(), y);
//! ```

mod linear_regression;
mod logistic_regression;

pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;

use crate::Matrix;

/// What `LinearRegression::fit` hands back.
#[derive(Clone, Debug)]
pub enum FitOutput {
    /// The normal-equations solution, also stored on the model.
    Weights(Matrix),
    /// The optimizer's weight history. The final weights live on the model.
    History(Vec<Matrix>),
}
