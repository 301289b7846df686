use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, LinfitError>;

/// Errors raised while fitting or evaluating a model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinfitError {
    /// `predict` or `score` was called with no weights available.
    #[error("model not fitted, call fit() first")]
    NotFitted,

    /// An iterative fit was requested without an optimizer.
    #[error("an optimizer is required unless fitting analytically")]
    MissingOptimizer,

    /// Two operands of a matrix operation have incompatible dimensions.
    #[error("shape mismatch in {op}: left is {left:?}, right is {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix is singular or nearly singular")]
    SingularMatrix,

    /// The optimizer produced non-finite weights.
    #[error("optimizer diverged after {iterations} iterations")]
    Diverged { iterations: usize },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}
