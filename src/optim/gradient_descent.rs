use super::{GradientFn, Optimizer, Trajectory};
use crate::{linalg, LinfitError, Matrix, Result};
use log::{debug, trace, warn};

/// Full-batch gradient descent with a fixed step and optional momentum.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    learning_rate: f64,
    max_iters: usize,
    epsilon: f64,
    momentum: f64,
    record_history: bool,
}

impl GradientDescent {
    pub fn new() -> Self {
        Self {
            learning_rate: 1e-3,
            max_iters: 10_000,
            epsilon: 1e-8,
            momentum: 0.0,
            record_history: true,
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        if !(learning_rate > 0.0) {
            panic!("learning_rate must be positive, got {}", learning_rate);
        }
        self.learning_rate = learning_rate;
        self
    }

    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Stops once the gradient norm is at or below `epsilon`.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        if epsilon < 0.0 {
            panic!("epsilon must be non-negative, got {}", epsilon);
        }
        self.epsilon = epsilon;
        self
    }

    pub fn momentum(mut self, momentum: f64) -> Self {
        if !(0.0..1.0).contains(&momentum) {
            panic!("momentum must be in [0, 1), got {}", momentum);
        }
        self.momentum = momentum;
        self
    }

    pub fn record_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for GradientDescent {
    fn run(
        &mut self,
        gradient: GradientFn<'_>,
        a: &Matrix,
        y: &Matrix,
        w0: Matrix,
    ) -> Result<Trajectory> {
        let mut w = w0;
        let mut velocity = Matrix::zeros(w.raw_dim());
        let mut history = Vec::new();
        if self.record_history {
            history.push(w.clone());
        }

        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.max_iters {
            let grad = gradient(a, y, &w)?;
            let grad_norm = linalg::norm(&grad);
            if grad_norm <= self.epsilon {
                converged = true;
                break;
            }

            velocity = velocity * self.momentum + &grad;
            w.scaled_add(-self.learning_rate, &velocity);
            iterations += 1;

            if w.iter().any(|v| !v.is_finite()) {
                return Err(LinfitError::Diverged { iterations });
            }

            trace!("gd step {}: gradient norm {:.3e}", iterations, grad_norm);
            if self.record_history {
                history.push(w.clone());
            }
        }

        if converged {
            debug!("gradient descent converged after {} iterations", iterations);
        } else {
            warn!(
                "gradient descent stopped at max_iters={} before reaching epsilon={:e}",
                self.max_iters, self.epsilon
            );
        }

        Ok(Trajectory {
            weights: w,
            history,
        })
    }
}
