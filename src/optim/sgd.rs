use super::{GradientFn, Optimizer, Trajectory};
use crate::{linalg, LinfitError, Matrix, Result};
use log::{debug, trace, warn};
use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Stochastic gradient descent.
///
/// Every epoch visits each row of the design matrix once, in shuffled order,
/// and steps on the gradient of that single row. Convergence is checked
/// against the full-batch gradient at the end of each epoch.
#[derive(Clone, Debug)]
pub struct StochasticGradientDescent {
    learning_rate: f64,
    max_epochs: usize,
    epsilon: f64,
    random_state: Option<u64>,
    record_history: bool,
}

impl StochasticGradientDescent {
    pub fn new() -> Self {
        Self {
            learning_rate: 1e-3,
            max_epochs: 1000,
            epsilon: 1e-8,
            random_state: None,
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

    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        if epsilon < 0.0 {
            panic!("epsilon must be non-negative, got {}", epsilon);
        }
        self.epsilon = epsilon;
        self
    }

    /// Seeds the shuffling so runs are reproducible.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn record_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }
}

impl Default for StochasticGradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for StochasticGradientDescent {
    fn run(
        &mut self,
        gradient: GradientFn<'_>,
        a: &Matrix,
        y: &Matrix,
        w0: Matrix,
    ) -> Result<Trajectory> {
        if a.nrows() != y.nrows() {
            return Err(LinfitError::ShapeMismatch {
                op: "sgd",
                left: (a.nrows(), a.ncols()),
                right: (y.nrows(), y.ncols()),
            });
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut w = w0;
        let mut history = Vec::new();
        if self.record_history {
            history.push(w.clone());
        }

        let mut order: Vec<usize> = (0..a.nrows()).collect();
        let mut converged = false;
        let mut epoch = 0;

        while epoch < self.max_epochs {
            let grad_norm = linalg::norm(&gradient(a, y, &w)?);
            if grad_norm <= self.epsilon {
                converged = true;
                break;
            }

            order.shuffle(&mut rng);
            for &i in &order {
                let a_i = a.select(Axis(0), &[i]);
                let y_i = y.select(Axis(0), &[i]);
                let grad = gradient(&a_i, &y_i, &w)?;
                w.scaled_add(-self.learning_rate, &grad);
            }
            epoch += 1;

            if w.iter().any(|v| !v.is_finite()) {
                return Err(LinfitError::Diverged { iterations: epoch });
            }

            trace!("sgd epoch {}: gradient norm {:.3e}", epoch, grad_norm);
            if self.record_history {
                history.push(w.clone());
            }
        }

        if converged {
            debug!("sgd converged after {} epochs", epoch);
        } else {
            warn!(
                "sgd stopped at max_epochs={} before reaching epsilon={:e}",
                self.max_epochs, self.epsilon
            );
        }

        Ok(Trajectory {
            weights: w,
            history,
        })
    }
}
