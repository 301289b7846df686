use super::FitOutput;
use crate::optim::Optimizer;
use crate::{linalg, LinfitError, Matrix, Result};
use log::debug;

/// Ordinary least squares on a bias-augmented design matrix.
#[derive(Clone, Debug)]
pub struct LinearRegression {
    pub w: Option<Matrix>,
    add_bias: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            w: None,
            add_bias: true,
        }
    }

    pub fn with_bias(add_bias: bool) -> Self {
        Self { w: None, add_bias }
    }

    pub fn add_bias(mut self, add_bias: bool) -> Self {
        self.add_bias = add_bias;
        self
    }

    pub fn weights(&self) -> Option<&Matrix> {
        self.w.as_ref()
    }

    /// Sum of squares loss, `0.5 * Σ(y - Xw)²`.
    pub fn cost_fn(&self, x: &Matrix, y: &Matrix, w: &Matrix) -> Result<f64> {
        let residual = linalg::sub(y, &linalg::dot(x, w)?)?;
        Ok(0.5 * residual.mapv(|r| r * r).sum())
    }

    /// Mean gradient of the squared error, `Xᵗ(Xw - y) / n`.
    ///
    /// This is the derivative of [`cost_fn`](Self::cost_fn) divided by the
    /// number of samples.
    pub fn gradient(&self, x: &Matrix, y: &Matrix, w: &Matrix) -> Result<Matrix> {
        let residual = linalg::sub(&linalg::dot(x, w)?, y)?;
        Ok(linalg::t_dot(x, &residual)? / x.nrows() as f64)
    }

    /// Solves the normal equations `w = (XᵗX)⁻¹Xᵗy`.
    pub fn analytic_fit(&self, x: &Matrix, y: &Matrix) -> Result<Matrix> {
        let xtx_inv = linalg::inverse(&linalg::t_dot(x, x)?)?;
        let xty = linalg::t_dot(x, y)?;
        linalg::dot(&xtx_inv, &xty)
    }

    /// Fits the weights, analytically or with `optimizer`.
    ///
    /// The analytic path ignores `optimizer` and returns the solved weights.
    /// The iterative path starts from zeros and returns the optimizer's
    /// weight history; the final weights are stored on the model either way.
    pub fn fit(
        &mut self,
        x: &Matrix,
        y: &Matrix,
        analytic_fit: bool,
        optimizer: Option<&mut dyn Optimizer>,
    ) -> Result<FitOutput> {
        let a = linalg::augment(x, self.add_bias);
        debug!(
            "fitting linear regression on {} samples, {} columns (analytic: {})",
            a.nrows(),
            a.ncols(),
            analytic_fit
        );

        if analytic_fit {
            let w = self.analytic_fit(&a, y)?;
            self.w = Some(w.clone());
            return Ok(FitOutput::Weights(w));
        }

        let optimizer = optimizer.ok_or(LinfitError::MissingOptimizer)?;
        let w0 = linalg::zeros(a.ncols(), 1);
        let trajectory = optimizer.run(
            &|a: &Matrix, y: &Matrix, w: &Matrix| self.gradient(a, y, w),
            &a,
            y,
            w0,
        )?;

        self.w = Some(trajectory.weights);
        Ok(FitOutput::History(trajectory.history))
    }

    /// Predicts `A·w`, using `w` when given and the fitted weights otherwise.
    pub fn predict(&self, x: &Matrix, w: Option<&Matrix>) -> Result<Matrix> {
        let w = w.or(self.w.as_ref()).ok_or(LinfitError::NotFitted)?;
        let a = linalg::augment(x, self.add_bias);
        linalg::dot(&a, w)
    }

    /// Coefficient of determination of the fitted model on `x`, `y`.
    pub fn score(&self, x: &Matrix, y: &Matrix) -> Result<f64> {
        let y_pred = self.predict(x, None)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}
