use crate::numeric::{one_hot, softmax};
use crate::optim::Optimizer;
use crate::{linalg, LinfitError, Matrix, Result};
use log::debug;

/// Multi-class logistic regression with a softmax link and cross-entropy
/// loss. Targets are one-hot matrices of shape `(n_samples, n_classes)`.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    pub w: Option<Matrix>,
    add_bias: bool,
}

impl LogisticRegression {
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

    /// Negative log-likelihood of one-hot targets `y` under `softmax(Xw)`.
    ///
    /// Uses log-sum-exp with the row maximum factored out, so large scores
    /// do not overflow.
    pub fn cost_fn(&self, x: &Matrix, y: &Matrix, w: &Matrix) -> Result<f64> {
        let z = linalg::dot(x, w)?;
        if y.shape() != z.shape() {
            return Err(LinfitError::ShapeMismatch {
                op: "cost_fn",
                left: (y.nrows(), y.ncols()),
                right: (z.nrows(), z.ncols()),
            });
        }

        let cost: f64 = y
            .outer_iter()
            .zip(z.outer_iter())
            .map(|(y_row, z_row)| {
                let z_max = z_row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
                let log_sum_exp = z_row.mapv(|v| (v - z_max).exp()).sum().ln();
                -y_row.dot(&z_row) + z_max + log_sum_exp
            })
            .sum();
        Ok(cost)
    }

    /// Mean cross-entropy gradient, `Xᵗ(softmax(Xw) - y) / n`.
    pub fn gradient(&self, x: &Matrix, y: &Matrix, w: &Matrix) -> Result<Matrix> {
        let y_hat = softmax(&linalg::dot(x, w)?);
        let residual = linalg::sub(&y_hat, y)?;
        Ok(linalg::t_dot(x, &residual)? / y.nrows() as f64)
    }

    /// Fits the weights with `optimizer`, starting from zeros, and returns
    /// the optimizer's weight history.
    pub fn fit(
        &mut self,
        x: &Matrix,
        y: &Matrix,
        optimizer: &mut dyn Optimizer,
    ) -> Result<Vec<Matrix>> {
        let a = linalg::augment(x, self.add_bias);
        debug!(
            "fitting logistic regression on {} samples, {} columns, {} classes",
            a.nrows(),
            a.ncols(),
            y.ncols()
        );

        let w0 = linalg::zeros(a.ncols(), y.ncols());
        let trajectory = optimizer.run(
            &|a: &Matrix, y: &Matrix, w: &Matrix| self.gradient(a, y, w),
            &a,
            y,
            w0,
        )?;

        self.w = Some(trajectory.weights);
        Ok(trajectory.history)
    }

    /// Class probabilities, `softmax(A·w)`.
    pub fn predict_proba(&self, x: &Matrix, w: Option<&Matrix>) -> Result<Matrix> {
        let w = w.or(self.w.as_ref()).ok_or(LinfitError::NotFitted)?;
        let a = linalg::augment(x, self.add_bias);
        Ok(softmax(&linalg::dot(&a, w)?))
    }

    /// One-hot predictions at the most probable class of each row.
    pub fn predict(&self, x: &Matrix, w: Option<&Matrix>) -> Result<Matrix> {
        Ok(one_hot(&self.predict_proba(x, w)?))
    }

    /// Fraction of rows of `x` classified as in the one-hot targets `y`.
    pub fn score(&self, x: &Matrix, y: &Matrix) -> Result<f64> {
        let y_pred = self.predict(x, None)?;
        crate::metrics::accuracy_score(y, &y_pred)
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::testing::FixedTrajectory;
    use crate::optim::{GradientDescent, StochasticGradientDescent};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Axis};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn separable() -> (Matrix, Matrix) {
        let x = array![[-2.0, -1.0], [-1.5, -2.0], [-1.0, -0.5], [1.0, 0.5], [1.5, 2.0], [2.0, 1.0]];
        let y = array![
            [1.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
            [0.0, 1.0],
            [0.0, 1.0]
        ];
        (x, y)
    }

    #[test]
    fn test_logistic_regression_separable() {
        let (x, y) = separable();

        let mut optimizer = GradientDescent::new().learning_rate(0.5).max_iters(1000);
        let mut model = LogisticRegression::new();
        let history = model.fit(&x, &y, &mut optimizer).unwrap();

        assert_eq!(history[0], Matrix::zeros((3, 2)));
        assert_eq!(model.weights().unwrap().shape(), &[3, 2]);
        assert_eq!(model.predict(&x, None).unwrap(), y);
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_logistic_regression_three_classes() {
        let x = array![[0.0, 0.0], [0.2, 0.1], [5.0, 0.0], [5.2, 0.3], [0.0, 5.0], [0.1, 5.3]];
        let y = array![
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0]
        ];

        let mut optimizer = GradientDescent::new().learning_rate(0.1).max_iters(3000);
        let mut model = LogisticRegression::new();
        model.fit(&x, &y, &mut optimizer).unwrap();

        assert_eq!(model.predict(&x, None).unwrap(), y);
    }

    #[test]
    fn test_logistic_regression_sgd() {
        let (x, y) = separable();

        let mut optimizer = StochasticGradientDescent::new()
            .learning_rate(0.1)
            .max_epochs(500)
            .random_state(3);
        let mut model = LogisticRegression::new();
        model.fit(&x, &y, &mut optimizer).unwrap();

        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_predict_proba_rows_are_distributions() {
        let (x, y) = separable();

        let mut optimizer = GradientDescent::new().learning_rate(0.5).max_iters(200);
        let mut model = LogisticRegression::new();
        model.fit(&x, &y, &mut optimizer).unwrap();

        let proba = model.predict_proba(&x, None).unwrap();
        for row in proba.axis_iter(Axis(0)) {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-6);
        }
        assert!(proba[(0, 0)] > 0.5);
        assert!(proba[(5, 1)] > 0.5);
    }

    #[test]
    fn test_cost_at_zero_weights() {
        let (x, y) = separable();
        let a = linalg::augment(&x, true);
        let model = LogisticRegression::new();

        // uniform predictions cost ln(n_classes) per sample
        let cost = model.cost_fn(&a, &y, &Matrix::zeros((3, 2))).unwrap();
        assert_abs_diff_eq!(cost, 6.0 * 2.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_cost_handles_large_scores() {
        let model = LogisticRegression::with_bias(false);
        let x = array![[1.0]];
        let y = array![[0.0, 1.0]];
        let w = array![[800.0, 1000.0]];

        let cost = model.cost_fn(&x, &y, &w).unwrap();
        assert!(cost.is_finite());
        assert_abs_diff_eq!(cost, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let mut rng = StdRng::seed_from_u64(17);
        let dist = Uniform::new(-1.0, 1.0);
        let x = Matrix::random_using((10, 3), &dist, &mut rng);
        let w = Matrix::random_using((3, 4), &dist, &mut rng);
        let scores = Matrix::random_using((10, 4), &dist, &mut rng);
        let y = one_hot(&scores);

        let model = LogisticRegression::new();
        let grad = model.gradient(&x, &y, &w).unwrap();

        // cost_fn is a sum while gradient is a mean; the softmax epsilon
        // perturbs the gradient by about 1e-8
        let n = x.nrows() as f64;
        let h = 1e-5;
        for i in 0..w.nrows() {
            for j in 0..w.ncols() {
                let mut w_plus = w.clone();
                let mut w_minus = w.clone();
                w_plus[(i, j)] += h;
                w_minus[(i, j)] -= h;
                let numeric = (model.cost_fn(&x, &y, &w_plus).unwrap()
                    - model.cost_fn(&x, &y, &w_minus).unwrap())
                    / (2.0 * h);
                assert_abs_diff_eq!(grad[(i, j)], numeric / n, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_fit_keeps_optimizer_weights_and_returns_history() {
        let (x, y) = separable();

        let mut optimizer = FixedTrajectory;
        let mut model = LogisticRegression::new();
        let history = model.fit(&x, &y, &mut optimizer).unwrap();

        assert_eq!(history, vec![Matrix::zeros((3, 2)), Matrix::from_elem((3, 2), 3.0)]);
        assert_eq!(model.weights(), Some(&Matrix::from_elem((3, 2), 7.0)));
    }

    #[test]
    fn test_predict_without_fit() {
        let x = array![[1.0], [2.0]];
        let model = LogisticRegression::new();

        assert_eq!(model.predict(&x, None), Err(LinfitError::NotFitted));
        assert_eq!(model.predict_proba(&x, None), Err(LinfitError::NotFitted));
    }

    #[test]
    fn test_predict_with_override_on_unfitted_model() {
        // Supplying weights is enough; the model need not be fitted first.
        let x = array![[-1.0], [1.0]];
        let model = LogisticRegression::new();
        let w = array![[0.0, 0.0], [-1.0, 1.0]];

        let predictions = model.predict(&x, Some(&w)).unwrap();
        assert_eq!(predictions, array![[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_fit_with_mismatched_targets() {
        let (x, _) = separable();
        let y = array![[1.0, 0.0], [0.0, 1.0]];

        let mut optimizer = GradientDescent::new();
        let mut model = LogisticRegression::new();
        assert!(matches!(
            model.fit(&x, &y, &mut optimizer),
            Err(LinfitError::ShapeMismatch { .. })
        ));
        assert!(model.weights().is_none());
    }
}
