use linfit::{FitOutput, GradientDescent, LinearRegression, StochasticGradientDescent};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Linear Regression Example ===\n");

    // y = 2x + 3 with small noise
    let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
    let y = array![[5.1], [6.9], [9.2], [11.1], [12.8]];

    println!("Training data:");
    println!("X: {:?}", x.column(0));
    println!("y: {:?}", y.column(0));

    // Closed form
    let mut analytic = LinearRegression::new();
    analytic.fit(&x, &y, true, None)?;
    let w = analytic.weights().ok_or("model not fitted")?;
    println!("\nNormal equations:");
    println!("Intercept: {:.4}", w[(0, 0)]);
    println!("Slope: {:.4}", w[(1, 0)]);
    println!("R² score: {:.4}", analytic.score(&x, &y)?);

    // Batch gradient descent
    let mut optimizer = GradientDescent::new()
        .learning_rate(0.05)
        .max_iters(20_000)
        .epsilon(1e-6);
    let mut iterative = LinearRegression::new();
    if let FitOutput::History(history) = iterative.fit(&x, &y, false, Some(&mut optimizer))? {
        println!("\nGradient descent took {} steps", history.len() - 1);
        for (step, w) in history.iter().enumerate().step_by(500).take(6) {
            let cost = iterative.cost_fn(&linfit::linalg::augment(&x, true), &y, w)?;
            println!("  step {:>5}: cost {:.5}", step, cost);
        }
    }
    let w = iterative.weights().ok_or("model not fitted")?;
    println!("Intercept: {:.4}", w[(0, 0)]);
    println!("Slope: {:.4}", w[(1, 0)]);

    // Stochastic gradient descent
    let mut optimizer = StochasticGradientDescent::new()
        .learning_rate(0.01)
        .max_epochs(2000)
        .random_state(42);
    let mut stochastic = LinearRegression::new();
    stochastic.fit(&x, &y, false, Some(&mut optimizer))?;
    let w = stochastic.weights().ok_or("model not fitted")?;
    println!("\nSGD:");
    println!("Intercept: {:.4}", w[(0, 0)]);
    println!("Slope: {:.4}", w[(1, 0)]);

    let new_x = array![[6.0], [7.0]];
    let predictions = analytic.predict(&new_x, None)?;
    let mse = linfit::metrics::mean_squared_error(&y, &analytic.predict(&x, None)?)?;
    println!("\nTraining MSE: {:.4}", mse);
    println!("Predictions on new data:");
    for (xi, pred) in new_x.column(0).iter().zip(predictions.column(0)) {
        println!("X={:.1}: Predicted y={:.2}", xi, pred);
    }

    Ok(())
}
