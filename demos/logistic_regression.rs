use linfit::{GradientDescent, LogisticRegression};
use ndarray::{array, Axis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Logistic Regression Classification Example ===\n");

    // Three blobs, one per class
    let x = array![
        [0.0, 0.2],
        [0.3, -0.1],
        [-0.2, 0.1],
        [4.8, 0.1],
        [5.1, 0.4],
        [5.3, -0.2],
        [0.2, 5.0],
        [-0.1, 4.7],
        [0.4, 5.2]
    ];
    let y = array![
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0]
    ];

    let mut optimizer = GradientDescent::new()
        .learning_rate(0.1)
        .max_iters(5000)
        .momentum(0.5);
    let mut model = LogisticRegression::new();
    let history = model.fit(&x, &y, &mut optimizer)?;

    println!("Fitted in {} steps", history.len() - 1);
    let a = linfit::linalg::augment(&x, true);
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("Cost: {:.4} -> {:.4}", model.cost_fn(&a, &y, first)?, model.cost_fn(&a, &y, last)?);
    }
    println!("Training accuracy: {:.2}%", model.score(&x, &y)? * 100.0);

    let new_x = array![[0.1, 0.0], [4.5, 0.5], [0.5, 4.0]];
    let proba = model.predict_proba(&new_x, None)?;
    let predictions = model.predict(&new_x, None)?;

    println!("\nPredictions on new data:");
    for (i, (p, one_hot)) in proba.axis_iter(Axis(0)).zip(predictions.axis_iter(Axis(0))).enumerate() {
        let class = one_hot.iter().position(|&v| v == 1.0).unwrap_or(0);
        println!(
            "Sample {}: class {} (probabilities: {:.3}, {:.3}, {:.3})",
            i + 1,
            class,
            p[0],
            p[1],
            p[2]
        );
    }

    Ok(())
}
