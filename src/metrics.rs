use crate::numeric::argmax_rows;
use crate::{LinfitError, Matrix, Result};

fn check_same_shape(y_true: &Matrix, y_pred: &Matrix) -> Result<()> {
    if y_true.shape() != y_pred.shape() {
        return Err(LinfitError::ShapeMismatch {
            op: "metrics",
            left: (y_true.nrows(), y_true.ncols()),
            right: (y_pred.nrows(), y_pred.ncols()),
        });
    }
    if y_true.is_empty() {
        return Err(LinfitError::EmptyInput("y_true"));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    check_same_shape(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / diff.len() as f64)
}

pub fn r2_score(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    check_same_shape(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(1.0);
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Share of rows whose predicted class (row argmax) matches the target's.
pub fn accuracy_score(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    check_same_shape(y_true, y_pred)?;

    let hits = argmax_rows(y_true)
        .into_iter()
        .zip(argmax_rows(y_pred))
        .filter(|(t, p)| t == p)
        .count();
    Ok(hits as f64 / y_true.nrows() as f64)
}
