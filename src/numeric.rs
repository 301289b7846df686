//! Row-wise helpers shared by the classification paths.

use crate::Matrix;
use ndarray::Axis;

/// Added to the softmax denominator so a row whose exponentials all
/// underflow does not divide by zero.
const SOFTMAX_EPS: f64 = 1e-8;

/// Row-wise softmax.
///
/// Each row has its maximum subtracted before exponentiation, which keeps
/// `exp` finite for arbitrarily large scores. Rows sum to slightly less than
/// one because of the epsilon in the denominator.
pub fn softmax(x: &Matrix) -> Matrix {
    let mut out = x.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let denom = row.sum() + SOFTMAX_EPS;
        row.mapv_inplace(|v| v / denom);
    }
    out
}

/// Index of the largest entry of each row. Ties resolve to the lowest index;
/// a NaN counts as the maximum, so the first NaN of a row wins.
pub fn argmax_rows(x: &Matrix) -> Vec<usize> {
    x.axis_iter(Axis(0))
        .map(|row| {
            let mut best = 0;
            for (j, &v) in row.iter().enumerate() {
                if v.is_nan() {
                    best = j;
                    break;
                }
                if v > row[best] {
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// One-hot encodes each row at its argmax.
pub fn one_hot(y: &Matrix) -> Matrix {
    let mut encoded = Matrix::zeros(y.raw_dim());
    if y.ncols() == 0 {
        return encoded;
    }
    for (i, label) in argmax_rows(y).into_iter().enumerate() {
        encoded[(i, label)] = 1.0;
    }
    encoded
}
