//! Shape-checked matrix operations.
//!
//! ndarray panics when the operands of `dot` or `-` disagree in shape (or
//! silently broadcasts). Every helper here validates dimensions first and
//! reports a [`LinfitError::ShapeMismatch`] instead.

use crate::{LinfitError, Matrix, Result};
use ndarray::s;

fn shape(m: &Matrix) -> (usize, usize) {
    (m.nrows(), m.ncols())
}

fn mismatch(op: &'static str, a: &Matrix, b: &Matrix) -> LinfitError {
    LinfitError::ShapeMismatch {
        op,
        left: shape(a),
        right: shape(b),
    }
}

pub fn zeros(rows: usize, cols: usize) -> Matrix {
    Matrix::zeros((rows, cols))
}

/// Matrix product `a · b`.
pub fn dot(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.ncols() != b.nrows() {
        return Err(mismatch("dot", a, b));
    }
    Ok(a.dot(b))
}

/// Transposed product `aᵗ · b`, without materializing the transpose.
pub fn t_dot(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.nrows() != b.nrows() {
        return Err(mismatch("t_dot", a, b));
    }
    Ok(a.t().dot(b))
}

/// Element-wise `a - b`. Both operands must have the same shape.
pub fn sub(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(mismatch("sub", a, b));
    }
    Ok(a - b)
}

/// Copies `x`, prepending a column of ones when `add_bias` is set.
pub fn augment(x: &Matrix, add_bias: bool) -> Matrix {
    if !add_bias {
        return x.clone();
    }

    let mut a = Matrix::ones((x.nrows(), x.ncols() + 1));
    a.slice_mut(s![.., 1..]).assign(x);
    a
}

/// Inverts a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// A pivot counts as zero when it falls below `n * f64::EPSILON` times the
/// largest absolute entry of `a`, so the cutoff follows the matrix's scale.
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    if a.nrows() != a.ncols() {
        return Err(LinfitError::ShapeMismatch {
            op: "inverse",
            left: shape(a),
            right: (a.ncols(), a.nrows()),
        });
    }

    let n = a.nrows();
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = n as f64 * f64::EPSILON * scale;

    let mut aug = Matrix::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(a);
    for i in 0..n {
        aug[(i, n + i)] = 1.0;
    }

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[(k, i)].abs() > aug[(max_row, i)].abs() {
                max_row = k;
            }
        }

        if aug[(max_row, i)].abs() <= tolerance {
            return Err(LinfitError::SingularMatrix);
        }

        if max_row != i {
            for j in 0..2 * n {
                aug.swap((i, j), (max_row, j));
            }
        }

        let pivot = aug[(i, i)];
        aug.row_mut(i).mapv_inplace(|v| v / pivot);

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = aug[(k, i)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    Ok(aug.slice(s![.., n..]).to_owned())
}

/// Frobenius norm, used by the optimizers as a convergence measure.
pub fn norm(a: &Matrix) -> f64 {
    a.iter().map(|v| v * v).sum::<f64>().sqrt()
}
