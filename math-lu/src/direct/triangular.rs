//! Triangular solves on LU factors
//!
//! Forward substitution for the unit lower factor, back substitution for the
//! upper factor. Both are strictly sequential in their index order.

use super::lu::LuError;
use ndarray::{Array1, Array2};

/// Solve `L y = b` for unit lower triangular `L`
///
/// The diagonal of `L` is assumed to be 1 and is never read.
pub fn forward_substitution(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = b.len();
    let mut y = Array1::zeros(n);

    for i in 0..n {
        let mut sum = 0.0;
        for k in 0..i {
            sum += l[[i, k]] * y[k];
        }
        y[i] = b[i] - sum;
    }

    y
}

/// Solve `U x = y` for upper triangular `U`
///
/// A zero diagonal entry yields a non-finite component which then spreads to
/// every component with a smaller index.
pub fn back_substitution(u: &Array2<f64>, y: &Array1<f64>) -> Array1<f64> {
    let n = y.len();
    let mut x = Array1::zeros(n);

    for i in (0..n).rev() {
        let mut sum = 0.0;
        for k in (i + 1)..n {
            sum += u[[i, k]] * x[k];
        }
        x[i] = (y[i] - sum) / u[[i, i]];
    }

    x
}

/// Solve Ax = b from the factors of A
pub fn lu_solve(
    l: &Array2<f64>,
    u: &Array2<f64>,
    b: &Array1<f64>,
) -> Result<Array1<f64>, LuError> {
    let n = l.nrows();
    for (rows, cols) in [l.dim(), u.dim()] {
        if rows != cols {
            return Err(LuError::NotSquare { rows, cols });
        }
    }
    if u.nrows() != n {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: u.nrows(),
        });
    }
    if b.len() != n {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    let y = forward_substitution(l, b);
    let x = back_substitution(u, &y);

    if x.iter().any(|v| !v.is_finite()) {
        log::warn!("LU solve produced non-finite components");
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_forward_substitution() {
        let l = array![[1.0_f64, 0.0, 0.0], [2.0, 1.0, 0.0], [-1.0, 3.0, 1.0]];
        let b = array![1.0_f64, 4.0, 10.0];

        let y = forward_substitution(&l, &b);

        // y0 = 1, y1 = 4 - 2 = 2, y2 = 10 + 1 - 6 = 5
        assert_abs_diff_eq!(y[0], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(y[1], 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(y[2], 5.0, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_substitution_ignores_diagonal() {
        let l = array![[9.0_f64, 0.0], [1.0, 9.0]];
        let b = array![2.0_f64, 3.0];

        let y = forward_substitution(&l, &b);

        assert_eq!(y[0], 2.0);
        assert_eq!(y[1], 1.0);
    }

    #[test]
    fn test_back_substitution() {
        let u = array![[2.0_f64, 1.0, -1.0], [0.0, 4.0, 2.0], [0.0, 0.0, 5.0]];
        let y = array![3.0_f64, 10.0, 5.0];

        let x = back_substitution(&u, &y);

        // x2 = 1, x1 = (10 - 2) / 4 = 2, x0 = (3 - 2 + 1) / 2 = 1
        assert_abs_diff_eq!(x[2], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_back_substitution_zero_pivot() {
        let u = array![[1.0_f64, 1.0], [0.0, 0.0]];
        let y = array![1.0_f64, 1.0];

        let x = back_substitution(&u, &y);

        assert!(x[1].is_infinite());
        assert!(!x[0].is_finite());
    }

    #[test]
    fn test_lu_solve_dimension_mismatch() {
        let l = Array2::<f64>::eye(3);
        let u = Array2::<f64>::eye(3);
        let b = array![1.0_f64, 2.0];

        let result = lu_solve(&l, &u, &b);
        assert!(matches!(
            result,
            Err(LuError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_lu_solve_identity() {
        let n = 5;
        let l = Array2::<f64>::eye(n);
        let u = Array2::<f64>::eye(n);
        let b = Array1::from_iter((1..=n).map(|i| i as f64));

        let x = lu_solve(&l, &u, &b).expect("Solve should succeed");

        for i in 0..n {
            assert_abs_diff_eq!(x[i], b[i], epsilon = 1e-14);
        }
    }
}
