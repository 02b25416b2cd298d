//! LU decomposition without pivoting
//!
//! Row-major Doolittle factorization `A = L·U` where `L` is unit lower
//! triangular and `U` is upper triangular. No pivoting is performed: a zero
//! diagonal entry of `U` produces non-finite values which are carried forward
//! rather than reported as an error.

use crate::traits::LuFactorizer;
use ndarray::{Array1, Array2};
use thiserror::Error;

/// Errors that can occur while building, factorizing or solving a system
#[derive(Error, Debug)]
pub enum LuError {
    #[error("Matrix is not square: {rows} rows, {cols} columns")]
    NotSquare { rows: usize, cols: usize },
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("System size must be at least 1")]
    EmptySystem,
    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// LU factorization result
///
/// `l` has an exact unit diagonal and exact zeros above it, `u` has exact
/// zeros below its diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors {
    /// Unit lower triangular factor
    pub l: Array2<f64>,
    /// Upper triangular factor
    pub u: Array2<f64>,
    /// Matrix dimension
    pub n: usize,
}

impl LuFactors {
    /// Zero-filled factors of dimension `n`, ready to be populated row by row
    pub(crate) fn zeros(n: usize) -> Self {
        Self {
            l: Array2::zeros((n, n)),
            u: Array2::zeros((n, n)),
            n,
        }
    }

    /// Solve Ax = b using the pre-computed factors
    ///
    /// Runs forward substitution on `L` then back substitution on `U`.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, LuError> {
        super::triangular::lu_solve(&self.l, &self.u, b)
    }

    /// Multiply the factors back together
    pub fn reconstruct(&self) -> Array2<f64> {
        self.l.dot(&self.u)
    }

    /// Indices `i` where `U[i][i]` is exactly zero
    pub fn zero_pivots(&self) -> Vec<usize> {
        (0..self.n).filter(|&i| self.u[[i, i]] == 0.0).collect()
    }

    /// True when every entry of both factors is finite
    pub fn is_finite(&self) -> bool {
        self.l.iter().chain(self.u.iter()).all(|v| v.is_finite())
    }
}

/// Check that `a` is a non-empty square matrix and return its dimension
pub(crate) fn square_dimension(a: &Array2<f64>) -> Result<usize, LuError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LuError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(LuError::EmptySystem);
    }
    Ok(rows)
}

/// `A[i][j] - Σ_{k<i} L[i][k]·U[k][j]`, entry `(i, j)` of `U` for `j >= i`
#[inline]
pub(crate) fn upper_entry(
    a: &Array2<f64>,
    l: &Array2<f64>,
    u: &Array2<f64>,
    i: usize,
    j: usize,
) -> f64 {
    let mut sum = 0.0;
    for k in 0..i {
        sum += l[[i, k]] * u[[k, j]];
    }
    a[[i, j]] - sum
}

/// `(A[j][i] - Σ_{k<i} L[j][k]·U[k][i]) / pivot`, entry `(j, i)` of `L` for `j > i`
#[inline]
pub(crate) fn lower_entry(
    a: &Array2<f64>,
    l: &Array2<f64>,
    u: &Array2<f64>,
    i: usize,
    j: usize,
    pivot: f64,
) -> f64 {
    let mut sum = 0.0;
    for k in 0..i {
        sum += l[[j, k]] * u[[k, i]];
    }
    (a[[j, i]] - sum) / pivot
}

pub(crate) fn warn_zero_pivot(i: usize) {
    log::warn!("Zero pivot at U[{i}][{i}]: factors will contain non-finite values");
}

/// Compute the LU factorization of `a` sequentially
///
/// Rows are processed in increasing order; row `i` of `U` and column `i` of
/// `L` only read rows and columns `< i`.
pub fn lu_factorize(a: &Array2<f64>) -> Result<LuFactors, LuError> {
    let n = square_dimension(a)?;
    log::debug!("Sequential LU factorization of a {n}x{n} matrix");

    let mut factors = LuFactors::zeros(n);

    for i in 0..n {
        factors.l[[i, i]] = 1.0;

        for j in i..n {
            factors.u[[i, j]] = upper_entry(a, &factors.l, &factors.u, i, j);
        }

        let pivot = factors.u[[i, i]];
        if pivot == 0.0 {
            warn_zero_pivot(i);
        }

        for j in (i + 1)..n {
            factors.l[[j, i]] = lower_entry(a, &factors.l, &factors.u, i, j, pivot);
        }
    }

    Ok(factors)
}

/// Sequential Doolittle factorizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialLu;

impl LuFactorizer for SequentialLu {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn factorize(&self, a: &Array2<f64>) -> Result<LuFactors, LuError> {
        lu_factorize(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_lu_factorize_known_3x3() {
        let a = array![[4.0_f64, 3.0, 2.0], [2.0, 1.0, 1.0], [1.0, 0.0, 1.0]];

        let factors = lu_factorize(&a).expect("Factorization should succeed");

        let expected_l = array![[1.0_f64, 0.0, 0.0], [0.5, 1.0, 0.0], [0.25, 1.5, 1.0]];
        let expected_u = array![[4.0_f64, 3.0, 2.0], [0.0, -0.5, 0.0], [0.0, 0.0, 0.5]];

        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(factors.l[[i, j]], expected_l[[i, j]], epsilon = 1e-12);
                assert_abs_diff_eq!(factors.u[[i, j]], expected_u[[i, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_lu_reconstruct() {
        let a = array![
            [2.0_f64, -1.0, 0.0, 1.0],
            [4.0, 1.0, 3.0, 0.5],
            [-2.0, 5.0, 7.0, 2.0],
            [1.0, 1.0, 1.0, 9.0],
        ];

        let factors = lu_factorize(&a).expect("Factorization should succeed");
        let lu = factors.reconstruct();

        for i in 0..4 {
            for j in 0..4 {
                assert_abs_diff_eq!(lu[[i, j]], a[[i, j]], epsilon = 1e-12);
            }
        }
        assert!(factors.is_finite());
        assert!(factors.zero_pivots().is_empty());
    }

    #[test]
    fn test_lu_triangular_structure() {
        let a = array![[3.0_f64, 1.0, 2.0], [6.0, 3.0, 4.0], [3.0, 1.0, 5.0]];
        let factors = lu_factorize(&a).expect("Factorization should succeed");

        for i in 0..3 {
            assert_eq!(factors.l[[i, i]], 1.0);
            for j in (i + 1)..3 {
                assert_eq!(factors.l[[i, j]], 0.0);
            }
            for j in 0..i {
                assert_eq!(factors.u[[i, j]], 0.0);
            }
        }
    }

    #[test]
    fn test_lu_single_entry() {
        let a = array![[7.0_f64]];
        let factors = lu_factorize(&a).expect("Factorization should succeed");
        assert_eq!(factors.l[[0, 0]], 1.0);
        assert_eq!(factors.u[[0, 0]], 7.0);
    }

    #[test]
    fn test_lu_zero_pivot_propagates() {
        let a = array![[0.0_f64, 1.0], [1.0, 0.0]];

        let factors = lu_factorize(&a).expect("Zero pivot is not an error");

        assert_eq!(factors.zero_pivots(), vec![0]);
        assert!(factors.l[[1, 0]].is_infinite());
        assert!(!factors.is_finite());
    }

    #[test]
    fn test_lu_not_square() {
        let a = Array2::<f64>::zeros((2, 3));
        let result = lu_factorize(&a);
        assert!(matches!(
            result,
            Err(LuError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_lu_empty() {
        let a = Array2::<f64>::zeros((0, 0));
        assert!(matches!(lu_factorize(&a), Err(LuError::EmptySystem)));
    }
}
