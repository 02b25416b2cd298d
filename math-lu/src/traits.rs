//! Core traits
//!
//! [`LuFactorizer`] is the common interface of the sequential and concurrent
//! factorizers, so that callers (the comparison harness, benchmarks, tests)
//! can drive either one interchangeably.

use crate::direct::{LuError, LuFactors};
use ndarray::Array2;

/// An algorithm that produces the `L·U` factors of a square matrix
pub trait LuFactorizer {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Factorize `a` into unit lower `L` and upper `U`
    ///
    /// Fails on non-square or empty input. A zero pivot is not a failure: it
    /// shows up as non-finite entries in the returned factors.
    fn factorize(&self, a: &Array2<f64>) -> Result<LuFactors, LuError>;
}
