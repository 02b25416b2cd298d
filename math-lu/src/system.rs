//! Dense linear systems and their reproducible generation
//!
//! [`SystemGenerator`] owns a seeded [`StdRng`]; there is no global random
//! state, so two generators built with the same seed yield identical systems.

use crate::direct::LuError;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 0;

/// A square system `A x = b`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// Coefficient matrix (n × n)
    pub a: Array2<f64>,
    /// Right-hand side (n)
    pub b: Array1<f64>,
}

impl LinearSystem {
    /// Build a system, checking that `a` is square and `b` matches it
    pub fn new(a: Array2<f64>, b: Array1<f64>) -> Result<Self, LuError> {
        let (rows, cols) = a.dim();
        if rows != cols {
            return Err(LuError::NotSquare { rows, cols });
        }
        if b.len() != rows {
            return Err(LuError::DimensionMismatch {
                expected: rows,
                got: b.len(),
            });
        }
        Ok(Self { a, b })
    }

    /// Dimension of the system
    pub fn size(&self) -> usize {
        self.b.len()
    }
}

/// Seeded generator of random dense systems
#[derive(Debug, Clone)]
pub struct SystemGenerator {
    rng: StdRng,
}

impl Default for SystemGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl SystemGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a `size × size` system
    ///
    /// Entries of `A` are uniform in `[0, 10)`, entries of `b` uniform in
    /// `[0, 1)`. The matrix is drawn first, row by row, then the vector.
    pub fn generate(&mut self, size: usize) -> Result<LinearSystem, LuError> {
        if size == 0 {
            return Err(LuError::EmptySystem);
        }

        let rng = &mut self.rng;
        let a = Array2::from_shape_fn((size, size), |_| rng.random_range(0.0..10.0));
        let b = Array1::from_shape_fn(size, |_| rng.random::<f64>());

        LinearSystem::new(a, b)
    }
}

/// Generate one system from a fresh generator seeded with `seed`
pub fn generate_system(size: usize, seed: u64) -> Result<LinearSystem, LuError> {
    SystemGenerator::new(seed).generate(size)
}
