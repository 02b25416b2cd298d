//! Dense LU factorization, sequential and fork-join
//!
//! This crate factorizes a dense square matrix as `A = L·U` (Doolittle, no
//! pivoting) and solves `Ax = b` by forward and back substitution. Two
//! factorizers share the [`LuFactorizer`] interface:
//!
//! - [`SequentialLu`]: the plain row-by-row algorithm
//! - [`ConcurrentLu`]: the same algorithm with a fork-join barrier per row,
//!   forking a fixed number of workers on a dedicated rayon pool
//!
//! # Features
//!
//! - **Reproducible systems**: [`SystemGenerator`] with an explicit seed
//! - **Zero pivots propagate**: non-finite values are carried forward and can be
//!   detected with [`LuFactors::is_finite`] / [`LuFactors::zero_pivots`]
//! - **Comparison harness**: [`run_comparison`] times both paths and checks
//!   that the solutions agree
//!
//! # Example
//!
//! ```
//! use math_lu::{ParallelConfig, generate_system, lu_factorize, lu_factorize_concurrent};
//!
//! let system = generate_system(32, 0).unwrap();
//! let sequential = lu_factorize(&system.a).unwrap();
//! let concurrent = lu_factorize_concurrent(&system.a, &ParallelConfig::redundant(4)).unwrap();
//! assert_eq!(sequential, concurrent);
//!
//! let x = sequential.solve(&system.b).unwrap();
//! assert_eq!(x.len(), 32);
//! ```

pub mod compare;
pub mod direct;
pub mod parallel;
pub mod system;
pub mod traits;

// Re-export main types
pub use system::{DEFAULT_SEED, LinearSystem, SystemGenerator, generate_system};
pub use traits::LuFactorizer;

// Re-export factorizers and solvers
pub use direct::{
    LuError, LuFactors, SequentialLu, back_substitution, forward_substitution, lu_factorize,
    lu_solve,
};
pub use parallel::{ConcurrentLu, ParallelConfig, WorkStrategy, lu_factorize_concurrent};

// Re-export the comparison harness
pub use compare::{
    ComparisonConfig, ComparisonReport, PathOutcome, compare_on, relative_residual,
    run_comparison, solve_timed, vectors_agree,
};
