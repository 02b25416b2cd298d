//! Sequential vs. concurrent comparison
//!
//! Builds one system, solves it once through each factorizer on its own copy,
//! times both end-to-end paths and checks that the solutions agree.

use crate::direct::{LuError, SequentialLu};
use crate::parallel::{ConcurrentLu, ParallelConfig};
use crate::system::{DEFAULT_SEED, LinearSystem, generate_system};
use crate::traits::LuFactorizer;
use ndarray::Array1;
use std::time::{Duration, Instant};

/// Comparison run configuration
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Dimension of the generated system
    pub size: usize,
    /// Generator seed
    pub seed: u64,
    /// Concurrent factorizer settings
    pub parallel: ParallelConfig,
    /// Absolute per-component tolerance for solution agreement
    pub tolerance: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            size: 512,
            seed: DEFAULT_SEED,
            parallel: ParallelConfig::default(),
            tolerance: 1e-6,
        }
    }
}

/// Result of one factorize + solve path
#[derive(Debug, Clone)]
pub struct PathOutcome {
    /// Factorizer label
    pub name: &'static str,
    /// Wall-clock time of factorization and solve
    pub elapsed: Duration,
    /// Solution vector
    pub x: Array1<f64>,
    /// `||Ax - b|| / ||b||`
    pub residual: f64,
}

impl PathOutcome {
    /// True when every solution component is finite
    pub fn is_finite(&self) -> bool {
        self.x.iter().all(|v| v.is_finite())
    }
}

/// Outcome of a comparison run
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub size: usize,
    pub sequential: PathOutcome,
    pub concurrent: PathOutcome,
    /// Solutions agree within the configured tolerance
    pub agree: bool,
}

impl ComparisonReport {
    /// True when either solution contains a non-finite component
    pub fn non_finite(&self) -> bool {
        !self.sequential.is_finite() || !self.concurrent.is_finite()
    }
}

/// Euclidean norm
fn norm2(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}

/// Relative residual `||Ax - b|| / ||b||`
///
/// Falls back to the absolute residual when `b` is zero.
pub fn relative_residual(system: &LinearSystem, x: &Array1<f64>) -> f64 {
    let r = system.a.dot(x) - &system.b;
    let b_norm = norm2(&system.b);
    if b_norm > 0.0 {
        norm2(&r) / b_norm
    } else {
        norm2(&r)
    }
}

/// Component-wise agreement within an absolute tolerance
///
/// Vectors of different length never agree; a non-finite component never
/// agrees with anything.
pub fn vectors_agree(a: &Array1<f64>, b: &Array1<f64>, tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// Factorize and solve a private copy of `system`, timing the whole path
pub fn solve_timed(
    factorizer: &dyn LuFactorizer,
    system: &LinearSystem,
) -> Result<PathOutcome, LuError> {
    let local = system.clone();

    let start = Instant::now();
    let factors = factorizer.factorize(&local.a)?;
    let x = factors.solve(&local.b)?;
    let elapsed = start.elapsed();

    let residual = relative_residual(&local, &x);
    log::info!(
        "{} path: {:.5} s, relative residual = {:.3e}",
        factorizer.name(),
        elapsed.as_secs_f64(),
        residual
    );

    Ok(PathOutcome {
        name: factorizer.name(),
        elapsed,
        x,
        residual,
    })
}

/// Compare both factorizers on an existing system
pub fn compare_on(
    system: &LinearSystem,
    parallel: &ParallelConfig,
    tolerance: f64,
) -> Result<ComparisonReport, LuError> {
    let sequential = solve_timed(&SequentialLu, system)?;
    let concurrent = solve_timed(&ConcurrentLu::new(parallel.clone()), system)?;
    let agree = vectors_agree(&sequential.x, &concurrent.x, tolerance);

    let report = ComparisonReport {
        size: system.size(),
        sequential,
        concurrent,
        agree,
    };

    if report.non_finite() {
        log::warn!("Solution contains non-finite values (zero pivot encountered)");
    }

    Ok(report)
}

/// Generate a system from `config` and compare both factorizers on it
pub fn run_comparison(config: &ComparisonConfig) -> Result<ComparisonReport, LuError> {
    let system = generate_system(config.size, config.seed)?;
    compare_on(&system, &config.parallel, config.tolerance)
}
