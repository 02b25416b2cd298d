//! Fork-join LU factorization
//!
//! For every outer row index `i` the controller forks a fixed number of
//! workers on a dedicated rayon pool and joins them before moving on to
//! `i + 1`, giving one barrier per row.
//!
//! Two work strategies are available:
//!
//! - [`WorkStrategy::Redundant`]: every worker computes the whole row `i` of
//!   `U` and column `i` of `L`. The work is duplicated, not divided, so this
//!   is never faster than [`lu_factorize`](crate::direct::lu_factorize); it
//!   only reproduces the per-row fork-join shape.
//! - [`WorkStrategy::Partitioned`]: the row of `U` is computed by the
//!   controller and the entries of the `L` column are strided across workers.
//!
//! Workers only ever read `A` and the finalized rows/columns `< i`. Their
//! results are committed to `L` and `U` by the controller after the barrier,
//! so no two threads write the same storage concurrently.

use crate::direct::{
    LuError, LuFactors, lower_entry, square_dimension, upper_entry, warn_zero_pivot,
};
use crate::traits::LuFactorizer;
use ndarray::Array2;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::{Mutex, PoisonError};

/// How the per-row work is distributed over the workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkStrategy {
    /// Every worker repeats the full row computation
    #[default]
    Redundant,
    /// Entries of the `L` column are strided across workers
    Partitioned,
}

/// Concurrent factorization configuration
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of workers forked per row (and size of the worker pool)
    pub workers: usize,
    /// Work distribution
    pub strategy: WorkStrategy,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            strategy: WorkStrategy::Redundant,
        }
    }
}

impl ParallelConfig {
    /// Redundant strategy with `workers` workers
    pub fn redundant(workers: usize) -> Self {
        Self {
            workers,
            strategy: WorkStrategy::Redundant,
        }
    }

    /// Partitioned strategy with `workers` workers
    pub fn partitioned(workers: usize) -> Self {
        Self {
            workers,
            strategy: WorkStrategy::Partitioned,
        }
    }
}

/// Row `i` of `U` (columns `i..n`) and column `i` of `L` (rows `i+1..n`)
#[derive(Debug, Clone)]
struct RowUpdate {
    upper: Vec<f64>,
    lower: Vec<f64>,
}

impl RowUpdate {
    fn compute(a: &Array2<f64>, l: &Array2<f64>, u: &Array2<f64>, i: usize) -> Self {
        let n = a.nrows();
        let upper: Vec<f64> = (i..n).map(|j| upper_entry(a, l, u, i, j)).collect();
        let pivot = upper[0];
        let lower = ((i + 1)..n)
            .map(|j| lower_entry(a, l, u, i, j, pivot))
            .collect();
        Self { upper, lower }
    }

    fn commit(self, factors: &mut LuFactors, i: usize) {
        for (offset, value) in self.upper.into_iter().enumerate() {
            factors.u[[i, i + offset]] = value;
        }
        for (offset, value) in self.lower.into_iter().enumerate() {
            factors.l[[i + 1 + offset, i]] = value;
        }
    }
}

fn build_pool(workers: usize) -> Result<ThreadPool, LuError> {
    if workers == 0 {
        return Err(LuError::InvalidWorkerCount);
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("lu-worker-{index}"))
        .build()?;
    Ok(pool)
}

fn factorize_redundant(pool: &ThreadPool, a: &Array2<f64>, workers: usize) -> LuFactors {
    let n = a.nrows();
    let mut factors = LuFactors::zeros(n);

    for i in 0..n {
        factors.l[[i, i]] = 1.0;

        let slot: Mutex<Option<RowUpdate>> = Mutex::new(None);
        let (l, u) = (&factors.l, &factors.u);
        pool.scope(|s| {
            for _ in 0..workers {
                let slot = &slot;
                s.spawn(move |_| {
                    let update = RowUpdate::compute(a, l, u, i);
                    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(update);
                });
            }
        });

        // Every worker published an identical update; keep the last one.
        if let Some(update) = slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
            if update.upper[0] == 0.0 {
                warn_zero_pivot(i);
            }
            update.commit(&mut factors, i);
        }
    }

    factors
}

fn factorize_partitioned(pool: &ThreadPool, a: &Array2<f64>, workers: usize) -> LuFactors {
    let n = a.nrows();
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

        let remaining = n - (i + 1);
        if remaining == 0 {
            continue;
        }

        let tasks = workers.min(remaining);
        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); tasks];
        let (l, u) = (&factors.l, &factors.u);
        pool.scope(|s| {
            for (task, out) in columns.iter_mut().enumerate() {
                s.spawn(move |_| {
                    *out = ((i + 1 + task)..n)
                        .step_by(tasks)
                        .map(|j| (j, lower_entry(a, l, u, i, j, pivot)))
                        .collect();
                });
            }
        });

        for (j, value) in columns.into_iter().flatten() {
            factors.l[[j, i]] = value;
        }
    }

    factors
}

/// Compute the LU factorization of `a` with a per-row fork-join barrier
///
/// Produces exactly the same factors as
/// [`lu_factorize`](crate::direct::lu_factorize): each entry is computed by
/// the same sequence of floating-point operations.
pub fn lu_factorize_concurrent(
    a: &Array2<f64>,
    config: &ParallelConfig,
) -> Result<LuFactors, LuError> {
    let n = square_dimension(a)?;
    let pool = build_pool(config.workers)?;

    log::debug!(
        "Concurrent LU factorization of a {n}x{n} matrix ({} workers, {:?})",
        config.workers,
        config.strategy
    );

    let factors = match config.strategy {
        WorkStrategy::Redundant => factorize_redundant(&pool, a, config.workers),
        WorkStrategy::Partitioned => factorize_partitioned(&pool, a, config.workers),
    };

    Ok(factors)
}

/// Fork-join Doolittle factorizer
#[derive(Debug, Clone, Default)]
pub struct ConcurrentLu {
    pub config: ParallelConfig,
}

impl ConcurrentLu {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }
}

impl LuFactorizer for ConcurrentLu {
    fn name(&self) -> &'static str {
        match self.config.strategy {
            WorkStrategy::Redundant => "concurrent-redundant",
            WorkStrategy::Partitioned => "concurrent-partitioned",
        }
    }

    fn factorize(&self, a: &Array2<f64>) -> Result<LuFactors, LuError> {
        lu_factorize_concurrent(a, &self.config)
    }
}
