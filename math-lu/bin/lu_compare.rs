//! Compare sequential and fork-join LU solves on a random system
//!
//! Usage:
//!     cargo run --release --bin lu-compare -- --size 512 --workers 10

use clap::{Parser, ValueEnum};
use math_lu::{ComparisonConfig, ParallelConfig, WorkStrategy, run_comparison};

#[derive(Parser, Debug)]
#[command(
    name = "lu-compare",
    about = "Time sequential vs. concurrent LU factorization and check the solutions agree"
)]
struct Cli {
    /// Dimension of the linear system
    #[arg(long, default_value_t = 512)]
    size: usize,

    /// Number of concurrent workers forked per row
    #[arg(long, default_value_t = 10)]
    workers: usize,

    /// Random seed for the generated system
    #[arg(long, default_value_t = math_lu::DEFAULT_SEED)]
    seed: u64,

    /// How per-row work is distributed over the workers
    #[arg(long, value_enum, default_value_t = StrategyChoice::Redundant)]
    strategy: StrategyChoice,

    /// Absolute per-component tolerance for comparing the solutions
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyChoice {
    Redundant,
    Partitioned,
}

impl From<StrategyChoice> for WorkStrategy {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::Redundant => WorkStrategy::Redundant,
            StrategyChoice::Partitioned => WorkStrategy::Partitioned,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = ComparisonConfig {
        size: cli.size,
        seed: cli.seed,
        parallel: ParallelConfig {
            workers: cli.workers,
            strategy: cli.strategy.into(),
        },
        tolerance: cli.tolerance,
    };

    println!("Matrix size: {}", config.size);
    println!("Workers: {} ({:?})", config.parallel.workers, config.parallel.strategy);

    let report = run_comparison(&config)?;

    println!(
        "Sequential time: {:.5} seconds",
        report.sequential.elapsed.as_secs_f64()
    );
    println!(
        "Concurrent time: {:.5} seconds",
        report.concurrent.elapsed.as_secs_f64()
    );
    println!("Solutions agree: {}", report.agree);

    if report.non_finite() {
        eprintln!("Warning: non-finite values in the solution (zero pivot without pivoting)");
    }

    Ok(())
}
