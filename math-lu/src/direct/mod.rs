//! Direct solvers for dense linear systems
//!
//! - [`lu_factorize`]: Doolittle LU factorization without pivoting
//! - [`lu_solve`]: forward then back substitution on the factors

mod lu;
mod triangular;

pub use lu::{LuError, LuFactors, SequentialLu, lu_factorize};
pub(crate) use lu::{lower_entry, square_dimension, upper_entry, warn_zero_pivot};
pub use triangular::{back_substitution, forward_substitution, lu_solve};
