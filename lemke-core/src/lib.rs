//! Lemke: a complementary pivoting solver for linear complementarity problems
//!
//! Given a vector `q` and a square matrix `M`, the solver looks for `w` and `z`
//! satisfying
//!
//! ```text
//! w = q + M z,   w ≥ 0,   z ≥ 0,   wᵀ z = 0
//! ```
//!
//! Problems of this form arise from contact and friction constraints, the
//! KKT conditions of convex quadratic programs, and bimatrix games.
//!
//! # Algorithm
//!
//! Lemke's method with an artificial covering variable, run on a dense
//! tableau. Degenerate ratio tests are broken with a lexicographic
//! perturbation of `q`, so the pivot sequence is always well defined.
//!
//! - **Generic scalars**: `f64`, `f32`, or exact `BigRational` (feature `rational`)
//! - **Reusable workspace** sized on first use, plus a const-generic variant
//! - **Opt-in diagnostics** through the `log` facade and a coefficient-size monitor
//!
//! Termination is guaranteed only for certain matrix classes (for example
//! positive definite or positive semidefinite M); otherwise the solver may
//! report `NoSolution` even though a solution exists.
//!
//! # Example
//!
//! ```
//! use lemke_core::{solve, LcpProblem, LcpSettings, LcpStatus};
//! use nalgebra::DMatrix;
//!
//! let prob = LcpProblem::new(
//!     vec![-1.0, -1.0],
//!     DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]),
//! );
//!
//! let result = solve(&prob, &LcpSettings::default()).unwrap();
//!
//! assert_eq!(result.status, LcpStatus::NontrivialSolution);
//! println!("z = {:?}", result.z);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;
pub mod lemke;
pub mod metrics;
pub mod problem;
pub mod scalar;
pub mod tableau;

// Re-export main types
pub use error::LcpError;
pub use lemke::{FixedLcpSolver, LcpSolver};
pub use metrics::{compute_metrics, LcpMetrics};
pub use problem::{LcpProblem, LcpResult, LcpSettings, LcpStatus, SolveInfo};
pub use scalar::LcpReal;

/// Main solve entry point.
///
/// Builds a one-shot solver; use [`LcpSolver`] directly to reuse the
/// workspace across many problems of the same size.
pub fn solve<R: LcpReal>(
    problem: &LcpProblem<R>,
    settings: &LcpSettings,
) -> Result<LcpResult<R>, LcpError> {
    LcpSolver::with_settings(settings.clone()).solve_problem(problem)
}
