//! Problem data structures, settings, and results.
//!
//! The solver works with the standard linear complementarity problem:
//!
//! ```text
//! find        w, z
//! such that   w = q + M z
//!             w ≥ 0,  z ≥ 0
//!             wᵀ z = 0
//! ```
//!
//! where `q` has length n and `M` is n × n.

use std::fmt;

use nalgebra::DMatrix;

use crate::diagnostics::env_positive;
use crate::error::LcpError;
use crate::scalar::LcpReal;

/// Linear complementarity problem instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LcpProblem<R: LcpReal> {
    /// Constant vector q (length n)
    pub q: Vec<R>,

    /// Coupling matrix M (n × n)
    pub m: DMatrix<R>,
}

impl<R: LcpReal> LcpProblem<R> {
    /// Create a problem from q and M.
    pub fn new(q: Vec<R>, m: DMatrix<R>) -> Self {
        Self { q, m }
    }

    /// Create a problem from q and the rows of M.
    ///
    /// Fails if any row has a length different from q.
    pub fn from_rows(q: Vec<R>, rows: &[Vec<R>]) -> Result<Self, LcpError> {
        let n = q.len();
        if rows.len() != n {
            return Err(LcpError::DimensionMismatch {
                what: "M rows",
                expected: n,
                actual: rows.len(),
            });
        }
        for row in rows {
            if row.len() != n {
                return Err(LcpError::DimensionMismatch {
                    what: "M columns",
                    expected: n,
                    actual: row.len(),
                });
            }
        }
        let m = DMatrix::from_fn(n, n, |r, c| rows[r][c].clone());
        Ok(Self { q, m })
    }

    /// Problem dimension n.
    pub fn dim(&self) -> usize {
        self.q.len()
    }

    /// Validate dimensions and entries.
    pub fn validate(&self) -> Result<(), LcpError> {
        validate_data(&self.q, &self.m)
    }
}

/// Check that q and M describe a well-formed problem.
pub(crate) fn validate_data<R: LcpReal>(q: &[R], m: &DMatrix<R>) -> Result<(), LcpError> {
    let n = q.len();
    if n == 0 {
        return Err(LcpError::EmptyProblem);
    }
    if m.nrows() != n {
        return Err(LcpError::DimensionMismatch {
            what: "M rows",
            expected: n,
            actual: m.nrows(),
        });
    }
    if m.ncols() != n {
        return Err(LcpError::DimensionMismatch {
            what: "M columns",
            expected: n,
            actual: m.ncols(),
        });
    }

    if let Some(row) = q.iter().position(|v| !v.is_finite_value()) {
        return Err(LcpError::NonFinite { what: "q", row, col: 0 });
    }
    for r in 0..n {
        for c in 0..n {
            if !m[(r, c)].is_finite_value() {
                return Err(LcpError::NonFinite { what: "M", row: r, col: c });
            }
        }
    }
    Ok(())
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcpSettings {
    /// Maximum pivoting-loop iterations (None = n + 2)
    pub max_iter: Option<usize>,

    /// Track the largest tableau entry representation after each pivot
    pub track_repr_size: bool,

    /// Emit pivot traces and the failure-to-converge warning through `log`
    pub verbose: bool,
}

impl Default for LcpSettings {
    fn default() -> Self {
        // LEMKE_MAX_ITER overrides the n + 2 budget for every solve
        let max_iter = env_positive("LEMKE_MAX_ITER");

        Self {
            max_iter,
            track_repr_size: false,
            verbose: false,
        }
    }
}

impl LcpSettings {
    /// Iteration budget for a problem of dimension `n`.
    pub fn iteration_budget(&self, n: usize) -> usize {
        self.max_iter.unwrap_or(n + 2)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<(), LcpError> {
        if self.max_iter == Some(0) {
            return Err(LcpError::InvalidSettings(
                "max_iter must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Solve status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LcpStatus {
    /// q ≥ 0, so w = q, z = 0 solves the problem without pivoting
    TrivialSolution,

    /// The artificial variable left the basis; (w, z) is a solution
    NontrivialSolution,

    /// The driving variable has no blocking row; no solution exists
    NoSolution,

    /// The iteration budget ran out before termination, or the final
    /// basic values are not finite (floating-point overflow)
    FailedToConverge,
}

impl LcpStatus {
    /// Whether w and z hold a valid solution.
    pub fn is_solved(self) -> bool {
        matches!(self, LcpStatus::TrivialSolution | LcpStatus::NontrivialSolution)
    }
}

impl fmt::Display for LcpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LcpStatus::TrivialSolution => write!(f, "Trivial Solution"),
            LcpStatus::NontrivialSolution => write!(f, "Nontrivial Solution"),
            LcpStatus::NoSolution => write!(f, "No Solution"),
            LcpStatus::FailedToConverge => write!(f, "Failed To Converge"),
        }
    }
}

/// Solve statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveInfo {
    /// Pivoting-loop iterations completed
    pub iters: usize,

    /// Pivots performed, including the initial pivot on the artificial variable
    pub pivots: usize,

    /// Largest tableau entry seen, in bits (only with `track_repr_size`)
    pub max_repr_bits: Option<usize>,
}

/// Solve result.
///
/// `w` and `z` are meaningful only when [`LcpResult::is_solved`] holds, and
/// are then finite.
/// They are zero after `NoSolution` and `FailedToConverge`.
#[derive(Debug, Clone, PartialEq)]
pub struct LcpResult<R: LcpReal> {
    /// Solve status
    pub status: LcpStatus,

    /// w = q + M z (length n)
    pub w: Vec<R>,

    /// z (length n)
    pub z: Vec<R>,

    /// Solve statistics
    pub info: SolveInfo,
}

impl<R: LcpReal> LcpResult<R> {
    /// Whether `w` and `z` hold a solution.
    pub fn is_solved(&self) -> bool {
        self.status.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let prob = LcpProblem::from_rows(
            vec![-1.0, -1.0],
            &[vec![2.0, 1.0], vec![1.0, 2.0]],
        )
        .unwrap();
        assert_eq!(prob.dim(), 2);
        assert_eq!(prob.m[(0, 1)], 1.0);
        assert!(prob.validate().is_ok());

        let err = LcpProblem::from_rows(vec![1.0, 1.0], &[vec![1.0, 0.0], vec![0.0]]).unwrap_err();
        assert_eq!(
            err,
            LcpError::DimensionMismatch { what: "M columns", expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_validation() {
        let empty = LcpProblem::<f64>::new(vec![], DMatrix::zeros(0, 0));
        assert_eq!(empty.validate(), Err(LcpError::EmptyProblem));

        let wrong = LcpProblem::new(vec![1.0, 2.0], DMatrix::zeros(2, 3));
        assert!(matches!(
            wrong.validate(),
            Err(LcpError::DimensionMismatch { what: "M columns", .. })
        ));

        let nan_q = LcpProblem::new(vec![1.0, f64::NAN], DMatrix::identity(2, 2));
        assert_eq!(
            nan_q.validate(),
            Err(LcpError::NonFinite { what: "q", row: 1, col: 0 })
        );

        let mut m = DMatrix::identity(2, 2);
        m[(1, 0)] = f64::INFINITY;
        let inf_m = LcpProblem::new(vec![1.0, 1.0], m);
        assert_eq!(
            inf_m.validate(),
            Err(LcpError::NonFinite { what: "M", row: 1, col: 0 })
        );
    }

    #[test]
    fn test_settings_budget() {
        let settings = LcpSettings {
            max_iter: None,
            ..Default::default()
        };
        assert_eq!(settings.iteration_budget(3), 5);
        assert!(settings.validate().is_ok());

        let settings = LcpSettings {
            max_iter: Some(16),
            ..Default::default()
        };
        assert_eq!(settings.iteration_budget(3), 16);

        let settings = LcpSettings {
            max_iter: Some(0),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(LcpError::InvalidSettings(_))));
    }

    #[test]
    fn test_status() {
        assert!(LcpStatus::TrivialSolution.is_solved());
        assert!(LcpStatus::NontrivialSolution.is_solved());
        assert!(!LcpStatus::NoSolution.is_solved());
        assert!(!LcpStatus::FailedToConverge.is_solved());
        assert_eq!(LcpStatus::NoSolution.to_string(), "No Solution");
    }
}
