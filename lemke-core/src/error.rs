//! Error types for the LCP solver.
//!
//! Only malformed input ends up here. Outcomes of the pivoting itself
//! (no solution, iteration budget exhausted) are reported through
//! [`LcpStatus`](crate::LcpStatus).

use thiserror::Error;

/// Errors raised before any pivoting takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LcpError {
    /// The problem has dimension zero.
    #[error("Empty problem: dimension must be at least 1")]
    EmptyProblem,

    /// Dimension mismatch between q, M, or a fixed-size solver.
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which input disagreed
        what: &'static str,
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// An input entry is NaN or infinite.
    #[error("Non-finite entry in {what} at ({row}, {col})")]
    NonFinite {
        /// Which input held the entry ("q" or "M")
        what: &'static str,
        /// Row index
        row: usize,
        /// Column index (0 for q)
        col: usize,
    },

    /// Solver settings are unusable.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
