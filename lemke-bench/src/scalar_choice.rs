use clap::ValueEnum;
use lemke_core::{compute_metrics, LcpError, LcpReal, LcpResult, LcpSolver};
use nalgebra::DMatrix;
use num_rational::BigRational;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarChoice {
    F64,
    Rational,
    Both,
}

impl ScalarChoice {
    pub fn runs_f64(self) -> bool {
        matches!(self, ScalarChoice::F64 | ScalarChoice::Both)
    }

    pub fn runs_rational(self) -> bool {
        matches!(self, ScalarChoice::Rational | ScalarChoice::Both)
    }
}

/// Tolerance used to accept an f64 solution.
pub const F64_TOL: f64 = 1e-8;

/// Solve and check the returned (w, z) when the status claims a solution.
///
/// Returns the result and whether verification passed.
pub fn solve_and_verify<R: LcpReal>(
    solver: &mut LcpSolver<R>,
    q: &[R],
    m: &DMatrix<R>,
    tol: &R,
) -> Result<(LcpResult<R>, bool), LcpError> {
    let result = solver.solve(q, m)?;
    if !result.is_solved() {
        return Ok((result, true));
    }
    let metrics = compute_metrics(q, m, &result.w, &result.z);
    let ok = metrics.is_complementary(tol);
    if !ok {
        log::warn!(
            "verification failed: residual={:.3e} wz={:.3e} min_w={:.3e} min_z={:.3e}",
            metrics.residual_inf.to_f64(),
            metrics.complementarity.to_f64(),
            metrics.min_w.to_f64(),
            metrics.min_z.to_f64()
        );
    }
    Ok((result, ok))
}

/// f64 tolerance scaled to the data magnitude.
pub fn f64_tolerance(q: &[f64], m: &DMatrix<f64>) -> f64 {
    let scale = q
        .iter()
        .chain(m.iter())
        .fold(1.0f64, |acc, v| acc.max(v.abs()));
    F64_TOL * scale
}

pub fn rational_zero() -> BigRational {
    BigRational::from_integer(0.into())
}
