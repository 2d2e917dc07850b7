use nalgebra::DMatrix;

use crate::scalar::{abs_value, LcpReal};

/// Solution quality measures for a candidate (w, z).
#[derive(Debug, Clone, PartialEq)]
pub struct LcpMetrics<R: LcpReal> {
    /// max_i |w_i - q_i - (M z)_i|
    pub residual_inf: R,

    /// wᵀ z
    pub complementarity: R,

    pub min_w: R,
    pub min_z: R,
}

impl<R: LcpReal> LcpMetrics<R> {
    /// Whether (w, z) satisfies the LCP within `tol`.
    ///
    /// With exact arithmetic, `tol = 0` checks the conditions exactly.
    pub fn is_complementary(&self, tol: &R) -> bool {
        let neg_tol = -tol.clone();
        self.residual_inf <= *tol
            && abs_value(&self.complementarity) <= *tol
            && self.min_w >= neg_tol
            && self.min_z >= neg_tol
    }
}

#[inline]
fn min_entry<R: LcpReal>(v: &[R]) -> R {
    v.iter()
        .skip(1)
        .fold(v.first().cloned().unwrap_or_else(R::zero), |acc, x| {
            if *x < acc {
                x.clone()
            } else {
                acc
            }
        })
}

/// Compute residual and complementarity measures.
///
/// Works for any dimension-consistent input; the solver output can be passed
/// directly regardless of status.
pub fn compute_metrics<R: LcpReal>(q: &[R], m: &DMatrix<R>, w: &[R], z: &[R]) -> LcpMetrics<R> {
    let n = q.len();
    debug_assert_eq!(m.nrows(), n);
    debug_assert_eq!(m.ncols(), n);
    debug_assert_eq!(w.len(), n);
    debug_assert_eq!(z.len(), n);

    // r = w - q - M z
    let mut residual_inf = R::zero();
    for i in 0..n {
        let mut r = w[i].clone() - q[i].clone();
        for (j, zj) in z.iter().enumerate() {
            r = r - m[(i, j)].clone() * zj.clone();
        }
        let r = abs_value(&r);
        if r > residual_inf {
            residual_inf = r;
        }
    }

    let complementarity = w
        .iter()
        .zip(z)
        .fold(R::zero(), |acc, (wi, zi)| acc + wi.clone() * zi.clone());

    LcpMetrics {
        residual_inf,
        complementarity,
        min_w: min_entry(w),
        min_z: min_entry(z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_solution() {
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let metrics = compute_metrics(&[-1.0, 2.0], &m, &[0.0, 2.5], &[0.5, 0.0]);

        assert_eq!(metrics.residual_inf, 0.0);
        assert_eq!(metrics.complementarity, 0.0);
        assert_eq!(metrics.min_w, 0.0);
        assert_eq!(metrics.min_z, 0.0);
        assert!(metrics.is_complementary(&0.0));
    }

    #[test]
    fn test_violations_are_reported() {
        let m = DMatrix::identity(2, 2);

        // Both w_0 and z_0 positive
        let metrics = compute_metrics(&[0.0, 0.0], &m, &[1.0, 0.0], &[1.0, 0.0]);
        assert_eq!(metrics.residual_inf, 0.0);
        assert_eq!(metrics.complementarity, 1.0);
        assert!(!metrics.is_complementary(&1e-9));

        // w does not match q + M z
        let metrics = compute_metrics(&[1.0, 1.0], &m, &[1.0, 0.0], &[0.0, 0.0]);
        assert_eq!(metrics.residual_inf, 1.0);

        // Negative z
        let metrics = compute_metrics(&[1.0, 1.0], &m, &[0.0, 1.0], &[-1.0, 0.0]);
        assert_eq!(metrics.min_z, -1.0);
        assert!(!metrics.is_complementary(&1e-9));
    }
}
