//! Augmented tableau for Lemke pivoting.
//!
//! Layout of the n × (2n + 2) matrix, row r:
//!
//! ```text
//! | 0 .. n-1       | n          | n+1 .. 2n+1                  |
//! | coefficients   | artificial | perturbation polynomial p_r  |
//! | of nonbasic    | column U   | p_r(t) = q_r + t^(r+1)       |
//! ```
//!
//! Column c (c ≤ n) holds the coefficient of the nonbasic variable in slot c,
//! so row r reads `basic_r = p_r(t) + Σ_c A[r][c] · nonbasic_c`. The constant
//! term of p_r sits in column n+1 and is the value of the basic variable once
//! the nonbasic variables are set to zero.

use nalgebra::DMatrix;

use crate::scalar::LcpReal;

/// Dense augmented tableau, owned by one solve at a time.
#[derive(Debug, Clone)]
pub struct Tableau<R: LcpReal> {
    n: usize,
    data: DMatrix<R>,
}

impl<R: LcpReal> Tableau<R> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: DMatrix::from_element(n, 2 * n + 2, R::zero()),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        2 * self.n + 2
    }

    /// Column of the artificial variable z_n.
    #[inline]
    pub fn artificial_col(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &R {
        &self.data[(row, col)]
    }

    /// Constant term p_r(0) of a row.
    #[inline]
    pub fn constant(&self, row: usize) -> &R {
        &self.data[(row, self.n + 1)]
    }

    /// Write the perturbation polynomials p_r(t) = q_r + t^(r+1).
    pub fn load_perturbation(&mut self, q: &[R]) {
        let n = self.n;
        debug_assert_eq!(q.len(), n);
        for (r, qr) in q.iter().enumerate() {
            for k in 0..=n {
                self.data[(r, n + 1 + k)] = R::zero();
            }
            self.data[(r, n + 1)] = qr.clone();
            self.data[(r, n + 2 + r)] = R::one();
        }
    }

    /// Write M into columns 0..n and the all-ones column U into column n.
    pub fn load_matrix(&mut self, m: &DMatrix<R>) {
        let n = self.n;
        debug_assert_eq!(m.nrows(), n);
        debug_assert_eq!(m.ncols(), n);
        for r in 0..n {
            for c in 0..n {
                self.data[(r, c)] = m[(r, c)].clone();
            }
            self.data[(r, n)] = R::one();
        }
    }

    /// Copy the perturbation polynomial of `row` into `out` (length n + 1).
    pub fn copy_poly(&self, row: usize, out: &mut [R]) {
        debug_assert_eq!(out.len(), self.n + 1);
        for (k, o) in out.iter_mut().enumerate() {
            *o = self.data[(row, self.n + 1 + k)].clone();
        }
    }

    /// `out = factor · p_row`.
    pub fn scaled_poly(&self, row: usize, factor: &R, out: &mut [R]) {
        debug_assert_eq!(out.len(), self.n + 1);
        for (k, o) in out.iter_mut().enumerate() {
            *o = factor.clone() * self.data[(row, self.n + 1 + k)].clone();
        }
    }

    /// Initial pivot: solve equation `basic` for the artificial variable.
    ///
    /// The artificial column is all ones here, so eliminating it from the
    /// other rows is a plain row subtraction and the column itself is left
    /// untouched.
    pub fn pivot_artificial(&mut self, basic: usize) {
        let art = self.artificial_col();
        let cols = self.ncols();

        for r in (0..self.n).filter(|&r| r != basic) {
            for c in (0..cols).filter(|&c| c != art) {
                let current = self.data[(r, c)].clone();
                self.data[(r, c)] = current - self.data[(basic, c)].clone();
            }
        }

        for c in (0..cols).filter(|&c| c != art) {
            let current = self.data[(basic, c)].clone();
            self.data[(basic, c)] = -current;
        }
    }

    /// Gauss-Jordan pivot: the nonbasic variable in column `driving` enters
    /// equation `basic`, and the variable leaving takes over that column.
    pub fn pivot(&mut self, basic: usize, driving: usize) {
        let cols = self.ncols();
        let inv_denom = R::one() / self.data[(basic, driving)].clone();

        for r in (0..self.n).filter(|&r| r != basic) {
            if self.data[(r, driving)].is_zero() {
                continue;
            }
            let multiplier = self.data[(r, driving)].clone() * inv_denom.clone();
            for c in 0..cols {
                if c == driving {
                    self.data[(r, c)] = multiplier.clone();
                } else {
                    let delta = self.data[(basic, c)].clone() * multiplier.clone();
                    let current = self.data[(r, c)].clone();
                    self.data[(r, c)] = current - delta;
                }
            }
        }

        for c in 0..cols {
            if c == driving {
                self.data[(basic, c)] = inv_denom.clone();
            } else {
                let current = self.data[(basic, c)].clone();
                self.data[(basic, c)] = -(current * inv_denom.clone());
            }
        }
    }

    /// All entries, for size monitoring.
    pub fn entries(&self) -> impl Iterator<Item = &R> {
        self.data.iter()
    }
}

/// Lexicographic `a < b`, constant term first.
pub fn lex_less<R: PartialOrd>(a: &[R], b: &[R]) -> bool {
    for (x, y) in a.iter().zip(b) {
        if x < y {
            return true;
        }
        if x > y {
            return false;
        }
    }
    false
}

/// Lexicographic `a < 0`: the first nonzero coefficient is negative.
pub fn lex_negative<R: LcpReal>(a: &[R]) -> bool {
    let zero = R::zero();
    for x in a {
        if *x < zero {
            return true;
        }
        if *x > zero {
            return false;
        }
    }
    false
}
