//! Lemke's complementary pivoting with lexicographic perturbation.
//!
//! The augmented problem adds an artificial variable z_n with a covering
//! column of ones:
//!
//! ```text
//! w = q + M z + U z_n
//! ```
//!
//! z_n first enters the basis in the row with the lexicographically smallest
//! perturbed q, which makes every basic variable nonnegative. Each subsequent
//! pivot brings in the complement of the variable that just left. The
//! procedure stops when z_n leaves (a solution), when the driving column has
//! no negative entry (ray termination, no solution), or when the iteration
//! budget is spent.
//!
//! Ties in the ratio test are resolved by comparing the perturbation
//! polynomials p_r(t) = q_r + t^(r+1) lexicographically, which keeps the
//! pivot sequence well defined on degenerate problems.

use std::mem;

use nalgebra::DMatrix;

use crate::diagnostics::{DiagnosticsConfig, SizeMonitor};
use crate::error::LcpError;
use crate::problem::{validate_data, LcpProblem, LcpResult, LcpSettings, LcpStatus, SolveInfo};
use crate::scalar::LcpReal;
use crate::tableau::{lex_less, lex_negative, Tableau};

/// Output a bookkeeping record writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarSlot {
    W(usize),
    Z(usize),
}

impl VarSlot {
    #[inline]
    fn index(self) -> usize {
        match self {
            VarSlot::W(i) | VarSlot::Z(i) => i,
        }
    }
}

/// One variable of the dictionary.
///
/// `complementary` is the slot, in the opposite array, that holds the
/// variable paired with this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Variable {
    slot: VarSlot,
    complementary: usize,
}

impl Variable {
    fn write<R: LcpReal>(&self, value: R, w: &mut [R], z: &mut [R]) {
        match self.slot {
            VarSlot::W(i) => w[i] = value,
            VarSlot::Z(i) => z[i] = value,
        }
    }
}

/// Runtime-sized LCP solver with a reusable workspace.
///
/// Buffers are sized on the first call and reused while the dimension stays
/// the same. An instance is not shared between concurrent solves; create one
/// per thread.
///
/// # Example
///
/// ```
/// use lemke_core::{LcpSolver, LcpStatus};
/// use nalgebra::DMatrix;
///
/// let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
/// let mut solver = LcpSolver::<f64>::new();
/// let result = solver.solve(&[-1.0, -1.0], &m).unwrap();
///
/// assert_eq!(result.status, LcpStatus::NontrivialSolution);
/// assert!((result.z[0] - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LcpSolver<R: LcpReal> {
    settings: LcpSettings,
    diag: DiagnosticsConfig,

    tableau: Tableau<R>,
    basic: Vec<Variable>,
    nonbasic: Vec<Variable>,

    // Polynomial scratch (length n + 1)
    qmin: Vec<R>,
    ratio: Vec<R>,
    min_ratio: Vec<R>,
}

impl<R: LcpReal> Default for LcpSolver<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: LcpReal> LcpSolver<R> {
    /// Create a solver with default settings.
    pub fn new() -> Self {
        Self::with_settings(LcpSettings::default())
    }

    /// Create a solver with the given settings.
    pub fn with_settings(settings: LcpSettings) -> Self {
        Self {
            settings,
            diag: DiagnosticsConfig::from_env(),
            tableau: Tableau::new(0),
            basic: Vec::new(),
            nonbasic: Vec::new(),
            qmin: Vec::new(),
            ratio: Vec::new(),
            min_ratio: Vec::new(),
        }
    }

    pub fn settings(&self) -> &LcpSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: LcpSettings) {
        self.settings = settings;
    }

    /// Solve a problem instance.
    pub fn solve_problem(&mut self, problem: &LcpProblem<R>) -> Result<LcpResult<R>, LcpError> {
        self.solve(&problem.q, &problem.m)
    }

    /// Solve `w = q + M z, w ≥ 0, z ≥ 0, wᵀz = 0`.
    ///
    /// Returns an error only for malformed input; every pivoting outcome is
    /// reported through [`LcpResult::status`].
    pub fn solve(&mut self, q: &[R], m: &DMatrix<R>) -> Result<LcpResult<R>, LcpError> {
        validate_data(q, m)?;
        self.settings.validate()?;

        let n = q.len();
        let mut w = vec![R::zero(); n];
        let mut z = vec![R::zero(); n];
        let (status, info) = self.run(q, m, &mut w, &mut z);

        Ok(LcpResult { status, w, z, info })
    }

    /// Size the workspace for dimension `n`.
    fn prepare(&mut self, n: usize) {
        if self.tableau.dim() != n {
            self.tableau = Tableau::new(n);
        }
        let var = Variable { slot: VarSlot::W(0), complementary: 0 };
        self.basic.resize(n + 1, var);
        self.nonbasic.resize(n + 1, var);
        self.qmin.resize(n + 1, R::zero());
        self.ratio.resize(n + 1, R::zero());
        self.min_ratio.resize(n + 1, R::zero());
    }

    /// Run on validated input, writing the solution into `w` and `z`.
    pub(crate) fn run(
        &mut self,
        q: &[R],
        m: &DMatrix<R>,
        w: &mut [R],
        z: &mut [R],
    ) -> (LcpStatus, SolveInfo) {
        self.prepare(q.len());

        let mut info = SolveInfo::default();
        let mut monitor = self.settings.track_repr_size.then(SizeMonitor::new);
        let status = self.lemke(q, m, w, z, &mut info, &mut monitor);
        info.max_repr_bits = monitor.map(|mon| mon.max_bits());

        (status, info)
    }

    fn lemke(
        &mut self,
        q: &[R],
        m: &DMatrix<R>,
        w: &mut [R],
        z: &mut [R],
        info: &mut SolveInfo,
        monitor: &mut Option<SizeMonitor>,
    ) -> LcpStatus {
        let n = q.len();
        let diag = self.diag.clone().with_verbose(self.settings.verbose);

        // Row whose perturbed q is lexicographically smallest
        self.tableau.load_perturbation(q);
        self.tableau.copy_poly(0, &mut self.qmin);
        let mut basic = 0;
        for r in 1..n {
            self.tableau.copy_poly(r, &mut self.ratio);
            if lex_less(&self.ratio, &self.qmin) {
                mem::swap(&mut self.qmin, &mut self.ratio);
                basic = r;
            }
        }

        if !lex_negative(&self.qmin) {
            w.clone_from_slice(q);
            z.fill(R::zero());
            if let Some(mon) = monitor {
                mon.observe(q.iter());
            }
            return LcpStatus::TrivialSolution;
        }

        self.tableau.load_matrix(m);
        for i in 0..=n {
            self.basic[i] = Variable { slot: VarSlot::W(i), complementary: i };
            self.nonbasic[i] = Variable { slot: VarSlot::Z(i), complementary: i };
        }

        // z_n enters through equation `basic`
        let mut driving = n;
        self.tableau.pivot_artificial(basic);
        info.pivots = 1;
        if let Some(mon) = monitor.as_mut() {
            mon.observe(self.tableau.entries());
        }
        if diag.should_log(info.pivots) {
            log::debug!("lemke: pivot {} row={} col={} (artificial)", info.pivots, basic, driving);
        }

        let budget = self.settings.iteration_budget(n);
        for iter in 0..budget {
            info.iters = iter + 1;

            // The variable leaving equation `basic` hands the driving role to
            // its complement.
            let next_driving = self.basic[basic].complementary;
            self.nonbasic[next_driving].complementary = driving;
            mem::swap(&mut self.basic[basic], &mut self.nonbasic[driving]);

            if self.nonbasic[driving].slot.index() == n {
                // Floating-point pivots can overflow on finite but extreme data.
                if let Some(row) = (0..n).find(|&r| !self.tableau.constant(r).is_finite_value()) {
                    w.fill(R::zero());
                    z.fill(R::zero());
                    if diag.enabled {
                        log::warn!(
                            "lemke: non-finite value in row {} at termination (n = {}, pivots = {})",
                            row,
                            n,
                            info.pivots
                        );
                    }
                    return LcpStatus::FailedToConverge;
                }

                // z_n is nonbasic again: read off the complementary solution.
                for r in 0..n {
                    self.basic[r].write(self.tableau.constant(r).clone(), w, z);
                }
                for var in self.nonbasic.iter().filter(|v| v.slot.index() < n) {
                    var.write(R::zero(), w, z);
                }
                return LcpStatus::NontrivialSolution;
            }

            driving = next_driving;

            // Ratio test on the perturbed constants
            let mut pivot_row = None;
            for r in 0..n {
                let coeff = self.tableau.get(r, driving);
                if *coeff < R::zero() {
                    let factor = -(R::one() / coeff.clone());
                    self.tableau.scaled_poly(r, &factor, &mut self.ratio);
                    if pivot_row.is_none() || lex_less(&self.ratio, &self.min_ratio) {
                        mem::swap(&mut self.min_ratio, &mut self.ratio);
                        pivot_row = Some(r);
                    }
                }
            }

            let Some(row) = pivot_row else {
                // Nothing blocks the driving variable: ray termination.
                w.fill(R::zero());
                z.fill(R::zero());
                if diag.enabled {
                    log::debug!(
                        "lemke: no blocking row for column {} after {} pivots (n = {})",
                        driving,
                        info.pivots,
                        n
                    );
                }
                return LcpStatus::NoSolution;
            };

            basic = row;
            self.tableau.pivot(basic, driving);
            info.pivots += 1;
            if let Some(mon) = monitor.as_mut() {
                mon.observe(self.tableau.entries());
            }
            if diag.should_log(info.pivots) {
                log::debug!("lemke: pivot {} row={} col={}", info.pivots, basic, driving);
            }
        }

        w.fill(R::zero());
        z.fill(R::zero());
        if diag.enabled {
            log::warn!(
                "lemke: failed to converge within {} iterations (n = {}, pivots = {})",
                budget,
                n,
                info.pivots
            );
        }
        LcpStatus::FailedToConverge
    }

    /// Output indices of the current basic variables (rows 0..n).
    #[cfg(test)]
    fn basic_indices(&self) -> Vec<usize> {
        let n = self.tableau.dim();
        self.basic[..n].iter().map(|v| v.slot.index()).collect()
    }
}

/// LCP solver with the dimension fixed at compile time.
///
/// Mirrors the out-parameter calling convention: the caller owns `w` and `z`
/// and checks [`LcpStatus::is_solved`] before reading them.
#[derive(Debug, Clone)]
pub struct FixedLcpSolver<R: LcpReal, const N: usize> {
    inner: LcpSolver<R>,
    m: DMatrix<R>,
    last_info: SolveInfo,
}

impl<R: LcpReal, const N: usize> Default for FixedLcpSolver<R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: LcpReal, const N: usize> FixedLcpSolver<R, N> {
    pub fn new() -> Self {
        Self::with_settings(LcpSettings::default())
    }

    pub fn with_settings(settings: LcpSettings) -> Self {
        Self {
            inner: LcpSolver::with_settings(settings),
            m: DMatrix::from_element(N, N, R::zero()),
            last_info: SolveInfo::default(),
        }
    }

    pub fn settings(&self) -> &LcpSettings {
        self.inner.settings()
    }

    /// Statistics of the most recent solve.
    pub fn last_info(&self) -> SolveInfo {
        self.last_info
    }

    /// Solve with M given row-major; results are written into `w` and `z`.
    pub fn solve_into(
        &mut self,
        q: &[R; N],
        m: &[[R; N]; N],
        w: &mut [R; N],
        z: &mut [R; N],
    ) -> Result<LcpStatus, LcpError> {
        for (r, row) in m.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                self.m[(r, c)] = v.clone();
            }
        }
        validate_data(q, &self.m)?;
        self.inner.settings.validate()?;

        let (status, info) = self.inner.run(q, &self.m, w, z);
        self.last_info = info;
        Ok(status)
    }
}
