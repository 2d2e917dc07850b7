//! Randomized tests over seeded problem families.
//!
//! Matrix classes with known termination behavior:
//! - positive definite: a unique solution always exists and is found
//! - positive semidefinite: a solution is found whenever one exists
//! - n = 1: closed form

use lemke_core::{compute_metrics, LcpProblem, LcpReal, LcpSettings, LcpSolver, LcpStatus};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_rational::BigRational;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TOL: f64 = 1e-9;

fn settings(max_iter: Option<usize>) -> LcpSettings {
    LcpSettings {
        max_iter,
        track_repr_size: false,
        verbose: false,
    }
}

/// The n + 2 budget suffices for n ≤ 2; larger instances get headroom.
fn budget_for(n: usize) -> Option<usize> {
    if n <= 2 {
        None
    } else {
        Some(1000)
    }
}

/// Integer-valued M = A Aᵀ + I and q.
fn random_pd(rng: &mut ChaCha8Rng, n: usize) -> (Vec<i64>, DMatrix<i64>) {
    let a = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-3i64..=3));
    let m = &a * a.transpose() + DMatrix::identity(n, n);
    let q = (0..n).map(|_| rng.gen_range(-5i64..=5)).collect();
    (q, m)
}

fn to_f64(q: &[i64], m: &DMatrix<i64>) -> (Vec<f64>, DMatrix<f64>) {
    (q.iter().map(|&v| v as f64).collect(), m.map(|v| v as f64))
}

/// Exact rationals built from the f64 data, checked against the integers.
fn to_rational(q: &[i64], m: &DMatrix<i64>) -> (Vec<BigRational>, DMatrix<BigRational>) {
    let conv = |v: i64| {
        let r = <BigRational as LcpReal>::from_f64(v as f64).unwrap();
        assert_eq!(r, BigRational::from_integer(BigInt::from(v)));
        r
    };
    (q.iter().map(|&v| conv(v)).collect(), m.map(conv))
}

#[test]
fn test_positive_definite_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut solver = LcpSolver::<f64>::new();

    for _ in 0..200 {
        let n = rng.gen_range(1..=4);
        let (q, m) = random_pd(&mut rng, n);
        let (q, m) = to_f64(&q, &m);

        solver.set_settings(settings(budget_for(n)));
        let result = solver.solve(&q, &m).unwrap();

        assert!(
            result.is_solved(),
            "PD problem not solved: status={}, q={:?}",
            result.status,
            q
        );
        let metrics = compute_metrics(&q, &m, &result.w, &result.z);
        assert!(
            metrics.is_complementary(&TOL),
            "PD solution violates conditions: {:?}",
            metrics
        );
    }
}

#[test]
fn test_rational_and_float_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(54321);
    let mut float_solver = LcpSolver::<f64>::new();
    let mut exact_solver = LcpSolver::<BigRational>::new();

    for _ in 0..100 {
        let n = rng.gen_range(1..=4);
        let (qi, mi) = random_pd(&mut rng, n);
        let (qf, mf) = to_f64(&qi, &mi);
        let (qr, mr) = to_rational(&qi, &mi);

        float_solver.set_settings(settings(budget_for(n)));
        exact_solver.set_settings(settings(budget_for(n)));
        let float = float_solver.solve(&qf, &mf).unwrap();
        let exact = exact_solver.solve(&qr, &mr).unwrap();

        assert!(float.is_solved());
        assert!(exact.is_solved());

        // PD solutions are unique.
        for (zf, zr) in float.z.iter().zip(&exact.z) {
            assert!((zf - zr.to_f64()).abs() < TOL, "z mismatch: {} vs {}", zf, zr);
        }
        for (wf, wr) in float.w.iter().zip(&exact.w) {
            assert!((wf - wr.to_f64()).abs() < TOL, "w mismatch: {} vs {}", wf, wr);
        }

        let metrics = compute_metrics(&qr, &mr, &exact.w, &exact.z);
        assert!(metrics.is_complementary(&BigRational::from_integer(BigInt::from(0))));
    }
}

#[test]
fn test_positive_semidefinite_feasible() {
    // q = w0 - M z0 with complementary w0, z0 ≥ 0, so a solution exists.
    let mut rng = ChaCha8Rng::seed_from_u64(11111);
    let mut solver = LcpSolver::<BigRational>::with_settings(settings(Some(1000)));
    let zero = BigRational::from_integer(BigInt::from(0));

    for _ in 0..100 {
        let n = rng.gen_range(1..=4);
        let rank = rng.gen_range(1..=n);
        let b = DMatrix::from_fn(n, rank, |_, _| rng.gen_range(-2i64..=2));
        let mi = &b * b.transpose();

        let z0: Vec<i64> = (0..n)
            .map(|_| if rng.gen_bool(0.5) { rng.gen_range(0..=3) } else { 0 })
            .collect();
        let w0: Vec<i64> = z0
            .iter()
            .map(|&zi| if zi > 0 { 0 } else { rng.gen_range(0..=3) })
            .collect();
        let qi: Vec<i64> = (0..n)
            .map(|i| w0[i] - (0..n).map(|j| mi[(i, j)] * z0[j]).sum::<i64>())
            .collect();

        let (q, m) = to_rational(&qi, &mi);
        let result = solver.solve(&q, &m).unwrap();

        assert!(
            result.is_solved(),
            "feasible PSD problem reported {}: q={:?}",
            result.status,
            qi
        );
        let metrics = compute_metrics(&q, &m, &result.w, &result.z);
        assert!(metrics.is_complementary(&zero), "{:?}", metrics);
    }
}

#[test]
fn test_scalar_closed_form() {
    let mut rng = ChaCha8Rng::seed_from_u64(22222);
    let mut solver = LcpSolver::<f64>::with_settings(settings(None));

    for _ in 0..200 {
        let q: f64 = rng.gen_range(-10.0..10.0);
        let m: f64 = rng.gen_range(-10.0..10.0);
        let result = solver.solve(&[q], &DMatrix::from_element(1, 1, m)).unwrap();

        if q >= 0.0 {
            assert_eq!(result.status, LcpStatus::TrivialSolution);
            assert_eq!(result.w, vec![q]);
            assert_eq!(result.z, vec![0.0]);
        } else if m > 0.0 {
            assert_eq!(result.status, LcpStatus::NontrivialSolution);
            assert!((result.z[0] - (-q / m)).abs() < 1e-12 * (1.0 + (q / m).abs()));
            assert_eq!(result.w, vec![0.0]);
        } else {
            assert_eq!(result.status, LcpStatus::NoSolution);
        }
    }
}

#[test]
fn test_nonnegative_q_is_trivial() {
    let mut rng = ChaCha8Rng::seed_from_u64(33333);
    let mut solver = LcpSolver::<f64>::new();

    for _ in 0..50 {
        let n = rng.gen_range(1..=6);
        let q: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..5.0)).collect();
        let m = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-5.0..5.0));

        let result = solver.solve(&q, &m).unwrap();
        assert_eq!(result.status, LcpStatus::TrivialSolution);
        assert_eq!(result.w, q);
        assert!(result.z.iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_deterministic_across_solvers() {
    let mut rng = ChaCha8Rng::seed_from_u64(44444);
    let mut reused = LcpSolver::<f64>::with_settings(settings(Some(64)));

    for _ in 0..50 {
        let n = rng.gen_range(1..=5);
        let q: Vec<f64> = (0..n).map(|_| rng.gen_range(-5.0..5.0)).collect();
        let m = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-5.0..5.0));
        let prob = LcpProblem::new(q, m);

        let first = reused.solve_problem(&prob).unwrap();
        let again = reused.solve_problem(&prob).unwrap();
        let fresh = LcpSolver::with_settings(settings(Some(64)))
            .solve_problem(&prob)
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(first, fresh);
        assert_eq!(first.w.len(), n);
        assert_eq!(first.z.len(), n);
    }
}
