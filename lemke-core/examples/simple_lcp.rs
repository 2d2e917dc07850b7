//! Simple LCP example demonstrating the Lemke solver.
//!
//! Solves:
//!   w = q + M z,  w ≥ 0,  z ≥ 0,  wᵀz = 0
//!
//! with M = [[2, 1], [1, 2]] and q = [-1, -1].
//!
//! Solution: z = (1/3, 1/3), w = (0, 0)

use lemke_core::{compute_metrics, solve, LcpProblem, LcpSettings, LcpSolver};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_rational::BigRational;

fn main() {
    println!("Lemke Solver - Simple LCP Example");
    println!("=================================");
    println!();

    let prob = LcpProblem::new(
        vec![-1.0, -1.0],
        DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]),
    );

    let settings = LcpSettings {
        verbose: true,
        track_repr_size: true,
        ..Default::default()
    };

    println!("Solving in f64...");
    match solve(&prob, &settings) {
        Ok(result) => {
            println!("Status: {}", result.status);
            println!("w = {:?}", result.w);
            println!("z = {:?}", result.z);
            println!("Pivots: {}", result.info.pivots);

            let metrics = compute_metrics(&prob.q, &prob.m, &result.w, &result.z);
            println!("Residual: {:.3e}", metrics.residual_inf);
            println!("wᵀz:      {:.3e}", metrics.complementarity);
        }
        Err(e) => {
            println!("Error: {}", e);
        }
    }
    println!();

    // Same problem in exact arithmetic
    let int = |v: i64| BigRational::from_integer(BigInt::from(v));
    let q = vec![int(-1), int(-1)];
    let m = DMatrix::from_row_slice(2, 2, &[int(2), int(1), int(1), int(2)]);

    println!("Solving in exact rationals...");
    let mut solver = LcpSolver::with_settings(settings);
    match solver.solve(&q, &m) {
        Ok(result) => {
            println!("Status: {}", result.status);
            let show = |v: &[BigRational]| {
                v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
            };
            println!("w = [{}]", show(&result.w));
            println!("z = [{}]", show(&result.z));
            if let Some(bits) = result.info.max_repr_bits {
                println!("Largest tableau entry: {} bits", bits);
            }
        }
        Err(e) => {
            println!("Error: {}", e);
        }
    }
}
