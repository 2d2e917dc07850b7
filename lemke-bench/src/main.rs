//! Benchmarking and regression CLI for the Lemke LCP solver.

mod generators;
mod report;
mod scalar_choice;

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lemke_core::{LcpSettings, LcpSolver};
use num_rational::BigRational;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::generators::{instances, Family};
use crate::report::FamilyReport;
use crate::scalar_choice::{f64_tolerance, rational_zero, solve_and_verify, ScalarChoice};

#[derive(Parser, Debug)]
#[command(name = "lemke-bench", about = "Solve seeded LCP families and verify the results")]
struct Args {
    /// Problem family to generate
    #[arg(long, value_enum, default_value = "all")]
    family: Family,

    /// Problem dimension (largest dimension for the Murty family)
    #[arg(long, default_value_t = 6)]
    dim: usize,

    /// Instances per randomized family
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Scalar type to solve with
    #[arg(long, value_enum, default_value = "both")]
    scalar: ScalarChoice,

    /// Iteration budget (default n + 2)
    #[arg(long)]
    max_iter: Option<usize>,

    /// Enable solver diagnostics through the logger
    #[arg(long)]
    verbose: bool,
}

fn run_family(family: Family, args: &Args, rng: &mut ChaCha8Rng) -> Result<FamilyReport> {
    let settings = LcpSettings {
        max_iter: args.max_iter,
        track_repr_size: true,
        verbose: args.verbose,
    };
    let mut float_solver = LcpSolver::<f64>::with_settings(settings.clone());
    let mut exact_solver = LcpSolver::<BigRational>::with_settings(settings);
    let zero = rational_zero();

    let mut report = FamilyReport::new(family.name());
    for prob in instances(family, args.dim, args.count, rng) {
        report.instances += 1;

        let float_status = if args.scalar.runs_f64() {
            let (q, m) = prob.convert::<f64>()?;
            let tol = f64_tolerance(&q, &m);
            let start = Instant::now();
            let (result, ok) = solve_and_verify(&mut float_solver, &q, &m, &tol)
                .with_context(|| format!("f64 solve of {}", prob.label))?;
            report.float.record(result.status, &result.info, ok, start.elapsed());
            if !ok {
                log::warn!("{}: f64 solution rejected", prob.label);
            }
            Some(result.status)
        } else {
            None
        };

        let exact_status = if args.scalar.runs_rational() {
            let (q, m) = prob.convert::<BigRational>()?;
            let start = Instant::now();
            let (result, ok) = solve_and_verify(&mut exact_solver, &q, &m, &zero)
                .with_context(|| format!("rational solve of {}", prob.label))?;
            report.exact.record(result.status, &result.info, ok, start.elapsed());
            if !ok {
                log::warn!("{}: rational solution rejected", prob.label);
            }
            Some(result.status)
        } else {
            None
        };

        if let (Some(f), Some(e)) = (float_status, exact_status) {
            if f != e {
                log::info!("{} (n = {}): f64 {} vs rational {}", prob.label, prob.dim(), f, e);
                report
                    .disagreements
                    .push(format!("{}: f64 {} vs rational {}", prob.label, f, e));
            }
        }
    }

    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }
    if args.dim == 0 {
        bail!("--dim must be at least 1");
    }

    println!("Lemke LCP Benchmarks");
    println!("====================");
    println!(
        "family={:?} dim={} count={} seed={} scalar={:?}",
        args.family, args.dim, args.count, args.seed, args.scalar
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0;
    for family in args.family.expand() {
        let report = run_family(family, &args, &mut rng)?;
        report.print();
        failures += report.verify_failures();
    }

    println!("\n{}", "=".repeat(60));
    println!("Benchmarks complete");
    println!("{}", "=".repeat(60));

    if failures > 0 {
        bail!("{} solutions failed verification", failures);
    }
    Ok(())
}
