use std::time::Duration;

use lemke_core::{LcpStatus, SolveInfo};

/// Status counts and pivot statistics for one scalar type.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub trivial: usize,
    pub nontrivial: usize,
    pub no_solution: usize,
    pub failed: usize,
    pub verify_failures: usize,
    pub total_pivots: usize,
    pub max_pivots: usize,
    pub max_repr_bits: Option<usize>,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn record(&mut self, status: LcpStatus, info: &SolveInfo, verified: bool, elapsed: Duration) {
        match status {
            LcpStatus::TrivialSolution => self.trivial += 1,
            LcpStatus::NontrivialSolution => self.nontrivial += 1,
            LcpStatus::NoSolution => self.no_solution += 1,
            LcpStatus::FailedToConverge => self.failed += 1,
        }
        if !verified {
            self.verify_failures += 1;
        }
        self.total_pivots += info.pivots;
        self.max_pivots = self.max_pivots.max(info.pivots);
        if let Some(bits) = info.max_repr_bits {
            self.max_repr_bits = Some(self.max_repr_bits.map_or(bits, |b| b.max(bits)));
        }
        self.elapsed += elapsed;
    }

    pub fn solves(&self) -> usize {
        self.trivial + self.nontrivial + self.no_solution + self.failed
    }

    fn print(&self, label: &str) {
        let solves = self.solves();
        if solves == 0 {
            return;
        }
        println!("  [{}]", label);
        println!(
            "    Trivial: {}  Nontrivial: {}  No solution: {}  Failed: {}",
            self.trivial, self.nontrivial, self.no_solution, self.failed
        );
        println!(
            "    Pivots:  avg {:.2}, max {}",
            self.total_pivots as f64 / solves as f64,
            self.max_pivots
        );
        if let Some(bits) = self.max_repr_bits {
            println!("    Largest entry: {} bits", bits);
        }
        println!("    Verification failures: {}", self.verify_failures);
        println!(
            "    Solve time: {:.3} ms total, {:.3} ms/solve",
            self.elapsed.as_secs_f64() * 1000.0,
            self.elapsed.as_secs_f64() * 1000.0 / solves as f64
        );
    }
}

/// Results for one problem family.
#[derive(Debug, Clone)]
pub struct FamilyReport {
    pub family: &'static str,
    pub instances: usize,
    pub float: RunStats,
    pub exact: RunStats,
    /// Instances where f64 and rational statuses differ
    pub disagreements: Vec<String>,
}

impl FamilyReport {
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            instances: 0,
            float: RunStats::default(),
            exact: RunStats::default(),
            disagreements: Vec::new(),
        }
    }

    pub fn verify_failures(&self) -> usize {
        self.float.verify_failures + self.exact.verify_failures
    }

    pub fn print(&self) {
        println!("\n{}", "=".repeat(60));
        println!("Family: {} ({} instances)", self.family, self.instances);
        println!("{}", "=".repeat(60));
        self.float.print("f64");
        self.exact.print("rational");
        if self.float.solves() > 0 && self.exact.solves() > 0 {
            println!("  Status disagreements: {}", self.disagreements.len());
            for d in &self.disagreements {
                println!("    {}", d);
            }
        }
    }
}
