//! Seeded problem families.
//!
//! All generators produce integer data so that every instance converts
//! exactly to both `f64` and `BigRational`.

use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use lemke_core::LcpReal;
use nalgebra::DMatrix;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// Symmetric positive definite M = A Aᵀ + δI
    Pd,
    /// Rank-deficient positive semidefinite M = B Bᵀ
    Psd,
    /// Murty's lower-triangular family (exponential pivot count)
    Murty,
    /// Unstructured integer matrices
    Random,
    /// Every family above
    All,
}

impl Family {
    pub fn expand(self) -> Vec<Family> {
        match self {
            Family::All => vec![Family::Pd, Family::Psd, Family::Murty, Family::Random],
            f => vec![f],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Family::Pd => "positive definite",
            Family::Psd => "positive semidefinite",
            Family::Murty => "murty",
            Family::Random => "random",
            Family::All => "all",
        }
    }
}

/// Integer-valued LCP instance.
#[derive(Debug, Clone)]
pub struct GeneratedProblem {
    pub label: String,
    pub q: Vec<i64>,
    pub m: DMatrix<i64>,
}

impl GeneratedProblem {
    pub fn dim(&self) -> usize {
        self.q.len()
    }

    /// Convert to scalar type `R` through its `f64` conversion.
    ///
    /// Fails unless every entry is exact in `f64` and converts back to the
    /// same `f64`.
    pub fn convert<R: LcpReal>(&self) -> Result<(Vec<R>, DMatrix<R>)> {
        let conv = |v: i64| -> Result<R> {
            let x = v as f64;
            if x as i64 != v {
                bail!("{}: {} is not exact in f64", self.label, v);
            }
            let r = R::from_f64(x).ok_or_else(|| anyhow!("{}: {} has no exact value", self.label, v))?;
            if r.to_f64() != x {
                bail!("{}: {} does not round-trip ({})", self.label, v, r.to_f64());
            }
            Ok(r)
        };

        let q = self.q.iter().map(|&v| conv(v)).collect::<Result<Vec<_>>>()?;
        let n = self.dim();
        let mut m = DMatrix::from_element(n, n, R::zero());
        for r in 0..n {
            for c in 0..n {
                m[(r, c)] = conv(self.m[(r, c)])?;
            }
        }
        Ok((q, m))
    }
}

/// Instances of one family.
///
/// Murty instances are deterministic, so the family yields one problem per
/// dimension 1..=dim instead of `count` copies.
pub fn instances(
    family: Family,
    dim: usize,
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<GeneratedProblem> {
    match family {
        Family::Murty => (1..=dim).map(murty).collect(),
        Family::All => family
            .expand()
            .into_iter()
            .flat_map(|f| instances(f, dim, count, rng))
            .collect(),
        _ => (0..count)
            .map(|i| {
                let mut prob = match family {
                    Family::Pd => positive_definite(rng, dim),
                    Family::Psd => positive_semidefinite(rng, dim),
                    _ => random(rng, dim),
                };
                prob.label = format!("{}-{}", prob.label, i);
                prob
            })
            .collect(),
    }
}

fn random_q(rng: &mut ChaCha8Rng, n: usize) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(-10i64..=10)).collect()
}

pub fn positive_definite(rng: &mut ChaCha8Rng, n: usize) -> GeneratedProblem {
    let a = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-4i64..=4));
    let delta = rng.gen_range(1i64..=3);
    let m = &a * a.transpose() + DMatrix::identity(n, n) * delta;

    GeneratedProblem {
        label: format!("pd{}", n),
        q: random_q(rng, n),
        m,
    }
}

pub fn positive_semidefinite(rng: &mut ChaCha8Rng, n: usize) -> GeneratedProblem {
    let rank = rng.gen_range(1..=n.max(1));
    let b = DMatrix::from_fn(n, rank, |_, _| rng.gen_range(-3i64..=3));
    let m = &b * b.transpose();

    GeneratedProblem {
        label: format!("psd{}r{}", n, rank),
        q: random_q(rng, n),
        m,
    }
}

/// M has ones on the diagonal and twos below it; q = -1.
///
/// Lemke's method needs 2^n iterations on this instance.
pub fn murty(n: usize) -> GeneratedProblem {
    let m = DMatrix::from_fn(n, n, |r, c| match r.cmp(&c) {
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Greater => 2,
        std::cmp::Ordering::Less => 0,
    });

    GeneratedProblem {
        label: format!("murty{}", n),
        q: vec![-1; n],
        m,
    }
}

pub fn random(rng: &mut ChaCha8Rng, n: usize) -> GeneratedProblem {
    let m = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-5i64..=5));

    GeneratedProblem {
        label: format!("rand{}", n),
        q: random_q(rng, n),
        m,
    }
}
