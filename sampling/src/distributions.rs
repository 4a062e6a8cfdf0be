use rand_distr::{Distribution, StandardNormal};

use crate::source::Source;

/// Tail cut of the rounded Gaussian, in standard deviations.
pub const SIX_SIGMA: f64 = 6.0;

/// Distribution of a secret key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretDistribution {
    UniformTernary,
    Gaussian,
}

/// Rounded Gaussian of standard deviation `sigma`, truncated to `[-bound, bound]`.
#[derive(Clone, Copy, Debug)]
pub struct DiscreteGaussian {
    pub sigma: f64,
    pub bound: f64,
}

impl DiscreteGaussian {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            bound: SIX_SIGMA * sigma,
        }
    }

    pub fn sample_i64(&self, source: &mut Source) -> i64 {
        loop {
            let z: f64 = StandardNormal.sample(source);
            let x: f64 = self.sigma * z;
            if x.abs() <= self.bound {
                return x.round() as i64;
            }
        }
    }
}

impl SecretDistribution {
    pub fn sample_i64(&self, sigma: f64, source: &mut Source) -> i64 {
        match self {
            SecretDistribution::UniformTernary => source.next_ternary(),
            SecretDistribution::Gaussian => DiscreteGaussian::new(sigma).sample_i64(source),
        }
    }
}
