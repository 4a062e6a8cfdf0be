use std::fmt;

use backend::Modulus;
use sampling::{distributions::SecretDistribution, source::Source};

/// LWE secret with small signed coefficients.
#[derive(Clone, PartialEq, Eq)]
pub struct LWESecret {
    pub(crate) data: Vec<i64>,
    pub(crate) dist: SecretDistribution,
}

impl fmt::Debug for LWESecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LWESecret")
            .field("n", &self.n())
            .field("dist", &self.dist)
            .finish_non_exhaustive()
    }
}

impl LWESecret {
    pub fn alloc(n: usize) -> Self {
        Self {
            data: vec![0; n],
            dist: SecretDistribution::UniformTernary,
        }
    }

    pub fn generate(n: usize, dist: SecretDistribution, sigma: f64, source: &mut Source) -> Self {
        let mut sk: LWESecret = LWESecret::alloc(n);
        sk.fill(dist, sigma, source);
        sk
    }

    pub fn from_coeffs(data: Vec<i64>, dist: SecretDistribution) -> Self {
        Self { data, dist }
    }

    pub fn fill(&mut self, dist: SecretDistribution, sigma: f64, source: &mut Source) {
        self.data
            .iter_mut()
            .for_each(|x| *x = dist.sample_i64(sigma, source));
        self.dist = dist;
    }

    pub fn n(&self) -> usize {
        self.data.len()
    }

    pub fn dist(&self) -> SecretDistribution {
        self.dist
    }

    pub fn coeffs(&self) -> &[i64] {
        &self.data
    }

    /// True if every coefficient lies in `{-1, 0, 1}`.
    pub fn is_ternary(&self) -> bool {
        self.data.iter().all(|x| x.abs() <= 1)
    }

    /// Coefficient-wise sum, the joint secret of a set of parties.
    pub fn sum(keys: &[LWESecret]) -> Option<LWESecret> {
        let first: &LWESecret = keys.first()?;
        let mut data: Vec<i64> = vec![0; first.n()];
        for key in keys {
            if key.n() != first.n() {
                return None;
            }
            data.iter_mut().zip(key.data.iter()).for_each(|(d, x)| *d += x);
        }
        Some(LWESecret {
            data,
            dist: first.dist,
        })
    }

    /// `<a, s> mod q`.
    pub(crate) fn dot(&self, a: &[u64], q: &Modulus) -> u64 {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.len(), self.n());
        }
        let acc: i128 = a
            .iter()
            .zip(self.data.iter())
            .map(|(a, s)| *a as i128 * *s as i128)
            .sum();
        q.from_i128(acc)
    }
}
