use backend::{
    Modulus,
    sampling::{AddNormal, FillUniform},
};
use sampling::source::Source;

use crate::LWESecret;

/// LWE public key `(A, v = A z + e)` with `A` an `n x n` uniform matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LWEPublicKey {
    pub(crate) a: Vec<u64>,
    pub(crate) v: Vec<u64>,
    pub(crate) modulus: u64,
}

impl LWEPublicKey {
    pub fn alloc(n: usize, modulus: u64) -> Self {
        Self {
            a: vec![0; n * n],
            v: vec![0; n],
            modulus,
        }
    }

    pub fn n(&self) -> usize {
        self.v.len()
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn generate(sk: &LWESecret, modulus: u64, source_xa: &mut Source, source_xe: &mut Source, sigma: f64) -> Self {
        let mut pk: LWEPublicKey = LWEPublicKey::alloc(sk.n(), modulus);
        let q: Modulus = Modulus::new(modulus);
        pk.a.fill_uniform(&q, source_xa);
        pk.accumulate_share(sk, source_xe, sigma);
        pk
    }

    /// Adds `A z_j + e_j` to `v`, keeping `A`. Used by every party after the one that sampled `A`.
    pub fn accumulate_share(&mut self, sk: &LWESecret, source_xe: &mut Source, sigma: f64) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(sk.n(), self.n());
        }
        let q: Modulus = Modulus::new(self.modulus);
        let n: usize = self.n();
        let mut contrib: Vec<u64> = (0..n)
            .map(|i| sk.dot(&self.a[i * n..(i + 1) * n], &q))
            .collect();
        contrib.add_normal(&q, source_xe, sigma);
        self.v
            .iter_mut()
            .zip(contrib.iter())
            .for_each(|(v, c)| *v = q.add(*v, *c));
    }
}
