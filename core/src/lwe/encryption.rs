use backend::{
    Modulus,
    sampling::{AddNormal, FillUniform},
};
use sampling::{distributions::DiscreteGaussian, source::Source};

use crate::{LWECiphertext, LWEPublicKey, LWESecret};

impl LWECiphertext {
    /// Encrypts `m mod p` as `b = <a, s> + round(m * modulus / p) + e`.
    pub fn encrypt_sk(
        &mut self,
        sk: &LWESecret,
        m: u64,
        p: u64,
        source_xa: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.n(), sk.n());
            assert!(p > 0 && p <= self.modulus);
        }
        let q: Modulus = Modulus::new(self.modulus);
        self.a.fill_uniform(&q, source_xa);
        let e: i64 = DiscreteGaussian::new(sigma).sample_i64(source_xe);
        let mut b: u64 = q.add(sk.dot(&self.a, &q), Modulus::scale(m % p, p, self.modulus));
        b = q.add(b, q.from_i64(e));
        self.b = b;
    }

    /// Encrypts `m mod p` under a public key: `a = A^T r + e_a`, `b = <v, r> + round(m * modulus / p) + e_b`
    /// for a fresh ternary `r`.
    pub fn encrypt_pk(
        &mut self,
        pk: &LWEPublicKey,
        m: u64,
        p: u64,
        source_xr: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.n(), pk.n());
            assert_eq!(self.modulus, pk.modulus());
        }
        let q: Modulus = Modulus::new(self.modulus);
        let n: usize = pk.n();
        self.a.iter_mut().for_each(|x| *x = 0);
        self.a.add_normal(&q, source_xe, sigma);
        let mut b: u64 = q.from_i64(DiscreteGaussian::new(sigma).sample_i64(source_xe));
        (0..n).for_each(|i| {
            let r: i64 = source_xr.next_ternary();
            if r == 0 {
                return;
            }
            let row: &[u64] = &pk.a[i * n..(i + 1) * n];
            if r == 1 {
                self.a.iter_mut().zip(row).for_each(|(x, y)| *x = q.add(*x, *y));
                b = q.add(b, pk.v[i]);
            } else {
                self.a.iter_mut().zip(row).for_each(|(x, y)| *x = q.sub(*x, *y));
                b = q.sub(b, pk.v[i]);
            }
        });
        self.b = q.add(b, Modulus::scale(m % p, p, self.modulus));
    }
}
