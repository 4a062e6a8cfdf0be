use backend::{Modulus, sampling::FillUniform};
use sampling::{distributions::DiscreteGaussian, source::Source};

use crate::{LWECiphertext, LWESecret};

/// Key-switching key from a secret `z` of dimension `n_in` to a secret `s` of dimension `n_out`.
///
/// Entry `(i, j, v)` for `v` in `[1, base)` is `LWE_s(v * z_i * base^j)`; digits are unsigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LWESwitchingKey {
    pub(crate) data: Vec<u64>,
    pub(crate) base: u64,
    pub(crate) digits: usize,
    pub(crate) n_in: usize,
    pub(crate) n_out: usize,
    pub(crate) modulus: u64,
}

impl LWESwitchingKey {
    pub fn alloc(n_in: usize, n_out: usize, base: u64, modulus: u64) -> Self {
        let mut digits: usize = 0;
        let mut pow: u128 = 1;
        while pow < modulus as u128 {
            pow *= base as u128;
            digits += 1;
        }
        Self {
            data: vec![0; n_in * digits * (base as usize - 1) * (n_out + 1)],
            base,
            digits,
            n_in,
            n_out,
            modulus,
        }
    }

    pub fn n_in(&self) -> usize {
        self.n_in
    }

    pub fn n_out(&self) -> usize {
        self.n_out
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    #[inline(always)]
    fn offset(&self, i: usize, j: usize, v: u64) -> usize {
        ((i * self.digits + j) * (self.base as usize - 1) + (v as usize - 1)) * (self.n_out + 1)
    }

    pub fn generate(
        sk_in: &LWESecret,
        sk_out: &LWESecret,
        base: u64,
        modulus: u64,
        source_xa: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) -> Self {
        let mut ksk: LWESwitchingKey = LWESwitchingKey::alloc(sk_in.n(), sk_out.n(), base, modulus);
        let q: Modulus = Modulus::new(modulus);
        let stride: usize = ksk.n_out + 1;
        ksk.data.chunks_exact_mut(stride).for_each(|entry| {
            entry[1..].fill_uniform(&q, source_xa);
        });
        ksk.accumulate_share(sk_in, sk_out, source_xe, sigma);
        ksk
    }

    /// Adds `<a, s_j> + v * z_j[i] * base^j + e` to every entry, keeping the uniform parts.
    /// The sum over all parties is a key from the joint `z` to the joint `s`.
    pub fn accumulate_share(&mut self, sk_in: &LWESecret, sk_out: &LWESecret, source_xe: &mut Source, sigma: f64) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(sk_in.n(), self.n_in);
            assert_eq!(sk_out.n(), self.n_out);
        }
        let q: Modulus = Modulus::new(self.modulus);
        let dist: DiscreteGaussian = DiscreteGaussian::new(sigma);
        let base: u64 = self.base;
        let stride: usize = self.n_out + 1;
        let mut entries = self.data.chunks_exact_mut(stride);
        for i in 0..self.n_in {
            let z_i: i64 = sk_in.data[i];
            let mut pow: u64 = 1;
            for _ in 0..self.digits {
                for v in 1..base {
                    let Some(entry) = entries.next() else {
                        return;
                    };
                    let msg: u64 = q.from_i128(v as i128 * z_i as i128 * pow as i128);
                    let mut b: u64 = q.add(entry[0], sk_out.dot(&entry[1..], &q));
                    b = q.add(b, msg);
                    b = q.add(b, q.from_i64(dist.sample_i64(source_xe)));
                    entry[0] = b;
                }
                pow = q.mul(pow, base % self.modulus);
            }
        }
    }

    /// Switches a ciphertext under `z` (at the key's modulus) to one under `s`.
    pub fn keyswitch(&self, ct: &LWECiphertext) -> LWECiphertext {
        #[cfg(debug_assertions)]
        {
            assert_eq!(ct.n(), self.n_in);
            assert_eq!(ct.modulus(), self.modulus);
        }
        let q: Modulus = Modulus::new(self.modulus);
        let mut a: Vec<u64> = vec![0; self.n_out];
        let mut b: u64 = 0;
        ct.a.iter().enumerate().for_each(|(i, x)| {
            let mut x: u64 = *x;
            (0..self.digits).for_each(|j| {
                let v: u64 = x % self.base;
                x /= self.base;
                if v != 0 {
                    let offset: usize = self.offset(i, j, v);
                    let entry: &[u64] = &self.data[offset..offset + self.n_out + 1];
                    b = q.add(b, entry[0]);
                    a.iter_mut()
                        .zip(entry[1..].iter())
                        .for_each(|(acc, y)| *acc = q.add(*acc, *y));
                }
            });
        });
        a.iter_mut().for_each(|x| *x = q.neg(*x));
        LWECiphertext {
            a,
            b: q.sub(ct.b, b),
            modulus: self.modulus,
        }
    }
}
