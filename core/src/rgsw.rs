use backend::{
    Decomposer, Module, Modulus,
    sampling::{AddNormal, FillTernary, FillUniform},
};
use itertools::izip;
use sampling::source::Source;

use crate::{RLWECiphertext, RLWESecret};

/// RGSW ciphertext with `2d` rows in the NTT domain.
///
/// Row `l < d` is `(A_l + m B^l, A_l z + E_l)`, row `d + l` is `(A_{d+l}, A_{d+l} z + E_{d+l} + m B^l)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RGSWCiphertext {
    pub(crate) a: Vec<Vec<u64>>,
    pub(crate) b: Vec<Vec<u64>>,
}

/// Public uniform polynomials shared by all parties, one per RGSW row, in the NTT domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonReference {
    pub(crate) a: Vec<Vec<u64>>,
}

impl CommonReference {
    pub fn generate(module: &Module, digits: usize, source_xa: &mut Source) -> Self {
        let q: &Modulus = module.modulus();
        let a: Vec<Vec<u64>> = (0..2 * digits)
            .map(|_| {
                let mut poly: Vec<u64> = module.new_poly();
                poly.fill_uniform(q, source_xa);
                poly
            })
            .collect();
        Self { a }
    }

    pub fn rows(&self) -> usize {
        self.a.len()
    }
}

impl RGSWCiphertext {
    pub fn alloc(n: usize, digits: usize) -> Self {
        Self {
            a: vec![vec![0; n]; 2 * digits],
            b: vec![vec![0; n]; 2 * digits],
        }
    }

    pub fn digits(&self) -> usize {
        self.a.len() >> 1
    }

    pub fn encrypt_sk(
        &mut self,
        module: &Module,
        dec: &Decomposer,
        sk: &RLWESecret,
        m: i64,
        source_xa: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        let q: &Modulus = module.modulus();
        let mut e: Vec<u64> = module.new_poly();
        (0..self.a.len()).for_each(|l| {
            self.a[l].fill_uniform(q, source_xa);
            e.iter_mut().for_each(|x| *x = 0);
            e.add_normal(q, source_xe, sigma);
            module.forward(&mut e);
            module.mul_ntt(&mut self.b[l], &self.a[l], &sk.ntt);
            module.add_inplace(&mut self.b[l], &e);
        });
        self.add_gadget(module, dec, m);
    }

    /// Rerandomises the rows of an RGSW encryption of zero: row `l` becomes
    /// `u (A_l, B_l) + (e', e'') + m G_l` for a fresh ternary `u`.
    pub fn encrypt_pk(
        &mut self,
        module: &Module,
        dec: &Decomposer,
        pk: &RGSWCiphertext,
        m: i64,
        source_xu: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(pk.a.len(), self.a.len());
        }
        let q: &Modulus = module.modulus();
        let mut u: Vec<u64> = module.new_poly();
        let mut e: Vec<u64> = module.new_poly();
        (0..self.a.len()).for_each(|l| {
            u.fill_ternary(q, source_xu);
            module.forward(&mut u);

            module.mul_ntt(&mut self.a[l], &u, &pk.a[l]);
            e.iter_mut().for_each(|x| *x = 0);
            e.add_normal(q, source_xe, sigma);
            module.forward(&mut e);
            module.add_inplace(&mut self.a[l], &e);

            module.mul_ntt(&mut self.b[l], &u, &pk.b[l]);
            e.iter_mut().for_each(|x| *x = 0);
            e.add_normal(q, source_xe, sigma);
            module.forward(&mut e);
            module.add_inplace(&mut self.b[l], &e);
        });
        self.add_gadget(module, dec, m);
    }

    /// One party's share of an RGSW encryption under the joint secret: rows
    /// `(lead ? a_l : 0, a_l z_j + e)`, plus `m G` from the lead only.
    pub fn encrypt_share(
        &mut self,
        module: &Module,
        dec: &Decomposer,
        acrs: &CommonReference,
        sk: &RLWESecret,
        m: i64,
        lead: bool,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(acrs.rows(), self.a.len());
        }
        let q: &Modulus = module.modulus();
        let mut e: Vec<u64> = module.new_poly();
        (0..self.a.len()).for_each(|l| {
            if lead {
                self.a[l].copy_from_slice(&acrs.a[l]);
            } else {
                self.a[l].iter_mut().for_each(|x| *x = 0);
            }
            e.iter_mut().for_each(|x| *x = 0);
            e.add_normal(q, source_xe, sigma);
            module.forward(&mut e);
            module.mul_ntt(&mut self.b[l], &acrs.a[l], &sk.ntt);
            module.add_inplace(&mut self.b[l], &e);
        });
        if lead {
            self.add_gadget(module, dec, m);
        }
    }

    fn add_gadget(&mut self, module: &Module, dec: &Decomposer, m: i64) {
        let q: &Modulus = module.modulus();
        let d: usize = self.digits();
        let m: u64 = q.from_i64(m);
        dec.gadget().iter().enumerate().for_each(|(l, g)| {
            let mg: u64 = q.mul(m, *g);
            module.add_scalar_ntt_inplace(&mut self.a[l], mg);
            module.add_scalar_ntt_inplace(&mut self.b[d + l], mg);
        });
    }

    pub fn add_inplace(&mut self, module: &Module, other: &RGSWCiphertext) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.a.len(), other.a.len());
        }
        izip!(self.a.iter_mut(), self.b.iter_mut(), other.a.iter(), other.b.iter()).for_each(|(a, b, oa, ob)| {
            module.add_inplace(a, oa);
            module.add_inplace(b, ob);
        });
    }

    /// Recovers a small message from the last row, `round((B - A z) / B^(d-1))`.
    pub fn decrypt(&self, module: &Module, dec: &Decomposer, sk: &RLWESecret) -> i64 {
        let q: &Modulus = module.modulus();
        let last: usize = self.a.len() - 1;
        let mut az: Vec<u64> = module.new_poly();
        module.mul_ntt(&mut az, &self.a[last], &sk.ntt);
        let mut phase: Vec<u64> = self.b[last].clone();
        module.sub_inplace(&mut phase, &az);
        module.backward(&mut phase);
        let g: i64 = dec.gadget()[self.digits() - 1] as i64;
        let c: i64 = q.center(phase[0]);
        (c + c.signum() * (g >> 1)) / g
    }

    /// Accumulates `sum_l digits_a[l] * row_l + digits_b[l] * row_(d+l)` into `(res_a, res_b)`.
    /// All operands are in the NTT domain.
    pub fn external_product_ntt(
        &self,
        module: &Module,
        digits_a: &[Vec<u64>],
        digits_b: &[Vec<u64>],
        res_a: &mut [u64],
        res_b: &mut [u64],
    ) {
        let d: usize = self.digits();
        (0..d).for_each(|l| {
            module.mul_add_ntt(res_a, &digits_a[l], &self.a[l]);
            module.mul_add_ntt(res_b, &digits_a[l], &self.b[l]);
            module.mul_add_ntt(res_a, &digits_b[l], &self.a[d + l]);
            module.mul_add_ntt(res_b, &digits_b[l], &self.b[d + l]);
        });
    }

    /// `RGSW(m) x RLWE(M) -> RLWE(m M)`.
    pub fn external_product(&self, module: &Module, dec: &Decomposer, ct: &RLWECiphertext) -> RLWECiphertext {
        let n: usize = module.n();
        let d: usize = self.digits();
        let mut digits_a: Vec<Vec<u64>> = vec![vec![0; n]; d];
        let mut digits_b: Vec<Vec<u64>> = vec![vec![0; n]; d];
        dec.decompose(&ct.a, &mut digits_a);
        dec.decompose(&ct.b, &mut digits_b);
        digits_a.iter_mut().for_each(|x| module.forward(x));
        digits_b.iter_mut().for_each(|x| module.forward(x));
        let mut res: RLWECiphertext = RLWECiphertext::alloc(n);
        self.external_product_ntt(module, &digits_a, &digits_b, &mut res.a, &mut res.b);
        module.backward(&mut res.a);
        module.backward(&mut res.b);
        res
    }
}

#[cfg(test)]
mod tests {
    use backend::{
        Decomposer, Module,
        prime::{first_prime, previous_prime},
    };
    use sampling::{distributions::SecretDistribution, source::Source};

    use super::{CommonReference, RGSWCiphertext};
    use crate::{LWESecret, RLWECiphertext, RLWESecret};

    struct Setup {
        module: Module,
        dec: Decomposer,
        q: u64,
    }

    fn setup(n: usize, log_base: usize) -> Setup {
        let q: u64 = previous_prime(first_prime(27, 2 * n as u64), 2 * n as u64);
        Setup {
            module: Module::new(n, q),
            dec: Decomposer::new(q, log_base),
            q,
        }
    }

    fn secret(module: &Module, source: &mut Source) -> RLWESecret {
        let sk: LWESecret = LWESecret::generate(module.n(), SecretDistribution::UniformTernary, 3.19, source);
        RLWESecret::from_lwe(module, &sk)
    }

    #[test]
    fn external_product_scales_message() {
        let s: Setup = setup(256, 7);
        let n: usize = 256;
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: RLWESecret = secret(&s.module, &mut source_xs);

        let delta: u64 = s.q / 16;
        let mut m: Vec<u64> = vec![0; n];
        (0..n).for_each(|i| m[i] = (i as u64 % 4) * delta);
        let mut ct: RLWECiphertext = RLWECiphertext::alloc(n);
        ct.encrypt_sk(&s.module, &sk, &m, &mut source_xa, &mut source_xe, 3.19);

        for msg in [0i64, 1, -1] {
            let mut rgsw: RGSWCiphertext = RGSWCiphertext::alloc(n, s.dec.digits());
            rgsw.encrypt_sk(&s.module, &s.dec, &sk, msg, &mut source_xa, &mut source_xe, 3.19);
            assert_eq!(rgsw.decrypt(&s.module, &s.dec, &sk), msg);

            let res: RLWECiphertext = rgsw.external_product(&s.module, &s.dec, &ct);
            let phase: Vec<u64> = res.phase(&s.module, &sk);
            (0..n).for_each(|i| {
                let want: u64 = ((msg + 16) as u64 * (i as u64 % 4)) % 16;
                let have: u64 = ((phase[i] as u128 * 16 + (s.q as u128 >> 1)) / s.q as u128) as u64 % 16;
                assert_eq!(have, want, "msg={} i={}", msg, i);
            });
        }
    }

    #[test]
    fn shares_and_public_key_encryption() {
        let s: Setup = setup(256, 5);
        let n: usize = 256;
        let mut source_xs: Source = Source::new([3u8; 32]);
        let mut source_xa: Source = Source::new([4u8; 32]);
        let mut source_xe: Source = Source::new([5u8; 32]);

        let sk_0: LWESecret = LWESecret::generate(n, SecretDistribution::UniformTernary, 3.19, &mut source_xs);
        let sk_1: LWESecret = LWESecret::generate(n, SecretDistribution::UniformTernary, 3.19, &mut source_xs);
        let z_0: RLWESecret = RLWESecret::from_lwe(&s.module, &sk_0);
        let z_1: RLWESecret = RLWESecret::from_lwe(&s.module, &sk_1);
        let joint: RLWESecret = RLWESecret::from_lwe(
            &s.module,
            &LWESecret::sum(&[sk_0.clone(), sk_1.clone()]).unwrap(),
        );

        let acrs: CommonReference = CommonReference::generate(&s.module, s.dec.digits(), &mut source_xa);
        let mut zero: RGSWCiphertext = RGSWCiphertext::alloc(n, s.dec.digits());
        zero.encrypt_share(&s.module, &s.dec, &acrs, &z_0, 0, true, &mut source_xe, 3.19);
        let mut share: RGSWCiphertext = RGSWCiphertext::alloc(n, s.dec.digits());
        share.encrypt_share(&s.module, &s.dec, &acrs, &z_1, 0, false, &mut source_xe, 3.19);
        zero.add_inplace(&s.module, &share);
        assert_eq!(zero.decrypt(&s.module, &s.dec, &joint), 0);

        let mut one: RGSWCiphertext = RGSWCiphertext::alloc(n, s.dec.digits());
        one.encrypt_pk(&s.module, &s.dec, &zero, 1, &mut source_xa, &mut source_xe, 3.19);
        assert_eq!(one.decrypt(&s.module, &s.dec, &joint), 1);
    }
}
