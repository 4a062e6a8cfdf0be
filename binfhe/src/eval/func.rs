use backend::Modulus;
use binfhe_core::LWECiphertext;
use tracing::trace;

use crate::{
    context::BinFheContext,
    error::{Error, Result},
    keys::BootstrapKey,
    params::{BETA, LWEParams},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LutClass {
    /// `LUT[x + q/2] = -LUT[x]`
    Negacyclic,
    /// `LUT[x + q/2] = LUT[x]`
    Periodic,
    Arbitrary,
}

fn classify(lut: &[u64], q: u64) -> LutClass {
    let (lo, hi) = lut.split_at(lut.len() / 2);
    if lo.iter().zip(hi.iter()).all(|(x, y)| (x + y) % q == 0) {
        LutClass::Negacyclic
    } else if lo == hi {
        LutClass::Periodic
    } else {
        LutClass::Arbitrary
    }
}

fn log2(x: u64) -> u32 {
    x.trailing_zeros()
}

impl BinFheContext {
    /// Programmable bootstrap: returns an encryption of `lut[phase(ct)]` at `(n, q)`.
    ///
    /// `lut` has `q` entries in `Z_q`, see [`BinFheContext::generate_lut_via_function`].
    /// Negacyclic tables take one bootstrap, periodic and arbitrary ones take two;
    /// arbitrary tables require `q <= N`.
    pub fn eval_func(&self, ct: &LWECiphertext, lut: &[u64]) -> Result<LWECiphertext> {
        self.check_small(ct)?;
        let q: u64 = ct.modulus();
        if lut.len() as u64 != q {
            return Err(Error::LookupTableSize {
                expected: q as usize,
                found: lut.len(),
            });
        }
        let key: &BootstrapKey = self.keys.active()?;
        let big_q: u64 = self.params.lwe.big_q;
        let class: LutClass = classify(lut, q);
        trace!(?class, "eval_func");

        let to_ring = |x: u64| Modulus::scale(lut[x as usize] % q, q, big_q);

        match class {
            LutClass::Negacyclic => {
                let mut ct1: LWECiphertext = ct.clone();
                ct1.add_constant(BETA);
                Ok(self.bootstrap_fn(key, &ct1, q, to_ring))
            }
            LutClass::Periodic => {
                // Folds the phase into [0, q/2).
                let quarter: u64 = q >> 2;
                let mut ct1: LWECiphertext = ct.clone();
                ct1.add_constant(BETA);
                let ct2: LWECiphertext = self.bootstrap_fn(key, &ct1, q, |_| Modulus::scale(q - quarter, q, big_q));
                let mut ct3: LWECiphertext = ct.clone();
                ct3.sub_inplace(&ct2);
                ct3.add_constant(BETA);
                ct3.sub_constant(quarter);
                Ok(self.bootstrap_fn(key, &ct3, q, to_ring))
            }
            LutClass::Arbitrary => {
                let ring_dim: usize = self.params.lwe.ring_dim;
                if q > ring_dim as u64 {
                    return Err(Error::FunctionModulusTooLarge { q, ring_dim });
                }
                // Lifts to 2q and folds the phase into [0, q).
                let q2: u64 = q << 1;
                let half: u64 = q >> 1;
                let ct1: LWECiphertext = ct.lift(q2);
                let mut ct1_beta: LWECiphertext = ct1.clone();
                ct1_beta.add_constant(BETA);
                let ct2: LWECiphertext =
                    self.bootstrap_fn(key, &ct1_beta, q2, |_| Modulus::scale(q2 - half, q2, big_q));
                let mut ct3: LWECiphertext = ct1;
                ct3.sub_inplace(&ct2);
                ct3.add_constant(BETA);
                ct3.sub_constant(half);
                Ok(self.bootstrap_fn(key, &ct3, q, to_ring))
            }
        }
    }

    /// Table of `q` entries for `f: Z_p -> Z_p`: entry `x` is `f(min(x / (q/p), p - 1), p) * q/p`.
    pub fn generate_lut_via_function<F: Fn(u64, u64) -> u64>(&self, f: F, p: u64) -> Result<Vec<u64>> {
        let q: u64 = self.params.lwe.q;
        if !p.is_power_of_two() || p > q {
            return Err(Error::InvalidModulus(p));
        }
        let interval: u64 = q / p;
        let mut outputs: Vec<u64> = Vec::with_capacity(p as usize);
        for input in 0..p {
            let output: u64 = f(input, p);
            if output >= p {
                return Err(Error::FunctionRangeError {
                    input,
                    output,
                    modulus: p,
                });
            }
            outputs.push(output * interval);
        }
        // The tail left over when p does not divide q repeats the last sample.
        Ok((0..q)
            .map(|i| outputs[(i / interval).min(p - 1) as usize])
            .collect())
    }

    /// Ciphertexts at `(n, M)` with `M` a power of two in `[min, min(Q, qKS)]`.
    fn check_precision(&self, ct: &LWECiphertext, min: u64) -> Result<()> {
        let lwe: &LWEParams = &self.params.lwe;
        let max: u64 = lwe.big_q.min(lwe.q_ks);
        let m: u64 = ct.modulus();
        if ct.n() != lwe.n {
            return Err(Error::DimensionMismatch {
                expected_n: lwe.n,
                expected_modulus: m,
                found_n: ct.n(),
                found_modulus: m,
            });
        }
        if lwe.q < 4 * BETA {
            return Err(Error::PrecisionOutOfRange {
                modulus: lwe.q,
                min: 4 * BETA,
                max,
            });
        }
        if !m.is_power_of_two() || m < min || m > max {
            return Err(Error::PrecisionOutOfRange { modulus: m, min, max });
        }
        Ok(())
    }

    /// Phase `q_s * floor((phase + beta) / q_s)` at the modulus of `ct`.
    fn floor_with(&self, key: &BootstrapKey, ct: &LWECiphertext, q_s: u64) -> LWECiphertext {
        let m: u64 = ct.modulus();
        let big_q: u64 = self.params.lwe.big_q;
        let quarter: u64 = q_s >> 2;
        let half: u64 = q_s >> 1;

        let mut ct1: LWECiphertext = ct.clone();
        ct1.add_constant(BETA);

        // -q_s/4 below q_s/2, +q_s/4 above: moves the residue into [q_s/4, 3q_s/4).
        let ct2: LWECiphertext = self.bootstrap_fn(key, &ct1.reduce(q_s), m, |_| Modulus::scale(m - quarter, m, big_q));
        ct1.sub_inplace(&ct2);

        // Residue itself, read through the negacyclic wrap on [q_s/2, 3q_s/4).
        let ct3: LWECiphertext = self.bootstrap_fn(key, &ct1.reduce(q_s), m, |x| {
            let v: u64 = if x < quarter { m - half - x } else { x };
            Modulus::scale(v, m, big_q)
        });
        ct1.sub_inplace(&ct3);
        ct1
    }

    /// Clears the low bits of the phase of `ct` at a power-of-two modulus `M` with `q <= M`.
    ///
    /// `roundbits = 0` floors to multiples of `q`; `roundbits` in `[1, log2(q / 2beta)]`
    /// floors to multiples of `2beta * 2^roundbits`. The result stays at `M`.
    pub fn eval_floor(&self, ct: &LWECiphertext, roundbits: u32) -> Result<LWECiphertext> {
        let q: u64 = self.params.lwe.q;
        self.check_precision(ct, q)?;
        let max: u32 = log2(self.params.max_plaintext_space());
        if roundbits > max {
            return Err(Error::InvalidRoundBits { roundbits, max });
        }
        let q_s: u64 = if roundbits == 0 {
            q
        } else {
            (2 * BETA) << roundbits
        };
        trace!(modulus = ct.modulus(), q_s, "eval_floor");
        Ok(self.floor_with(self.keys.active()?, ct, q_s))
    }

    /// Encrypts 1 if the phase of `ct` lies in the upper half of `Z_M`, decryptable with `p = 2`.
    ///
    /// `M` must be a power of two with `q < M <= min(Q, qKS)`. Each round floors to a multiple
    /// of `q` and switches `M` to `M * 2beta / q`, using the key of the base preferred for `M`
    /// when the store holds it.
    pub fn eval_sign(&self, ct: &LWECiphertext) -> Result<LWECiphertext> {
        let q: u64 = self.params.lwe.q;
        self.check_precision(ct, q << 1)?;
        let mut m: u64 = ct.modulus();
        let mut cur: LWECiphertext = ct.clone();
        while m > q {
            let key: &BootstrapKey = self.keys.for_precision(log2(m))?;
            trace!(modulus = m, base = key.base_g, "eval_sign round");
            cur = self.floor_with(key, &cur, q);
            m = m / q * 2 * BETA;
            cur = cur.mod_switch(m);
        }
        cur.add_constant(BETA);
        let key: &BootstrapKey = self.keys.for_precision(log2(m))?;
        let quarter: u64 = self.params.lwe.big_q >> 2;
        let mut res: LWECiphertext = self.bootstrap_fn(key, &cur, q, |_| quarter);
        res.sub_constant(q >> 2);
        Ok(res)
    }

    /// Digits of the phase of `ct` in base `q / 2beta`, least significant first.
    ///
    /// Every digit but the last is at `(n, q)`; the last keeps the modulus `M_f <= q` reached
    /// after the final round and decrypts with `p = M_f / 2beta`.
    pub fn eval_decomp(&self, ct: &LWECiphertext) -> Result<Vec<LWECiphertext>> {
        let q: u64 = self.params.lwe.q;
        self.check_precision(ct, q << 1)?;
        let mut m: u64 = ct.modulus();
        let mut cur: LWECiphertext = ct.clone();
        let mut digits: Vec<LWECiphertext> = Vec::new();
        while m > q {
            digits.push(cur.reduce(q));
            let key: &BootstrapKey = self.keys.for_precision(log2(m))?;
            trace!(modulus = m, base = key.base_g, "eval_decomp round");
            cur = self.floor_with(key, &cur, q);
            m = m / q * 2 * BETA;
            cur = cur.mod_switch(m);
        }
        digits.push(cur);
        Ok(digits)
    }
}
