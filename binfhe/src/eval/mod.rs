//! Gate bootstrapping and programmable bootstrapping over small ciphertexts.

mod func;

use backend::Modulus;
use binfhe_core::{LWECiphertext, LookUpTable, functional_bootstrap};
use tracing::trace;

use crate::{
    context::BinFheContext,
    error::{Error, Result},
    keys::BootstrapKey,
    params::LWEParams,
};

/// Two-input Boolean gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinGate {
    Or,
    And,
    Nor,
    Nand,
    Xor,
    Xnor,
}

impl BinGate {
    /// Start of the half of `Z_q` mapped to 1.
    fn region_start(&self, q: u64) -> u64 {
        match self {
            BinGate::Or => q >> 3,
            BinGate::And => 3 * (q >> 3),
            BinGate::Nor => 5 * (q >> 3),
            BinGate::Nand => 7 * (q >> 3),
            BinGate::Xor => q >> 2,
            BinGate::Xnor => 3 * (q >> 2),
        }
    }
}

impl BinFheContext {
    pub(crate) fn check_small(&self, ct: &LWECiphertext) -> Result<()> {
        let lwe: &LWEParams = &self.params.lwe;
        if ct.n() != lwe.n || ct.modulus() != lwe.q {
            return Err(Error::DimensionMismatch {
                expected_n: lwe.n,
                expected_modulus: lwe.q,
                found_n: ct.n(),
                found_modulus: ct.modulus(),
            });
        }
        Ok(())
    }

    /// Bootstraps `ct` through `f`, tabulated on `[0, modulus(ct) / 2)` with values in `Z_Q`,
    /// and returns the result at `q_out`.
    pub(crate) fn bootstrap_fn<F: Fn(u64) -> u64>(
        &self,
        key: &BootstrapKey,
        ct: &LWECiphertext,
        q_out: u64,
        f: F,
    ) -> LWECiphertext {
        let lut: LookUpTable = LookUpTable::from_fn(&self.module, ct.modulus(), f);
        functional_bootstrap(&self.module, &key.brk, &key.ksk, ct, &lut, 0, q_out)
    }

    /// Sign bootstrap: `+Q/8` on `[c, c + q/2)`, `-Q/8` elsewhere, then `Q/8` added after extraction.
    fn gate_bootstrap(&self, ct: &LWECiphertext, c: u64) -> Result<LWECiphertext> {
        let key: &BootstrapKey = self.keys.active()?;
        let q: u64 = ct.modulus();
        let big_q: u64 = self.params.lwe.big_q;
        let eighth: u64 = big_q >> 3;
        let lut: LookUpTable = LookUpTable::from_fn(&self.module, q, |x| {
            if (x + q - c) % q < q >> 1 {
                eighth
            } else {
                big_q - eighth
            }
        });
        Ok(functional_bootstrap(
            &self.module,
            &key.brk,
            &key.ksk,
            ct,
            &lut,
            eighth,
            q,
        ))
    }

    /// Evaluates `gate` on two encrypted bits and bootstraps the result.
    pub fn eval_bin_gate(&self, gate: BinGate, ct1: &LWECiphertext, ct2: &LWECiphertext) -> Result<LWECiphertext> {
        self.check_small(ct1)?;
        self.check_small(ct2)?;
        trace!(?gate, "binary gate");
        let mut acc: LWECiphertext = ct1.clone();
        acc.add_inplace(ct2);
        if matches!(gate, BinGate::Xor | BinGate::Xnor) {
            acc.mul_scalar_inplace(2);
        }
        self.gate_bootstrap(&acc, gate.region_start(ct1.modulus()))
    }

    /// Majority of three encrypted bits.
    pub fn eval_majority(&self, ct1: &LWECiphertext, ct2: &LWECiphertext, ct3: &LWECiphertext) -> Result<LWECiphertext> {
        self.check_small(ct1)?;
        self.check_small(ct2)?;
        self.check_small(ct3)?;
        trace!("majority gate");
        let mut acc: LWECiphertext = ct1.clone();
        acc.add_inplace(ct2);
        acc.add_inplace(ct3);
        self.gate_bootstrap(&acc, BinGate::And.region_start(ct1.modulus()))
    }

    /// Refreshes an encrypted bit.
    pub fn bootstrap(&self, ct: &LWECiphertext) -> Result<LWECiphertext> {
        self.check_small(ct)?;
        trace!("bootstrap");
        let q: u64 = ct.modulus();
        let mut acc: LWECiphertext = ct.clone();
        acc.add_constant(q >> 2);
        self.gate_bootstrap(&acc, BinGate::And.region_start(q))
    }

    /// `(-a, q/4 - b)`. Linear, no bootstrap.
    pub fn eval_not(&self, ct: &LWECiphertext) -> LWECiphertext {
        let mut res: LWECiphertext = ct.clone();
        res.negate_inplace();
        res.add_constant(ct.modulus() >> 2);
        res
    }

    /// Noiseless encryption of `bit` at `(n, q)`.
    pub fn eval_constant(&self, bit: bool) -> LWECiphertext {
        let q: u64 = self.params.lwe.q;
        LWECiphertext::from_parts(
            vec![0; self.params.lwe.n],
            Modulus::scale(bit as u64, 4, q),
            q,
        )
    }
}
