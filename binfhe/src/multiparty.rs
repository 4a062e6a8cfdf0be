//! Threshold key generation and decryption.
//!
//! Every party holds a small secret `s_j` and a large secret `z_j`; the joint secrets are
//! the sums. The lead party starts each accumulated object and the others add their shares.

use backend::{Decomposer, Modulus};
use binfhe_core::{
    BlindRotationKeyCGGI, CommonReference, LWECiphertext, LWEPublicKey, LWESecret, LWESwitchingKey,
    RGSWCiphertext, RLWESecret,
};
use sampling::{distributions::DiscreteGaussian, source::Source};
use tracing::info;

use crate::{
    context::{BinFheContext, check_plaintext_modulus},
    error::{Error, Result},
    keys::LWEKeyPair,
};

/// One party's partial decryption of a ciphertext.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecryptionShare {
    pub value: u64,
    pub modulus: u64,
    pub lead: bool,
}

impl BinFheContext {
    /// Key pair of the joint secret `sum(secrets)`.
    pub fn multiparty_key_gen(&mut self, secrets: &[LWESecret]) -> Result<LWEKeyPair> {
        let joint: LWESecret = LWESecret::sum(secrets).ok_or_else(|| match secrets.first() {
            None => Error::IncompleteShares {
                expected: self.params.num_parties,
                received: 0,
                leads: 0,
            },
            Some(first) => {
                let other: &LWESecret = secrets
                    .iter()
                    .find(|sk| sk.n() != first.n())
                    .unwrap_or(first);
                Error::DimensionMismatch {
                    expected_n: first.n(),
                    expected_modulus: self.params.lwe.big_q,
                    found_n: other.n(),
                    found_modulus: self.params.lwe.big_q,
                }
            }
        })?;
        let public: LWEPublicKey = self.pub_key_gen(&joint);
        Ok(LWEKeyPair { secret: joint, public })
    }

    /// Lead (`prev = None`) samples `A` and publishes `A z_j + e`; followers add `A z_j + e` to `prev`.
    pub fn multiparty_pub_key_gen(&mut self, z_j: &LWESecret, prev: Option<&LWEPublicKey>) -> LWEPublicKey {
        match prev {
            None => self.pub_key_gen(z_j),
            Some(prev) => {
                let mut pk: LWEPublicKey = prev.clone();
                pk.accumulate_share(z_j, &mut self.source, self.params.lwe.sigma);
                pk
            }
        }
    }

    /// Key-switching key share from `z_j` to `s_j`; followers reuse the uniform parts of `prev`.
    pub fn multiparty_key_switch_gen(
        &mut self,
        s_j: &LWESecret,
        z_j: &LWESecret,
        prev: Option<&LWESwitchingKey>,
    ) -> LWESwitchingKey {
        match prev {
            None => self.key_switch_gen(s_j, z_j),
            Some(prev) => {
                let mut ksk: LWESwitchingKey = prev.clone();
                ksk.accumulate_share(z_j, s_j, &mut self.source, self.params.lwe.sigma);
                ksk
            }
        }
    }

    /// Common reference string for the RGSW shares.
    pub fn generate_acrs(&mut self) -> CommonReference {
        let digits: usize = self.params.rgsw.decomposer().digits();
        CommonReference::generate(&self.module, digits, &mut self.source)
    }

    /// Party share of `RGSW(m)` under the joint large secret.
    pub fn rgsw_encrypt(&mut self, acrs: &CommonReference, z_j: &LWESecret, m: i64, lead: bool) -> RGSWCiphertext {
        let sk: RLWESecret = RLWESecret::from_lwe(&self.module, z_j);
        let dec: Decomposer = self.params.rgsw.decomposer();
        let mut ct: RGSWCiphertext = RGSWCiphertext::alloc(self.module.n(), dec.digits());
        ct.encrypt_share(
            &self.module,
            &dec,
            acrs,
            &sk,
            m,
            lead,
            &mut self.source,
            self.params.rgsw.sigma,
        );
        ct
    }

    pub fn rgsw_eval_add(&self, a: &RGSWCiphertext, b: &RGSWCiphertext) -> RGSWCiphertext {
        let mut res: RGSWCiphertext = a.clone();
        res.add_inplace(&self.module, b);
        res
    }

    pub fn rgsw_decrypt(&self, ct: &RGSWCiphertext, z: &LWESecret) -> i64 {
        let sk: RLWESecret = RLWESecret::from_lwe(&self.module, z);
        ct.decrypt(&self.module, &self.params.rgsw.decomposer(), &sk)
    }

    /// Appends the blocks of `s_j` to the joint refresh key, encrypted through `rgsw_zero`,
    /// the joint RGSW encryption of zero. The lead passes `prev = None`.
    pub fn multiparty_bt_key_gen(
        &mut self,
        s_j: &LWESecret,
        rgsw_zero: &RGSWCiphertext,
        prev: Option<&BlindRotationKeyCGGI>,
    ) -> Result<BlindRotationKeyCGGI> {
        if !s_j.is_ternary() {
            return Err(Error::UnsupportedSecretDistribution);
        }
        if s_j.n() != self.params.lwe.n {
            return Err(Error::DimensionMismatch {
                expected_n: self.params.lwe.n,
                expected_modulus: self.params.lwe.q,
                found_n: s_j.n(),
                found_modulus: self.params.lwe.q,
            });
        }
        let mut brk: BlindRotationKeyCGGI = match prev {
            None => BlindRotationKeyCGGI::alloc(self.params.lwe.n, self.params.rgsw.decomposer()),
            Some(prev) => prev.clone(),
        };
        info!(lead = prev.is_none(), blocks = brk.blocks() + 1, "multiparty bootstrapping key share");
        let mut source_xu: Source = self.source.branch();
        brk.append_block_pk(
            &self.module,
            rgsw_zero,
            s_j,
            &mut source_xu,
            &mut self.source,
            self.params.rgsw.sigma,
        );
        Ok(brk)
    }

    /// Installs the joint refresh key once every party has contributed its block.
    pub fn install_multiparty_key(&mut self, brk: BlindRotationKeyCGGI, ksk: LWESwitchingKey) -> Result<()> {
        if brk.blocks() != self.params.num_parties {
            return Err(Error::IncompleteShares {
                expected: self.params.num_parties,
                received: brk.blocks(),
                leads: 1,
            });
        }
        self.keys.install(brk, ksk);
        Ok(())
    }

    fn decrypt_share(&mut self, sk: &LWESecret, ct: &LWECiphertext, lead: bool) -> Result<DecryptionShare> {
        if sk.n() != ct.n() {
            return Err(Error::DimensionMismatch {
                expected_n: ct.n(),
                expected_modulus: ct.modulus(),
                found_n: sk.n(),
                found_modulus: ct.modulus(),
            });
        }
        let modulus: u64 = ct.modulus();
        let q: Modulus = Modulus::new(modulus);
        let phase: u64 = if lead {
            ct.phase(sk)
        } else {
            LWECiphertext::from_parts(ct.a().to_vec(), 0, modulus).phase(sk)
        };
        let e: i64 = DiscreteGaussian::new(self.params.lwe.sigma).sample_i64(&mut self.source);
        Ok(DecryptionShare {
            value: q.add(phase, q.from_i64(e)),
            modulus,
            lead,
        })
    }

    /// `b - <a, s_lead> + e`.
    pub fn multiparty_decrypt_lead(&mut self, s_lead: &LWESecret, ct: &LWECiphertext) -> Result<DecryptionShare> {
        self.decrypt_share(s_lead, ct, true)
    }

    /// `-<a, s_j> + e`.
    pub fn multiparty_decrypt_main(&mut self, s_j: &LWESecret, ct: &LWECiphertext) -> Result<DecryptionShare> {
        self.decrypt_share(s_j, ct, false)
    }

    /// Sums the shares of all parties and rounds to `Z_p`.
    pub fn multiparty_decrypt_fusion(&self, shares: &[DecryptionShare], p: u64) -> Result<u64> {
        let leads: usize = shares.iter().filter(|share| share.lead).count();
        if shares.len() != self.params.num_parties || leads != 1 {
            return Err(Error::IncompleteShares {
                expected: self.params.num_parties,
                received: shares.len(),
                leads,
            });
        }
        let modulus: u64 = shares[0].modulus;
        if let Some(share) = shares.iter().find(|share| share.modulus != modulus) {
            return Err(Error::DimensionMismatch {
                expected_n: 1,
                expected_modulus: modulus,
                found_n: 1,
                found_modulus: share.modulus,
            });
        }
        check_plaintext_modulus(p, modulus)?;
        let q: Modulus = Modulus::new(modulus);
        let phase: u64 = shares.iter().fold(0, |acc, share| q.add(acc, share.value));
        Ok(Modulus::scale(phase, modulus, p))
    }
}
