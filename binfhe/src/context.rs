use backend::{Module, prime::is_prime};
use binfhe_core::{LWECiphertext, LWEPublicKey, LWESecret, LWESwitchingKey, SecretDistribution};
use sampling::source::{Source, new_seed};
use tracing::debug;

use crate::{
    error::{Error, Result},
    keys::{KeyGenMode, KeyStore, LWEKeyPair},
    params::{BinFheMethod, CryptoParams, LWEParams, ParamSet},
};

/// Dimension and modulus of a public-key encryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CiphertextSize {
    /// `(n, q)`, switched down with the stored key-switching key.
    Small,
    /// `(N, Q)`, decryptable with the large secret.
    Large,
}

/// Owns the resolved parameters, the ring and the bootstrapping keys.
///
/// Key generation and encryption draw from the context's [`Source`] and take `&mut self`.
/// Evaluation only reads parameters and keys and takes `&self`.
pub struct BinFheContext {
    pub(crate) params: CryptoParams,
    pub(crate) module: Module,
    pub(crate) keys: KeyStore,
    pub(crate) source: Source,
}

impl BinFheContext {
    pub fn new(params: CryptoParams) -> Result<Self> {
        Self::with_seed(params, new_seed())
    }

    /// Context whose randomness is fully determined by `seed`.
    ///
    /// Fails unless `N` is a power of two and `Q` is a prime with `Q = 1 mod 2N`.
    pub fn with_seed(params: CryptoParams, seed: [u8; 32]) -> Result<Self> {
        let ring_dim: usize = params.rgsw.ring_dim;
        if ring_dim < 2 || !ring_dim.is_power_of_two() {
            return Err(Error::InvalidRingDimension(ring_dim));
        }
        let big_q: u64 = params.rgsw.big_q;
        let two_n: u64 = 2 * ring_dim as u64;
        if big_q % two_n != 1 || !is_prime(big_q) {
            return Err(Error::InvalidRingModulus { big_q, two_n });
        }
        let module: Module = Module::new(ring_dim, big_q);
        let keys: KeyStore = KeyStore::new(params.rgsw.base_g);
        debug!(n = params.lwe.n, ring_dim = params.lwe.ring_dim, q = params.lwe.q, "new context");
        Ok(Self {
            params,
            module,
            keys,
            source: Source::new(seed),
        })
    }

    pub fn from_param_set(set: ParamSet, method: BinFheMethod) -> Result<Self> {
        Self::new(CryptoParams::from_param_set(set, method, 1))
    }

    pub fn from_security(
        set: ParamSet,
        arb_func: bool,
        log_q: u32,
        ring_dim: usize,
        method: BinFheMethod,
        time_optimization: bool,
    ) -> Result<Self> {
        Self::new(CryptoParams::from_security(
            set,
            arb_func,
            log_q,
            ring_dim,
            method,
            time_optimization,
        )?)
    }

    pub fn params(&self) -> &CryptoParams {
        &self.params
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    pub fn beta(&self) -> u64 {
        self.params.beta()
    }

    pub fn max_plaintext_space(&self) -> u64 {
        self.params.max_plaintext_space()
    }

    /// Small secret of dimension `n`, sampled from the parameters' key distribution.
    pub fn key_gen(&mut self) -> LWESecret {
        LWESecret::generate(
            self.params.lwe.n,
            self.params.lwe.key_dist,
            self.params.lwe.sigma,
            &mut self.source,
        )
    }

    /// Ternary secret of dimension `N`.
    pub fn key_gen_large(&mut self) -> LWESecret {
        LWESecret::generate(
            self.params.lwe.ring_dim,
            SecretDistribution::UniformTernary,
            self.params.lwe.sigma,
            &mut self.source,
        )
    }

    pub fn key_gen_pair(&mut self) -> LWEKeyPair {
        let secret: LWESecret = self.key_gen_large();
        let public: LWEPublicKey = self.pub_key_gen(&secret);
        LWEKeyPair { secret, public }
    }

    /// Public key at `(N, Q)` under a large secret.
    pub fn pub_key_gen(&mut self, sk_large: &LWESecret) -> LWEPublicKey {
        let mut source_xa: Source = self.source.branch();
        LWEPublicKey::generate(
            sk_large,
            self.params.lwe.big_q,
            &mut source_xa,
            &mut self.source,
            self.params.lwe.sigma,
        )
    }

    /// Key-switching key from `sk_large` to `sk` at the key-switching modulus.
    pub fn key_switch_gen(&mut self, sk: &LWESecret, sk_large: &LWESecret) -> LWESwitchingKey {
        let mut source_xa: Source = self.source.branch();
        LWESwitchingKey::generate(
            sk_large,
            sk,
            self.params.lwe.base_ks,
            self.params.lwe.q_ks,
            &mut source_xa,
            &mut self.source,
            self.params.lwe.sigma,
        )
    }

    /// Generates the bootstrapping keys of `sk` into the key store.
    pub fn bt_key_gen(&mut self, sk: &LWESecret, mode: KeyGenMode) -> Result<()> {
        self.keys
            .generate(&self.params, &self.module, sk, mode, &mut self.source)
    }

    /// Encrypts `m mod p` under `sk` at `modulus`, which defaults to `q` for small secrets
    /// and to `Q` for large ones.
    ///
    /// Fails with [`Error::InvalidModulus`] unless `1 <= p <= modulus`.
    pub fn encrypt(&mut self, sk: &LWESecret, m: u64, p: u64, modulus: Option<u64>) -> Result<LWECiphertext> {
        let modulus: u64 = modulus.unwrap_or(if sk.n() == self.params.lwe.n {
            self.params.lwe.q
        } else {
            self.params.lwe.big_q
        });
        check_plaintext_modulus(p, modulus)?;
        let mut source_xa: Source = self.source.branch();
        let mut ct: LWECiphertext = LWECiphertext::alloc(sk.n(), modulus);
        ct.encrypt_sk(sk, m, p, &mut source_xa, &mut self.source, self.params.lwe.sigma);
        Ok(ct)
    }

    /// Encrypts `m mod p` under a public key at `(N, Q)`, switched down for [`CiphertextSize::Small`].
    pub fn encrypt_public(
        &mut self,
        pk: &LWEPublicKey,
        m: u64,
        size: CiphertextSize,
        p: u64,
    ) -> Result<LWECiphertext> {
        check_plaintext_modulus(p, pk.modulus())?;
        let mut source_xr: Source = self.source.branch();
        let mut ct: LWECiphertext = LWECiphertext::alloc(pk.n(), pk.modulus());
        ct.encrypt_pk(pk, m, p, &mut source_xr, &mut self.source, self.params.lwe.sigma);
        match size {
            CiphertextSize::Large => Ok(ct),
            CiphertextSize::Small => {
                let ksk: &LWESwitchingKey = self
                    .keys
                    .key_switching_key()
                    .ok_or(Error::MissingKeySwitchingKey)?;
                self.switch_down(ksk, &ct)
            }
        }
    }

    /// Switches a ciphertext at `(N, Q)` to `(n, q)`.
    pub fn switch_down(&self, ksk: &LWESwitchingKey, ct: &LWECiphertext) -> Result<LWECiphertext> {
        let lwe: &LWEParams = &self.params.lwe;
        if ct.n() != lwe.ring_dim || ct.modulus() != lwe.big_q {
            return Err(Error::DimensionMismatch {
                expected_n: lwe.ring_dim,
                expected_modulus: lwe.big_q,
                found_n: ct.n(),
                found_modulus: ct.modulus(),
            });
        }
        if ksk.n_in() != lwe.ring_dim || ksk.n_out() != lwe.n {
            return Err(Error::DimensionMismatch {
                expected_n: lwe.ring_dim,
                expected_modulus: lwe.q_ks,
                found_n: ksk.n_in(),
                found_modulus: ksk.modulus(),
            });
        }
        let switched: LWECiphertext = ksk.keyswitch(&ct.mod_switch(ksk.modulus()));
        Ok(switched.mod_switch(lwe.q))
    }

    /// Decrypts `ct` with plaintext modulus `p`.
    pub fn decrypt(&self, sk: &LWESecret, ct: &LWECiphertext, p: u64) -> Result<u64> {
        if sk.n() != ct.n() {
            return Err(Error::DimensionMismatch {
                expected_n: ct.n(),
                expected_modulus: ct.modulus(),
                found_n: sk.n(),
                found_modulus: ct.modulus(),
            });
        }
        check_plaintext_modulus(p, ct.modulus())?;
        Ok(ct.decrypt(sk, p))
    }
}

pub(crate) fn check_plaintext_modulus(p: u64, modulus: u64) -> Result<()> {
    if p == 0 || p > modulus {
        return Err(Error::InvalidModulus(p));
    }
    Ok(())
}
