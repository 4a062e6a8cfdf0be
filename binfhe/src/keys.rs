//! Bootstrapping-key store: one refresh key per gadget base, all sharing the
//! key-switching key derived from the same large secret.

use std::{fmt, sync::Arc};

use backend::Module;
use binfhe_core::{BlindRotationKeyCGGI, LWEPublicKey, LWESecret, LWESwitchingKey, RLWESecret, SecretDistribution};
use rayon::prelude::*;
use sampling::source::Source;
use tracing::{debug, info};
use utils::{Map, fingerprint};

use crate::{
    error::{Error, Result},
    params::{BinFheMethod, CryptoParams, preferred_base},
};

/// How the bootstrapping-key generation publishes the large secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyGenMode {
    SymEncrypt,
    /// Also derives a public key under the large secret.
    PubEncrypt,
}

/// Large secret together with its public key.
#[derive(Clone, Debug)]
pub struct LWEKeyPair {
    pub secret: LWESecret,
    pub public: LWEPublicKey,
}

/// Refresh key for one gadget base.
#[derive(Clone, Debug)]
pub struct BootstrapKey {
    pub base_g: u32,
    pub brk: BlindRotationKeyCGGI,
    pub ksk: Arc<LWESwitchingKey>,
}

pub struct KeyStore {
    refresh_keys: Map<u32, BootstrapKey>,
    active_base: u32,
    ksk: Option<Arc<LWESwitchingKey>>,
    public_key: Option<LWEPublicKey>,
    fingerprint: Option<u64>,
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("bases", &self.bases())
            .field("active_base", &self.active_base)
            .field("public_key", &self.public_key.is_some())
            .finish_non_exhaustive()
    }
}

impl KeyStore {
    pub fn new(active_base: u32) -> Self {
        Self {
            refresh_keys: Map::new(),
            active_base,
            ksk: None,
            public_key: None,
            fingerprint: None,
        }
    }

    pub fn active_base(&self) -> u32 {
        self.active_base
    }

    /// Stores `key` unless its base already has an entry; returns the stored entry.
    pub fn insert_if_absent(&mut self, key: BootstrapKey) -> &BootstrapKey {
        self.refresh_keys.insert_if_absent(key.base_g, key)
    }

    pub fn get(&self, base: u32) -> Option<&BootstrapKey> {
        self.refresh_keys.get(&base)
    }

    pub fn contains(&self, base: u32) -> bool {
        self.refresh_keys.contains(&base)
    }

    /// Entry of the active base.
    pub fn active(&self) -> Result<&BootstrapKey> {
        self.get(self.active_base)
            .ok_or(Error::MissingBootstrapKey(self.active_base))
    }

    /// Entry of the base preferred for a modulus of `log_m` bits, falling back to the active entry.
    pub fn for_precision(&self, log_m: u32) -> Result<&BootstrapKey> {
        match self.get(preferred_base(log_m)) {
            Some(key) => Ok(key),
            None => self.active(),
        }
    }

    pub fn bases(&self) -> Vec<u32> {
        let mut bases: Vec<u32> = self.refresh_keys.keys().copied().collect();
        bases.sort_unstable();
        bases
    }

    pub fn len(&self) -> usize {
        self.refresh_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refresh_keys.is_empty()
    }

    pub fn key_switching_key(&self) -> Option<&Arc<LWESwitchingKey>> {
        self.ksk.as_ref()
    }

    /// Public key under the large secret, set by [`KeyGenMode::PubEncrypt`].
    pub fn public_key(&self) -> Option<&LWEPublicKey> {
        self.public_key.as_ref()
    }

    fn reset(&mut self, fp: Option<u64>) {
        self.refresh_keys.clear();
        self.ksk = None;
        self.public_key = None;
        self.fingerprint = fp;
    }

    /// Derives the refresh keys of `sk`.
    ///
    /// With time optimisation every base of the gadget-power map (and the active base) is
    /// regenerated in parallel and replaces the stored entries. Otherwise only the active base
    /// is generated, and only if absent.
    pub(crate) fn generate(
        &mut self,
        params: &CryptoParams,
        module: &Module,
        sk: &LWESecret,
        mode: KeyGenMode,
        source: &mut Source,
    ) -> Result<()> {
        if params.rgsw.method != BinFheMethod::Ginx {
            return Err(Error::UnsupportedMethod(params.rgsw.method));
        }
        if !sk.is_ternary() {
            return Err(Error::UnsupportedSecretDistribution);
        }
        if sk.n() != params.lwe.n {
            return Err(Error::DimensionMismatch {
                expected_n: params.lwe.n,
                expected_modulus: params.lwe.q,
                found_n: sk.n(),
                found_modulus: params.lwe.q,
            });
        }

        let fp: u64 = fingerprint(sk.coeffs());
        if self.fingerprint != Some(fp) {
            if !self.is_empty() {
                debug!(bases = ?self.bases(), "new secret, dropping bootstrapping keys");
            }
            self.reset(Some(fp));
        }

        let wants_pk: bool = mode == KeyGenMode::PubEncrypt && self.public_key.is_none();
        if !params.time_optimization && self.contains(self.active_base) && !wants_pk {
            debug!(base = self.active_base, "bootstrapping key already present");
            return Ok(());
        }

        let sigma: f64 = params.lwe.sigma;
        let z: LWESecret = LWESecret::generate(
            params.lwe.ring_dim,
            SecretDistribution::UniformTernary,
            sigma,
            source,
        );
        let sk_glwe: RLWESecret = RLWESecret::from_lwe(module, &z);

        let mut source_xa: Source = source.branch();
        let mut source_xe: Source = source.branch();
        let ksk: Arc<LWESwitchingKey> = Arc::new(LWESwitchingKey::generate(
            &z,
            sk,
            params.lwe.base_ks,
            params.lwe.q_ks,
            &mut source_xa,
            &mut source_xe,
            sigma,
        ));
        if mode == KeyGenMode::PubEncrypt {
            self.public_key = Some(LWEPublicKey::generate(
                &z,
                params.lwe.big_q,
                &mut source_xa,
                &mut source_xe,
                sigma,
            ));
        }

        let mut bases: Vec<u32> = if params.time_optimization {
            params.rgsw.gadget_powers.keys().copied().collect()
        } else {
            Vec::new()
        };
        if !bases.contains(&self.active_base) {
            bases.push(self.active_base);
        }
        info!(?bases, ?mode, n = params.lwe.n, ring_dim = params.lwe.ring_dim, "generating bootstrapping keys");

        let tasks: Vec<(u32, Source, Source)> = bases
            .iter()
            .map(|base| (*base, source.branch(), source.branch()))
            .collect();
        let keys: Vec<BootstrapKey> = tasks
            .into_par_iter()
            .map(|(base, mut source_xa, mut source_xe)| BootstrapKey {
                base_g: base,
                brk: BlindRotationKeyCGGI::generate_from_sk(
                    module,
                    params.rgsw.decomposer_for(base),
                    &sk_glwe,
                    sk,
                    &mut source_xa,
                    &mut source_xe,
                    params.rgsw.sigma,
                ),
                ksk: ksk.clone(),
            })
            .collect();

        self.refresh_keys.clear();
        keys.into_iter().for_each(|key| {
            self.insert_if_absent(key);
        });
        self.ksk = Some(ksk);
        Ok(())
    }

    /// Replaces the active entry with a jointly generated key.
    pub(crate) fn install(&mut self, brk: BlindRotationKeyCGGI, ksk: LWESwitchingKey) {
        let ksk: Arc<LWESwitchingKey> = Arc::new(ksk);
        info!(base = self.active_base, blocks = brk.blocks(), "installing multiparty bootstrapping key");
        self.reset(None);
        self.refresh_keys.insert(
            self.active_base,
            BootstrapKey {
                base_g: self.active_base,
                brk,
                ksk: ksk.clone(),
            },
        );
        self.ksk = Some(ksk);
    }
}
