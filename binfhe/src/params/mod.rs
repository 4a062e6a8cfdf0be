//! Parameter resolution: explicit values, a security profile with a target modulus size,
//! or a named catalogue entry.

mod catalogue;
mod security;


use std::collections::BTreeMap;

use backend::{
    Decomposer,
    prime::{first_prime, previous_prime},
};
use binfhe_core::SecretDistribution;
use tracing::debug;

pub use catalogue::ParamSet;
pub use security::{SecurityLevel, find_ring_dim};

use crate::error::{Error, Result};

/// Offset added before every programmable bootstrap; bounds the tolerated noise.
pub const BETA: u64 = 128;
pub const DEFAULT_SIGMA: f64 = 3.19;
/// Key-switching modulus of the security-profile mode.
pub const SECURITY_Q_KS: u64 = 1 << 35;
pub const SECURITY_BASE_KS: u64 = 32;
pub const SECURITY_BASE_R: u32 = 23;
pub const TOY_LWE_DIM: usize = 32;
pub const STD128_LWE_DIM: usize = 1305;
/// Gadget bases covered by the multi-base bootstrapping keys.
pub const GADGET_BASES: [u32; 3] = [1 << 14, 1 << 18, 1 << 27];
pub const MIN_LOG_Q: u32 = 11;
pub const MAX_LOG_Q: u32 = 29;

/// Blind-rotation accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinFheMethod {
    Ap,
    Ginx,
    Lmkcdey,
}

/// Gadget base preferred for a modulus of `log_q` bits.
pub fn preferred_base(log_q: u32) -> u32 {
    if log_q > 25 {
        1 << 14
    } else if log_q > 16 {
        1 << 18
    } else {
        1 << 27
    }
}

/// Small-dimension LWE parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LWEParams {
    /// Small dimension.
    pub n: usize,
    /// Ring dimension `N`, the dimension of extracted ciphertexts.
    pub ring_dim: usize,
    /// Plaintext-domain modulus of small ciphertexts.
    pub q: u64,
    /// Ring modulus.
    pub big_q: u64,
    pub q_ks: u64,
    pub sigma: f64,
    pub base_ks: u64,
    pub key_dist: SecretDistribution,
}

/// Ring and gadget parameters of the bootstrapping keys.
#[derive(Clone, Debug, PartialEq)]
pub struct RGSWParams {
    pub ring_dim: usize,
    pub big_q: u64,
    pub q: u64,
    pub base_g: u32,
    pub base_r: u32,
    pub method: BinFheMethod,
    pub sigma: f64,
    /// Gadget vectors `base^l mod Q` of every base available for multi-base keys.
    pub gadget_powers: BTreeMap<u32, Vec<u64>>,
}

impl RGSWParams {
    pub fn log_base_g(&self) -> usize {
        self.base_g.trailing_zeros() as usize
    }

    pub fn decomposer(&self) -> Decomposer {
        self.decomposer_for(self.base_g)
    }

    pub fn decomposer_for(&self, base: u32) -> Decomposer {
        #[cfg(debug_assertions)]
        {
            assert!(base.is_power_of_two(), "gadget base {} is not a power of two", base);
        }
        Decomposer::new(self.big_q, base.trailing_zeros() as usize)
    }
}

fn gadget_powers(big_q: u64, bases: &[u32]) -> BTreeMap<u32, Vec<u64>> {
    bases
        .iter()
        .map(|base| (*base, Decomposer::new(big_q, base.trailing_zeros() as usize).gadget()))
        .collect()
}

/// Resolved parameters shared by keys and evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct CryptoParams {
    pub lwe: LWEParams,
    pub rgsw: RGSWParams,
    pub num_parties: usize,
    /// Derive bootstrapping keys for every base of [`RGSWParams::gadget_powers`].
    pub time_optimization: bool,
}

impl CryptoParams {
    /// Builds parameters from explicit values. Nothing is validated.
    #[allow(clippy::too_many_arguments)]
    pub fn explicit(
        n: usize,
        ring_dim: usize,
        q: u64,
        big_q: u64,
        sigma: f64,
        base_ks: u64,
        base_g: u32,
        base_r: u32,
        method: BinFheMethod,
    ) -> Self {
        let params: CryptoParams = CryptoParams {
            lwe: LWEParams {
                n,
                ring_dim,
                q,
                big_q,
                q_ks: big_q,
                sigma,
                base_ks,
                key_dist: SecretDistribution::UniformTernary,
            },
            rgsw: RGSWParams {
                ring_dim,
                big_q,
                q,
                base_g,
                base_r,
                method,
                sigma,
                gadget_powers: BTreeMap::new(),
            },
            num_parties: 1,
            time_optimization: false,
        };
        debug!(?params, "resolved explicit parameters");
        params
    }

    /// Resolves a security profile (`TOY` or `STD128`) for a target modulus of `log_q` bits.
    ///
    /// `ring_dim` raises the ring dimension above the minimum the security table allows; it must be
    /// `0` or a power of two.
    pub fn from_security(
        set: ParamSet,
        arb_func: bool,
        log_q: u32,
        ring_dim: usize,
        method: BinFheMethod,
        time_optimization: bool,
    ) -> Result<Self> {
        if method != BinFheMethod::Ginx {
            return Err(Error::UnsupportedMethod(method));
        }
        let n: usize = match set {
            ParamSet::Toy => TOY_LWE_DIM,
            ParamSet::Std128 => STD128_LWE_DIM,
            _ => return Err(Error::UnsupportedProfile(set)),
        };
        if !(MIN_LOG_Q..=MAX_LOG_Q).contains(&log_q) {
            return Err(Error::ModulusOutOfRange(log_q));
        }
        if ring_dim != 0 && !ring_dim.is_power_of_two() {
            return Err(Error::InvalidRingDimension(ring_dim));
        }

        let (base_g, log_q_prime): (u32, u32) = if log_q == MIN_LOG_Q {
            (1 << 5, 27)
        } else {
            (preferred_base(log_q), 54)
        };

        let min_ring_dim: usize = find_ring_dim(
            SecretDistribution::UniformTernary,
            SecurityLevel::Classic128,
            log_q_prime,
        )
        .ok_or(Error::ModulusOutOfRange(log_q))?;
        let ring_dim: usize = min_ring_dim.max(ring_dim);

        let m: u64 = 2 * ring_dim as u64;
        let big_q: u64 = previous_prime(first_prime(log_q_prime, m), m);
        let q: u64 = if arb_func { ring_dim as u64 } else { m };

        let time_optimization: bool = time_optimization && log_q != MIN_LOG_Q;
        let gadget_powers: BTreeMap<u32, Vec<u64>> = if time_optimization {
            gadget_powers(big_q, &GADGET_BASES)
        } else {
            BTreeMap::new()
        };

        let params: CryptoParams = CryptoParams {
            lwe: LWEParams {
                n,
                ring_dim,
                q,
                big_q,
                q_ks: SECURITY_Q_KS,
                sigma: DEFAULT_SIGMA,
                base_ks: SECURITY_BASE_KS,
                key_dist: SecretDistribution::UniformTernary,
            },
            rgsw: RGSWParams {
                ring_dim,
                big_q,
                q,
                base_g,
                base_r: SECURITY_BASE_R,
                method,
                sigma: DEFAULT_SIGMA,
                gadget_powers,
            },
            num_parties: 1,
            time_optimization,
        };
        debug!(%set, log_q, log_q_prime, ring_dim, big_q, base_g, time_optimization, "resolved security parameters");
        Ok(params)
    }

    /// Resolves a catalogue entry for `num_parties` parties.
    pub fn from_param_set(set: ParamSet, method: BinFheMethod, num_parties: usize) -> Self {
        let row: catalogue::NamedParams = catalogue::lookup(set);
        let ring_dim: usize = (row.cycl_order / 2) as usize;
        let big_q: u64 = previous_prime(first_prime(row.bits, row.cycl_order), row.cycl_order);
        let q_ks: u64 = row.q_ks.unwrap_or(big_q);

        let params: CryptoParams = CryptoParams {
            lwe: LWEParams {
                n: row.n,
                ring_dim,
                q: row.q,
                big_q,
                q_ks,
                sigma: DEFAULT_SIGMA,
                base_ks: row.base_ks,
                key_dist: row.key_dist,
            },
            rgsw: RGSWParams {
                ring_dim,
                big_q,
                q: row.q,
                base_g: row.base_g,
                base_r: row.base_r,
                method,
                sigma: DEFAULT_SIGMA,
                gadget_powers: BTreeMap::new(),
            },
            num_parties,
            time_optimization: false,
        };
        debug!(%set, ring_dim, big_q, q_ks, num_parties, "resolved named parameters");
        params
    }

    /// [`CryptoParams::from_param_set`] from a catalogue name such as `"STD128_OPT"`.
    pub fn from_name(name: &str, method: BinFheMethod, num_parties: usize) -> Result<Self> {
        let set: ParamSet = name.parse()?;
        Ok(Self::from_param_set(set, method, num_parties))
    }

    pub fn beta(&self) -> u64 {
        BETA
    }

    /// Largest plaintext modulus usable by programmable bootstrapping, `q / (2 beta)`.
    pub fn max_plaintext_space(&self) -> u64 {
        self.lwe.q / (2 * BETA)
    }
}
