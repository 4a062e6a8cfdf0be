use thiserror::Error;

use crate::params::{BinFheMethod, ParamSet};

/// Errors raised by parameter resolution, key management and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported bootstrapping method {0:?}: CGGI is the only supported method")]
    UnsupportedMethod(BinFheMethod),

    #[error("unsupported security profile {0}: STD128 and TOY are the only supported sets")]
    UnsupportedProfile(ParamSet),

    #[error("unknown parameter set: {0}")]
    UnknownProfile(String),

    #[error("logQ={0} is out of range [11, 29]")]
    ModulusOutOfRange(u32),

    #[error("ring dimension {0} is not a power of two")]
    InvalidRingDimension(usize),

    #[error("ring modulus {big_q} is not a prime congruent to 1 mod 2N={two_n}")]
    InvalidRingModulus { big_q: u64, two_n: u64 },

    #[error("dimension mismatch: expected (n={expected_n}, modulus={expected_modulus}), got (n={found_n}, modulus={found_modulus})")]
    DimensionMismatch {
        expected_n: usize,
        expected_modulus: u64,
        found_n: usize,
        found_modulus: u64,
    },

    #[error("invalid plaintext modulus {0}")]
    InvalidModulus(u64),

    #[error("function output {output} at input {input} is outside Z_{modulus}")]
    FunctionRangeError { input: u64, output: u64, modulus: u64 },

    #[error("incomplete decryption shares: expected {expected} with one lead share, received {received} ({leads} lead)")]
    IncompleteShares {
        expected: usize,
        received: usize,
        leads: usize,
    },

    #[error("no bootstrapping key for gadget base {0}; run the bootstrapping key generation first")]
    MissingBootstrapKey(u32),

    #[error("no key-switching key; run the bootstrapping key generation first")]
    MissingKeySwitchingKey,

    #[error("CGGI bootstrapping requires a ternary LWE secret")]
    UnsupportedSecretDistribution,

    #[error("lookup table has {found} entries, expected {expected}")]
    LookupTableSize { expected: usize, found: usize },

    #[error("roundbits={roundbits} is out of range [0, {max}]")]
    InvalidRoundBits { roundbits: u32, max: u32 },

    #[error("ciphertext modulus {modulus} is outside [{min}, {max}] or not a power of two")]
    PrecisionOutOfRange { modulus: u64, min: u64, max: u64 },

    #[error("arbitrary function evaluation requires q={q} <= N={ring_dim}")]
    FunctionModulusTooLarge { q: u64, ring_dim: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
