//! Control layer of a binary-gate FHE scheme: parameter resolution, bootstrapping-key
//! management, gate and function evaluation, and the threshold protocol.

pub mod context;
pub mod error;
pub mod eval;
pub mod keys;
pub mod multiparty;
pub mod params;

pub use context::{BinFheContext, CiphertextSize};
pub use error::{Error, Result};
pub use eval::BinGate;
pub use keys::{BootstrapKey, KeyGenMode, KeyStore, LWEKeyPair};
pub use multiparty::DecryptionShare;
pub use params::{BinFheMethod, CryptoParams, LWEParams, ParamSet, RGSWParams};

pub use binfhe_core::{LWECiphertext, LWEPublicKey, LWESecret, LWESwitchingKey};

#[cfg(test)]
mod tests;
