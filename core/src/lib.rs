pub mod blind_rotation;
pub mod lwe;
pub mod rgsw;
pub mod rlwe;

pub use blind_rotation::*;
pub use lwe::*;
pub use rgsw::*;
pub use rlwe::*;

pub use sampling::distributions::{SIX_SIGMA, SecretDistribution};
