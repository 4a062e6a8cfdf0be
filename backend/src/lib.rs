pub mod decomposition;
pub mod module;
pub mod modulus;
pub mod ntt;
pub mod prime;
pub mod sampling;

pub use decomposition::Decomposer;
pub use module::Module;
pub use modulus::Modulus;
pub use ntt::NttTable;
