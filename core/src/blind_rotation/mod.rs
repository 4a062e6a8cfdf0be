mod bootstrap;
mod cggi;
mod key;
mod lut;

pub use bootstrap::functional_bootstrap;
pub use key::BlindRotationKeyCGGI;
pub use lut::LookUpTable;

#[cfg(test)]
mod tests;
