pub mod map;

pub use map::{fingerprint, Map};
