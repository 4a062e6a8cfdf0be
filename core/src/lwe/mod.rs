mod ciphertext;
mod decryption;
mod encryption;
mod keyswitch;
mod public_key;
mod secret;

pub use ciphertext::*;
pub use keyswitch::*;
pub use public_key::*;
pub use secret::*;
