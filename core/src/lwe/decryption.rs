use backend::Modulus;

use crate::{LWECiphertext, LWESecret};

impl LWECiphertext {
    /// `b - <a, s> mod modulus`.
    pub fn phase(&self, sk: &LWESecret) -> u64 {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.n(), sk.n());
        }
        let q: Modulus = Modulus::new(self.modulus);
        q.sub(self.b, sk.dot(&self.a, &q))
    }

    /// Rounds the phase to the nearest multiple of `modulus / p`.
    pub fn decrypt(&self, sk: &LWESecret, p: u64) -> u64 {
        Modulus::scale(self.phase(sk), self.modulus, p)
    }
}
