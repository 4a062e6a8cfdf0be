use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Deterministic stream of randomness, seeded once and branched per task.
pub struct Source {
    source: ChaCha8Rng,
}

/// Fresh seed drawn from the thread-local OS-seeded generator.
pub fn new_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Rejection-samples `x & mask` until it falls below `max`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform value in `[0, q)`.
    #[inline(always)]
    pub fn next_u64_mod(&mut self, q: u64) -> u64 {
        let mask: u64 = u64::MAX >> (q - 1).leading_zeros().min(63);
        self.next_u64n(q, mask)
    }

    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    /// Uniform value in `{-1, 0, 1}`.
    #[inline(always)]
    pub fn next_ternary(&mut self) -> i64 {
        self.next_u64n(3, 0b11) as i64 - 1
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::Source;

    #[test]
    fn branches_are_reproducible() {
        let mut a: Source = Source::new([7u8; 32]);
        let mut b: Source = Source::new([7u8; 32]);
        let mut a1: Source = a.branch();
        let mut b1: Source = b.branch();
        (0..16).for_each(|_| assert_eq!(a1.next_u64_mod(12289), b1.next_u64_mod(12289)));
    }

    #[test]
    fn bounded_samplers() {
        let mut source: Source = Source::new([0u8; 32]);
        let q: u64 = 97;
        let mut seen: [bool; 3] = [false; 3];
        (0..1000).for_each(|_| {
            assert!(source.next_u64_mod(q) < q);
            let t: i64 = source.next_ternary();
            assert!((-1..=1).contains(&t));
            seen[(t + 1) as usize] = true;
            let f: f64 = source.next_f64(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&f));
        });
        assert!(seen.iter().all(|s| *s));
    }
}
