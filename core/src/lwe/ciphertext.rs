use backend::Modulus;

/// LWE ciphertext `(a, b)` with phase `b - <a, s> mod modulus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LWECiphertext {
    pub(crate) a: Vec<u64>,
    pub(crate) b: u64,
    pub(crate) modulus: u64,
}

impl LWECiphertext {
    pub fn alloc(n: usize, modulus: u64) -> Self {
        Self {
            a: vec![0; n],
            b: 0,
            modulus,
        }
    }

    pub fn from_parts(a: Vec<u64>, b: u64, modulus: u64) -> Self {
        #[cfg(debug_assertions)]
        {
            assert!(a.iter().all(|x| *x < modulus) && b < modulus);
        }
        Self { a, b, modulus }
    }

    pub fn n(&self) -> usize {
        self.a.len()
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn a(&self) -> &[u64] {
        &self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn add_inplace(&mut self, other: &LWECiphertext) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.n(), other.n());
            assert_eq!(self.modulus, other.modulus);
        }
        let q: Modulus = Modulus::new(self.modulus);
        self.a
            .iter_mut()
            .zip(other.a.iter())
            .for_each(|(x, y)| *x = q.add(*x, *y));
        self.b = q.add(self.b, other.b);
    }

    pub fn sub_inplace(&mut self, other: &LWECiphertext) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.n(), other.n());
            assert_eq!(self.modulus, other.modulus);
        }
        let q: Modulus = Modulus::new(self.modulus);
        self.a
            .iter_mut()
            .zip(other.a.iter())
            .for_each(|(x, y)| *x = q.sub(*x, *y));
        self.b = q.sub(self.b, other.b);
    }

    /// Adds `c` (taken mod the ciphertext modulus) to the phase.
    pub fn add_constant(&mut self, c: u64) {
        let q: Modulus = Modulus::new(self.modulus);
        self.b = q.add(self.b, c % self.modulus);
    }

    /// Subtracts `c` (taken mod the ciphertext modulus) from the phase.
    pub fn sub_constant(&mut self, c: u64) {
        let q: Modulus = Modulus::new(self.modulus);
        self.b = q.sub(self.b, c % self.modulus);
    }

    pub fn negate_inplace(&mut self) {
        let q: Modulus = Modulus::new(self.modulus);
        self.a.iter_mut().for_each(|x| *x = q.neg(*x));
        self.b = q.neg(self.b);
    }

    pub fn mul_scalar_inplace(&mut self, k: u64) {
        let q: Modulus = Modulus::new(self.modulus);
        let k: u64 = k % self.modulus;
        self.a.iter_mut().for_each(|x| *x = q.mul(*x, k));
        self.b = q.mul(self.b, k);
    }

    /// Rounds every component from the current modulus to `modulus`.
    pub fn mod_switch(&self, modulus: u64) -> LWECiphertext {
        let from: u64 = self.modulus;
        LWECiphertext {
            a: self
                .a
                .iter()
                .map(|x| Modulus::scale(*x, from, modulus))
                .collect(),
            b: Modulus::scale(self.b, from, modulus),
            modulus,
        }
    }

    /// Exact reduction to a modulus dividing the current one.
    pub fn reduce(&self, modulus: u64) -> LWECiphertext {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.modulus % modulus, 0, "{} does not divide {}", modulus, self.modulus);
        }
        LWECiphertext {
            a: self.a.iter().map(|x| x % modulus).collect(),
            b: self.b % modulus,
            modulus,
        }
    }

    /// Reinterprets the components modulo a multiple of the current modulus.
    pub fn lift(&self, modulus: u64) -> LWECiphertext {
        #[cfg(debug_assertions)]
        {
            assert_eq!(modulus % self.modulus, 0, "{} does not divide {}", self.modulus, modulus);
        }
        LWECiphertext {
            a: self.a.clone(),
            b: self.b,
            modulus,
        }
    }
}
