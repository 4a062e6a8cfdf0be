use crate::modulus::Modulus;

/// Signed gadget decomposition of `Z_q` values in base `2^log_base`.
///
/// Each value is centered in `(-q/2, q/2]` and split into `digits` balanced digits in
/// `[-2^(log_base-1), 2^(log_base-1))`, least significant first, returned mod `q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposer {
    q: Modulus,
    log_base: usize,
    digits: usize,
}

impl Decomposer {
    pub fn new(q: u64, log_base: usize) -> Self {
        let bits: usize = (u64::BITS - q.leading_zeros()) as usize;
        #[cfg(debug_assertions)]
        {
            assert!(log_base > 0 && log_base < 63, "invalid log_base: {}", log_base);
        }
        Self {
            q: Modulus::new(q),
            log_base,
            digits: bits.div_ceil(log_base),
        }
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn log_base(&self) -> usize {
        self.log_base
    }

    pub fn base(&self) -> u64 {
        1 << self.log_base
    }

    /// Gadget vector `[B^0, B^1, ..., B^(digits-1)] mod q`.
    pub fn gadget(&self) -> Vec<u64> {
        let mut g: Vec<u64> = Vec::with_capacity(self.digits);
        let mut pow: u64 = 1 % self.q.q();
        (0..self.digits).for_each(|_| {
            g.push(pow);
            pow = self.q.mul(pow, self.base() % self.q.q());
        });
        g
    }

    /// Writes digit `l` of every coefficient of `a` into `res[l]`.
    pub fn decompose(&self, a: &[u64], res: &mut [Vec<u64>]) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(res.len(), self.digits);
        }
        let shift: u32 = (64 - self.log_base) as u32;
        a.iter().enumerate().for_each(|(i, x)| {
            let mut c: i64 = self.q.center(*x);
            res.iter_mut().for_each(|digit| {
                let r: i64 = (c << shift) >> shift;
                c = (c - r) >> self.log_base;
                digit[i] = self.q.from_i64(r);
            });
        });
    }
}
