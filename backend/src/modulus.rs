/// Arithmetic over `Z_q` for `1 < q < 2^62`, with values kept in `[0, q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulus {
    q: u64,
}

impl Modulus {
    pub fn new(q: u64) -> Self {
        #[cfg(debug_assertions)]
        {
            assert!(q > 1 && q < (1 << 62), "invalid modulus: {}", q);
        }
        Self { q }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let s: u64 = a + b;
        if s >= self.q { s - self.q } else { s }
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b { a - b } else { a + self.q - b }
    }

    #[inline(always)]
    pub fn neg(&self, a: u64) -> u64 {
        if a == 0 { 0 } else { self.q - a }
    }

    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.q as u128) as u64
    }

    #[inline(always)]
    pub fn mul_add(&self, acc: u64, a: u64, b: u64) -> u64 {
        ((acc as u128 + a as u128 * b as u128) % self.q as u128) as u64
    }

    pub fn pow(&self, a: u64, mut e: u64) -> u64 {
        let mut base: u64 = a % self.q;
        let mut res: u64 = 1;
        while e > 0 {
            if e & 1 == 1 {
                res = self.mul(res, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        res
    }

    /// Inverse for prime moduli.
    pub fn inv(&self, a: u64) -> u64 {
        self.pow(a, self.q - 2)
    }

    /// Representative in `(-q/2, q/2]`.
    #[inline(always)]
    pub fn center(&self, a: u64) -> i64 {
        if a > self.q >> 1 {
            a as i64 - self.q as i64
        } else {
            a as i64
        }
    }

    #[inline(always)]
    pub fn from_i64(&self, a: i64) -> u64 {
        a.rem_euclid(self.q as i64) as u64
    }

    #[inline(always)]
    pub fn from_i128(&self, a: i128) -> u64 {
        a.rem_euclid(self.q as i128) as u64
    }

    /// Shoup companion `floor(w * 2^64 / q)` of a constant operand.
    #[inline(always)]
    pub fn shoup(&self, w: u64) -> u64 {
        (((w as u128) << 64) / self.q as u128) as u64
    }

    /// `a * w mod q` with `w_shoup = self.shoup(w)`.
    #[inline(always)]
    pub fn mul_shoup(&self, a: u64, w: u64, w_shoup: u64) -> u64 {
        let hi: u64 = ((a as u128 * w_shoup as u128) >> 64) as u64;
        let r: u64 = a.wrapping_mul(w).wrapping_sub(hi.wrapping_mul(self.q));
        if r >= self.q { r - self.q } else { r }
    }

    /// Rounds `a * to / from` for `a` in `[0, from)`, reduced mod `to`.
    #[inline(always)]
    pub fn scale(a: u64, from: u64, to: u64) -> u64 {
        let r: u128 = (a as u128 * to as u128 + (from as u128 >> 1)) / from as u128;
        (r % to as u128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::Modulus;

    #[test]
    fn field_ops() {
        let q: Modulus = Modulus::new(12289);
        assert_eq!(q.add(12288, 2), 1);
        assert_eq!(q.sub(1, 2), 12288);
        assert_eq!(q.neg(0), 0);
        assert_eq!(q.mul(q.inv(1234), 1234), 1);
        assert_eq!(q.pow(11, 12288), 1);
        assert_eq!(q.center(12288), -1);
        assert_eq!(q.center(6144), 6144);
        assert_eq!(q.from_i64(-5), 12284);
        (0..12289u64).step_by(97).for_each(|w| {
            let ws: u64 = q.shoup(w);
            (0..12289u64).step_by(131).for_each(|a| assert_eq!(q.mul_shoup(a, w, ws), q.mul(a, w)));
        });
    }

    #[test]
    fn scale_rounds() {
        assert_eq!(Modulus::scale(1, 4, 1024), 256);
        assert_eq!(Modulus::scale(255, 1024, 4), 1);
        assert_eq!(Modulus::scale(127, 1024, 4), 0);
        assert_eq!(Modulus::scale(1023, 1024, 4), 0);
    }
}
