use crate::{modulus::Modulus, prime::root_of_unity};

/// Negacyclic number-theoretic transform over `Z_q[X]/(X^n + 1)`.
///
/// Forward is a Cooley-Tukey pass over bit-reversed powers of a primitive `2n`-th root `psi`,
/// backward the matching Gentleman-Sande pass followed by a scaling by `n^-1`.
/// Outputs of [NttTable::forward] are in bit-reversed order; only pointwise products are taken
/// in that domain so the order never needs to be undone.
pub struct NttTable {
    n: usize,
    q: Modulus,
    psi_rev: Vec<u64>,
    psi_rev_shoup: Vec<u64>,
    psi_inv_rev: Vec<u64>,
    psi_inv_rev_shoup: Vec<u64>,
    n_inv: u64,
    n_inv_shoup: u64,
}

impl NttTable {
    pub fn new(n: usize, q: u64) -> Self {
        #[cfg(debug_assertions)]
        {
            assert!(n.is_power_of_two() && n > 1, "n must be a power of two but is {}", n);
        }

        let modulus: Modulus = Modulus::new(q);
        let psi: u64 = root_of_unity(2 * n as u64, q);
        let psi_inv: u64 = modulus.inv(psi);
        let log_n: u32 = n.trailing_zeros();

        let mut psi_rev: Vec<u64> = vec![0; n];
        let mut psi_inv_rev: Vec<u64> = vec![0; n];
        let mut pow: u64 = 1;
        let mut pow_inv: u64 = 1;
        (0..n).for_each(|i| {
            let j: usize = i.reverse_bits() >> (usize::BITS - log_n);
            psi_rev[j] = pow;
            psi_inv_rev[j] = pow_inv;
            pow = modulus.mul(pow, psi);
            pow_inv = modulus.mul(pow_inv, psi_inv);
        });

        let psi_rev_shoup: Vec<u64> = psi_rev.iter().map(|w| modulus.shoup(*w)).collect();
        let psi_inv_rev_shoup: Vec<u64> = psi_inv_rev.iter().map(|w| modulus.shoup(*w)).collect();
        let n_inv: u64 = modulus.inv(n as u64);

        Self {
            n,
            q: modulus,
            psi_rev,
            psi_rev_shoup,
            psi_inv_rev,
            psi_inv_rev_shoup,
            n_inv,
            n_inv_shoup: modulus.shoup(n_inv),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn forward(&self, a: &mut [u64]) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.len(), self.n);
        }
        let q: &Modulus = &self.q;
        let mut t: usize = self.n;
        let mut m: usize = 1;
        while m < self.n {
            t >>= 1;
            (0..m).for_each(|i| {
                let j1: usize = 2 * i * t;
                let w: u64 = self.psi_rev[m + i];
                let w_shoup: u64 = self.psi_rev_shoup[m + i];
                (j1..j1 + t).for_each(|j| {
                    let u: u64 = a[j];
                    let v: u64 = q.mul_shoup(a[j + t], w, w_shoup);
                    a[j] = q.add(u, v);
                    a[j + t] = q.sub(u, v);
                });
            });
            m <<= 1;
        }
    }

    pub fn backward(&self, a: &mut [u64]) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.len(), self.n);
        }
        let q: &Modulus = &self.q;
        let mut t: usize = 1;
        let mut m: usize = self.n;
        while m > 1 {
            let h: usize = m >> 1;
            let mut j1: usize = 0;
            (0..h).for_each(|i| {
                let w: u64 = self.psi_inv_rev[h + i];
                let w_shoup: u64 = self.psi_inv_rev_shoup[h + i];
                (j1..j1 + t).for_each(|j| {
                    let u: u64 = a[j];
                    let v: u64 = a[j + t];
                    a[j] = q.add(u, v);
                    a[j + t] = q.mul_shoup(q.sub(u, v), w, w_shoup);
                });
                j1 += 2 * t;
            });
            t <<= 1;
            m = h;
        }
        a.iter_mut()
            .for_each(|x| *x = q.mul_shoup(*x, self.n_inv, self.n_inv_shoup));
    }
}
