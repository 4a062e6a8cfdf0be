use itertools::izip;

use crate::{modulus::Modulus, ntt::NttTable};

/// The ring `Z_q[X]/(X^n + 1)` with its NTT.
///
/// Polynomials are plain `[u64]` slices of length `n` with coefficients in `[0, q)`.
/// Methods suffixed `_ntt` expect both operands in the evaluation domain.
pub struct Module {
    n: usize,
    q: Modulus,
    ntt: NttTable,
}

impl Module {
    pub fn new(n: usize, q: u64) -> Self {
        Self {
            n,
            q: Modulus::new(q),
            ntt: NttTable::new(n, q),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn log_n(&self) -> usize {
        self.n.trailing_zeros() as usize
    }

    pub fn q(&self) -> u64 {
        self.q.q()
    }

    pub fn modulus(&self) -> &Modulus {
        &self.q
    }

    pub fn new_poly(&self) -> Vec<u64> {
        vec![0u64; self.n]
    }

    pub fn forward(&self, a: &mut [u64]) {
        self.ntt.forward(a)
    }

    pub fn backward(&self, a: &mut [u64]) {
        self.ntt.backward(a)
    }

    pub fn add_inplace(&self, res: &mut [u64], a: &[u64]) {
        izip!(res.iter_mut(), a.iter()).for_each(|(r, a)| *r = self.q.add(*r, *a));
    }

    pub fn sub_inplace(&self, res: &mut [u64], a: &[u64]) {
        izip!(res.iter_mut(), a.iter()).for_each(|(r, a)| *r = self.q.sub(*r, *a));
    }

    pub fn neg_inplace(&self, res: &mut [u64]) {
        res.iter_mut().for_each(|r| *r = self.q.neg(*r));
    }

    /// Adds the signed small coefficients `e` to `res`.
    pub fn add_i64_inplace(&self, res: &mut [u64], e: &[i64]) {
        izip!(res.iter_mut(), e.iter()).for_each(|(r, e)| *r = self.q.add(*r, self.q.from_i64(*e)));
    }

    /// Adds the constant `c` to every slot, i.e. adds the constant polynomial `c` in the NTT domain.
    pub fn add_scalar_ntt_inplace(&self, res: &mut [u64], c: u64) {
        res.iter_mut().for_each(|r| *r = self.q.add(*r, c));
    }

    pub fn mul_ntt(&self, res: &mut [u64], a: &[u64], b: &[u64]) {
        izip!(res.iter_mut(), a.iter(), b.iter()).for_each(|(r, a, b)| *r = self.q.mul(*a, *b));
    }

    pub fn mul_add_ntt(&self, res: &mut [u64], a: &[u64], b: &[u64]) {
        izip!(res.iter_mut(), a.iter(), b.iter()).for_each(|(r, a, b)| *r = self.q.mul_add(*r, *a, *b));
    }

    /// `res = X^k * a` for `k` in `[0, 2n)`.
    pub fn rotate(&self, res: &mut [u64], a: &[u64], k: usize) {
        let n: usize = self.n;
        let k: usize = k % (2 * n);
        a.iter().enumerate().for_each(|(j, x)| {
            let idx: usize = j + k;
            if idx < n {
                res[idx] = *x;
            } else if idx < 2 * n {
                res[idx - n] = self.q.neg(*x);
            } else {
                res[idx - 2 * n] = *x;
            }
        });
    }

    /// `res += (X^k - 1) * a` for `k` in `[0, 2n)`.
    pub fn add_mul_monomial_minus_one(&self, res: &mut [u64], a: &[u64], k: usize) {
        let n: usize = self.n;
        let k: usize = k % (2 * n);
        if k == 0 {
            return;
        }
        a.iter().enumerate().for_each(|(j, x)| {
            let idx: usize = j + k;
            if idx < n {
                res[idx] = self.q.add(res[idx], *x);
            } else if idx < 2 * n {
                res[idx - n] = self.q.sub(res[idx - n], *x);
            } else {
                res[idx - 2 * n] = self.q.add(res[idx - 2 * n], *x);
            }
            res[j] = self.q.sub(res[j], *x);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::Module;
    use crate::prime::{first_prime, previous_prime};
    use sampling::source::Source;

    fn naive_negacyclic(a: &[u64], b: &[u64], q: u64) -> Vec<u64> {
        let n: usize = a.len();
        let mut res: Vec<i128> = vec![0; n];
        (0..n).for_each(|i| {
            (0..n).for_each(|j| {
                let prod: i128 = a[i] as i128 * b[j] as i128;
                if i + j < n {
                    res[i + j] += prod;
                } else {
                    res[i + j - n] -= prod;
                }
            })
        });
        res.iter().map(|x| x.rem_euclid(q as i128) as u64).collect()
    }

    #[test]
    fn ntt_product_matches_schoolbook() {
        let mut source: Source = Source::new([0u8; 32]);
        for (n, q) in [(16usize, 97u64), (64, 12289), (256, previous_prime(first_prime(27, 512), 512))] {
            let module: Module = Module::new(n, q);
            let a: Vec<u64> = (0..n).map(|_| source.next_u64_mod(q)).collect();
            let b: Vec<u64> = (0..n).map(|_| source.next_u64_mod(q)).collect();
            let want: Vec<u64> = naive_negacyclic(&a, &b, q);

            let mut a_ntt: Vec<u64> = a.clone();
            let mut b_ntt: Vec<u64> = b.clone();
            module.forward(&mut a_ntt);
            module.forward(&mut b_ntt);
            let mut have: Vec<u64> = module.new_poly();
            module.mul_ntt(&mut have, &a_ntt, &b_ntt);
            module.backward(&mut have);
            assert_eq!(have, want, "n={} q={}", n, q);

            module.backward(&mut a_ntt);
            assert_eq!(a_ntt, a);
        }
    }

    #[test]
    fn monomials() {
        let n: usize = 16;
        let q: u64 = 97;
        let module: Module = Module::new(n, q);
        let a: Vec<u64> = (1..=n as u64).collect();
        for k in [0usize, 1, 5, 16, 17, 31] {
            let mut xk: Vec<u64> = vec![0; n];
            if k < n {
                xk[k] = 1;
            } else {
                xk[k - n] = q - 1;
            }
            let want: Vec<u64> = naive_negacyclic(&a, &xk, q);
            let mut have: Vec<u64> = module.new_poly();
            module.rotate(&mut have, &a, k);
            assert_eq!(have, want, "rotate k={}", k);

            let mut acc: Vec<u64> = vec![3; n];
            module.add_mul_monomial_minus_one(&mut acc, &a, k);
            let expected: Vec<u64> = (0..n).map(|i| (3 + want[i] + q - a[i]) % q).collect();
            assert_eq!(acc, expected, "monomial minus one k={}", k);
        }
    }
}
