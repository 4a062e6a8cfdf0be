use backend::Module;

use crate::{BlindRotationKeyCGGI, LWECiphertext, LookUpTable, RLWECiphertext};

impl BlindRotationKeyCGGI {
    /// Returns `RLWE(X^(-phase') * lut)` with `phase' = phase(ct) * 2N / modulus(ct)`.
    ///
    /// Starting from `(0, X^(-b') lut)`, each coordinate applies
    /// `acc += (X^(a') - 1) (acc x C+_i) + (X^(-a') - 1) (acc x C-_i)`.
    pub fn blind_rotate(&self, module: &Module, lut: &LookUpTable, ct: &LWECiphertext) -> RLWECiphertext {
        let n: usize = module.n();
        let two_n: u64 = 2 * n as u64;
        let m_in: u64 = ct.modulus();

        #[cfg(debug_assertions)]
        {
            assert_eq!(ct.n(), self.n_lwe);
            assert_eq!(lut.domain(), m_in);
            assert_eq!(two_n % m_in, 0);
        }

        let factor: u64 = two_n / m_in;
        let b: u64 = (ct.b() * factor) % two_n;

        let mut acc: RLWECiphertext = RLWECiphertext::alloc(n);
        module.rotate(&mut acc.b, lut.data(), ((two_n - b) % two_n) as usize);

        let d: usize = self.dec.digits();
        let mut digits_a: Vec<Vec<u64>> = vec![vec![0; n]; d];
        let mut digits_b: Vec<Vec<u64>> = vec![vec![0; n]; d];
        let mut plus: RLWECiphertext = RLWECiphertext::alloc(n);
        let mut minus: RLWECiphertext = RLWECiphertext::alloc(n);

        self.keys.chunks_exact(self.n_lwe).for_each(|block| {
            block.iter().zip(ct.a().iter()).for_each(|([c_plus, c_minus], a)| {
                let a: u64 = (a * factor) % two_n;
                if a == 0 {
                    return;
                }

                self.dec.decompose(&acc.a, &mut digits_a);
                self.dec.decompose(&acc.b, &mut digits_b);
                digits_a.iter_mut().for_each(|x| module.forward(x));
                digits_b.iter_mut().for_each(|x| module.forward(x));

                [&mut plus.a, &mut plus.b, &mut minus.a, &mut minus.b]
                    .into_iter()
                    .for_each(|x| x.iter_mut().for_each(|c| *c = 0));
                c_plus.external_product_ntt(module, &digits_a, &digits_b, &mut plus.a, &mut plus.b);
                c_minus.external_product_ntt(module, &digits_a, &digits_b, &mut minus.a, &mut minus.b);
                [&mut plus.a, &mut plus.b, &mut minus.a, &mut minus.b]
                    .into_iter()
                    .for_each(|x| module.backward(x));

                module.add_mul_monomial_minus_one(&mut acc.a, &plus.a, a as usize);
                module.add_mul_monomial_minus_one(&mut acc.b, &plus.b, a as usize);
                module.add_mul_monomial_minus_one(&mut acc.a, &minus.a, (two_n - a) as usize);
                module.add_mul_monomial_minus_one(&mut acc.b, &minus.b, (two_n - a) as usize);
            });
        });

        acc
    }
}
