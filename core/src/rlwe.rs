use std::fmt;

use backend::{
    Module, Modulus,
    sampling::{AddNormal, FillUniform},
};
use sampling::source::Source;

use crate::{LWECiphertext, LWESecret};

/// Ring secret `z`, kept both as signed coefficients and in the NTT domain.
#[derive(Clone)]
pub struct RLWESecret {
    pub(crate) coeffs: Vec<i64>,
    pub(crate) ntt: Vec<u64>,
}

impl fmt::Debug for RLWESecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RLWESecret")
            .field("n", &self.n())
            .finish_non_exhaustive()
    }
}

impl RLWESecret {
    /// Interprets a secret of dimension `N` as the coefficients of `z`.
    pub fn from_lwe(module: &Module, sk: &LWESecret) -> Self {
        #[cfg(debug_assertions)]
        {
            assert_eq!(sk.n(), module.n());
        }
        let q: &Modulus = module.modulus();
        let mut ntt: Vec<u64> = sk.data.iter().map(|x| q.from_i64(*x)).collect();
        module.forward(&mut ntt);
        Self {
            coeffs: sk.data.clone(),
            ntt,
        }
    }

    pub fn n(&self) -> usize {
        self.coeffs.len()
    }
}

/// RLWE ciphertext `(A, B = A z + M + E)` in the coefficient domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RLWECiphertext {
    pub(crate) a: Vec<u64>,
    pub(crate) b: Vec<u64>,
}

impl RLWECiphertext {
    pub fn alloc(n: usize) -> Self {
        Self {
            a: vec![0; n],
            b: vec![0; n],
        }
    }

    pub fn n(&self) -> usize {
        self.b.len()
    }

    pub fn encrypt_sk(
        &mut self,
        module: &Module,
        sk: &RLWESecret,
        m: &[u64],
        source_xa: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        let q: &Modulus = module.modulus();
        self.a.fill_uniform(q, source_xa);
        let mut tmp: Vec<u64> = self.a.clone();
        module.forward(&mut tmp);
        let mut az: Vec<u64> = module.new_poly();
        module.mul_ntt(&mut az, &tmp, &sk.ntt);
        module.backward(&mut az);
        self.b.copy_from_slice(&az);
        module.add_inplace(&mut self.b, m);
        self.b.add_normal(q, source_xe, sigma);
    }

    /// `B - A z` in the coefficient domain.
    pub fn phase(&self, module: &Module, sk: &RLWESecret) -> Vec<u64> {
        let mut tmp: Vec<u64> = self.a.clone();
        module.forward(&mut tmp);
        let mut az: Vec<u64> = module.new_poly();
        module.mul_ntt(&mut az, &tmp, &sk.ntt);
        module.backward(&mut az);
        let mut res: Vec<u64> = self.b.clone();
        module.sub_inplace(&mut res, &az);
        res
    }

    /// LWE encryption of the constant coefficient under the coefficients of `z`.
    pub fn sample_extract(&self, module: &Module) -> LWECiphertext {
        let q: &Modulus = module.modulus();
        let n: usize = self.n();
        let mut a: Vec<u64> = vec![0; n];
        a[0] = self.a[0];
        (1..n).for_each(|j| a[j] = q.neg(self.a[n - j]));
        LWECiphertext {
            a,
            b: self.b[0],
            modulus: q.q(),
        }
    }
}
