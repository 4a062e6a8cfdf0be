use backend::{Decomposer, Module};
use sampling::source::Source;

use crate::{LWESecret, RGSWCiphertext, RLWESecret};

/// CGGI refresh key: for every key block and every LWE coordinate `i`, the pair
/// `(RGSW(s+_i), RGSW(s-_i))` of the ternary split `s = s+ - s-`.
///
/// A single-party key has one block. A multiparty key has one block per party, each
/// encrypting that party's share under the joint ring secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlindRotationKeyCGGI {
    pub(crate) keys: Vec<[RGSWCiphertext; 2]>,
    pub(crate) n_lwe: usize,
    pub(crate) dec: Decomposer,
}

fn ternary_split(s: i64) -> (i64, i64) {
    match s {
        1 => (1, 0),
        -1 => (0, 1),
        _ => (0, 0),
    }
}

impl BlindRotationKeyCGGI {
    pub fn alloc(n_lwe: usize, dec: Decomposer) -> Self {
        Self {
            keys: Vec::new(),
            n_lwe,
            dec,
        }
    }

    pub fn generate_from_sk(
        module: &Module,
        dec: Decomposer,
        sk_glwe: &RLWESecret,
        sk_lwe: &LWESecret,
        source_xa: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) -> Self {
        #[cfg(debug_assertions)]
        {
            assert!(sk_lwe.is_ternary(), "CGGI requires a ternary LWE secret");
        }
        let mut brk: BlindRotationKeyCGGI = BlindRotationKeyCGGI::alloc(sk_lwe.n(), dec);
        let digits: usize = dec.digits();
        sk_lwe.coeffs().iter().for_each(|s| {
            let (plus, minus) = ternary_split(*s);
            let mut c_plus: RGSWCiphertext = RGSWCiphertext::alloc(module.n(), digits);
            c_plus.encrypt_sk(module, &dec, sk_glwe, plus, source_xa, source_xe, sigma);
            let mut c_minus: RGSWCiphertext = RGSWCiphertext::alloc(module.n(), digits);
            c_minus.encrypt_sk(module, &dec, sk_glwe, minus, source_xa, source_xe, sigma);
            brk.keys.push([c_plus, c_minus]);
        });
        brk
    }

    /// Appends a block encrypting `sk_lwe` through `pk`, an RGSW encryption of zero under the joint secret.
    pub fn append_block_pk(
        &mut self,
        module: &Module,
        pk: &RGSWCiphertext,
        sk_lwe: &LWESecret,
        source_xu: &mut Source,
        source_xe: &mut Source,
        sigma: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(sk_lwe.n(), self.n_lwe);
            assert!(sk_lwe.is_ternary(), "CGGI requires a ternary LWE secret");
        }
        let digits: usize = self.dec.digits();
        let dec: Decomposer = self.dec;
        sk_lwe.coeffs().iter().for_each(|s| {
            let (plus, minus) = ternary_split(*s);
            let mut c_plus: RGSWCiphertext = RGSWCiphertext::alloc(module.n(), digits);
            c_plus.encrypt_pk(module, &dec, pk, plus, source_xu, source_xe, sigma);
            let mut c_minus: RGSWCiphertext = RGSWCiphertext::alloc(module.n(), digits);
            c_minus.encrypt_pk(module, &dec, pk, minus, source_xu, source_xe, sigma);
            self.keys.push([c_plus, c_minus]);
        });
    }

    pub fn n_lwe(&self) -> usize {
        self.n_lwe
    }

    pub fn blocks(&self) -> usize {
        self.keys.len() / self.n_lwe
    }

    pub fn base(&self) -> u64 {
        self.dec.base()
    }

    pub fn digits(&self) -> usize {
        self.dec.digits()
    }

    pub fn decomposer(&self) -> &Decomposer {
        &self.dec
    }
}
