use backend::Module;

use crate::{BlindRotationKeyCGGI, LWECiphertext, LWESwitchingKey, LookUpTable, RLWECiphertext};

/// Evaluates `lut` on the phase of `ct` and returns the result at modulus `q_out` under the small secret.
///
/// Blind rotation, sample extraction, `offset` added to the extracted body, modulus switch to
/// the key-switching modulus, key switch from `N` to `n`, modulus switch to `q_out`.
pub fn functional_bootstrap(
    module: &Module,
    brk: &BlindRotationKeyCGGI,
    ksk: &LWESwitchingKey,
    ct: &LWECiphertext,
    lut: &LookUpTable,
    offset: u64,
    q_out: u64,
) -> LWECiphertext {
    let acc: RLWECiphertext = brk.blind_rotate(module, lut, ct);
    let mut extracted: LWECiphertext = acc.sample_extract(module);
    extracted.add_constant(offset);
    let switched: LWECiphertext = ksk.keyswitch(&extracted.mod_switch(ksk.modulus()));
    switched.mod_switch(q_out)
}
