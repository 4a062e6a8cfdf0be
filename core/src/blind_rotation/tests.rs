use backend::{
    Decomposer, Module,
    prime::{first_prime, previous_prime},
};
use sampling::{distributions::SecretDistribution, source::Source};

use crate::{
    BlindRotationKeyCGGI, LWECiphertext, LWESecret, LWESwitchingKey, LookUpTable, RLWESecret, functional_bootstrap,
};

struct Fixture {
    module: Module,
    brk: BlindRotationKeyCGGI,
    ksk: LWESwitchingKey,
    sk: LWESecret,
    q: u64,
    source_xa: Source,
    source_xe: Source,
}

fn fixture() -> Fixture {
    let n_glwe: usize = 256;
    let n_lwe: usize = 16;
    let log_base: usize = 7;
    let base_ks: u64 = 16;
    let q_ks: u64 = 1 << 20;
    let sigma: f64 = 3.19;
    let big_q: u64 = previous_prime(first_prime(27, 2 * n_glwe as u64), 2 * n_glwe as u64);

    let mut source_xs: Source = Source::new([0u8; 32]);
    let mut source_xa: Source = Source::new([1u8; 32]);
    let mut source_xe: Source = Source::new([2u8; 32]);

    let module: Module = Module::new(n_glwe, big_q);
    let sk: LWESecret = LWESecret::generate(n_lwe, SecretDistribution::UniformTernary, sigma, &mut source_xs);
    let sk_glwe: LWESecret = LWESecret::generate(n_glwe, SecretDistribution::UniformTernary, sigma, &mut source_xs);
    let z: RLWESecret = RLWESecret::from_lwe(&module, &sk_glwe);

    let brk: BlindRotationKeyCGGI = BlindRotationKeyCGGI::generate_from_sk(
        &module,
        Decomposer::new(big_q, log_base),
        &z,
        &sk,
        &mut source_xa,
        &mut source_xe,
        sigma,
    );
    let ksk: LWESwitchingKey =
        LWESwitchingKey::generate(&sk_glwe, &sk, base_ks, q_ks, &mut source_xa, &mut source_xe, sigma);

    Fixture {
        module,
        brk,
        ksk,
        sk,
        q: 2 * n_glwe as u64,
        source_xa,
        source_xe,
    }
}

#[test]
fn sign_bootstrap() {
    let mut f: Fixture = fixture();
    let big_q: u64 = f.module.q();
    let q: u64 = f.q;
    let lut: LookUpTable = LookUpTable::from_fn(&f.module, q, |_| big_q / 8);
    assert_eq!(f.brk.blocks(), 1);

    (0..4u64).for_each(|m| {
        let mut ct: LWECiphertext = LWECiphertext::alloc(f.sk.n(), q);
        ct.encrypt_sk(&f.sk, m, 4, &mut f.source_xa, &mut f.source_xe, 3.19);
        ct.add_constant(q / 8);
        let res: LWECiphertext = functional_bootstrap(&f.module, &f.brk, &f.ksk, &ct, &lut, big_q / 8, q);
        assert_eq!(res.modulus(), q);
        assert_eq!(res.n(), f.sk.n());
        assert_eq!(res.decrypt(&f.sk, 4), (m < 2) as u64, "m={}", m);
    });
}

#[test]
fn negacyclic_lookup() {
    let mut f: Fixture = fixture();
    let big_q: u64 = f.module.q();
    let q: u64 = f.q;
    let p: u64 = 8;
    let lut: LookUpTable = LookUpTable::from_fn(&f.module, q, |x| (x * p / q) * (big_q / p));

    (0..p).for_each(|m| {
        let mut ct: LWECiphertext = LWECiphertext::alloc(f.sk.n(), q);
        ct.encrypt_sk(&f.sk, m, p, &mut f.source_xa, &mut f.source_xe, 3.19);
        ct.add_constant(q / (2 * p));
        let res: LWECiphertext = functional_bootstrap(&f.module, &f.brk, &f.ksk, &ct, &lut, 0, q);
        let want: u64 = if m < p / 2 { m } else { (p - (m - p / 2)) % p };
        assert_eq!(res.decrypt(&f.sk, p), want, "m={}", m);
    });
}
