mod multiparty;

use std::sync::{
    OnceLock,
    atomic::{AtomicU64, Ordering},
};

use backend::prime::{first_prime, previous_prime};
use binfhe_core::{LWECiphertext, LWESecret};
use sampling::source::Source;

use crate::{BinFheContext, BinFheMethod, CryptoParams, KeyGenMode, ParamSet};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Context with generated bootstrapping keys, shared across tests.
pub(crate) struct Fixture {
    pub ctx: BinFheContext,
    pub sk: LWESecret,
}

static SEEDS: AtomicU64 = AtomicU64::new(1);

fn fresh_source() -> Source {
    let mut seed: [u8; 32] = [0u8; 32];
    seed[..8].copy_from_slice(&SEEDS.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    Source::new(seed)
}

impl Fixture {
    fn new(params: CryptoParams) -> Self {
        init_tracing();
        let mut ctx: BinFheContext = BinFheContext::with_seed(params, [0u8; 32]).unwrap();
        let sk: LWESecret = ctx.key_gen();
        ctx.bt_key_gen(&sk, KeyGenMode::SymEncrypt).unwrap();
        Self { ctx, sk }
    }

    /// Encrypts `m mod p` at `(n, modulus)` without touching the shared context.
    pub fn encrypt_at(&self, m: u64, p: u64, modulus: u64) -> LWECiphertext {
        let mut source_xa: Source = fresh_source();
        let mut source_xe: Source = fresh_source();
        let mut ct: LWECiphertext = LWECiphertext::alloc(self.sk.n(), modulus);
        ct.encrypt_sk(&self.sk, m, p, &mut source_xa, &mut source_xe, self.ctx.params().lwe.sigma);
        ct
    }

    pub fn encrypt_bit(&self, bit: u64) -> LWECiphertext {
        self.encrypt_at(bit, 4, self.ctx.params().lwe.q)
    }

    pub fn decrypt(&self, ct: &LWECiphertext, p: u64) -> u64 {
        self.ctx.decrypt(&self.sk, ct, p).unwrap()
    }
}

/// Named `TOY`: `n = 64`, `N = 512`, `q = 512`.
pub(crate) fn toy() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| Fixture::new(CryptoParams::from_param_set(ParamSet::Toy, BinFheMethod::Ginx, 1)))
}

/// Security `TOY` with `logQ = 11` for arbitrary functions: `n = 32`, `N = q = 1024`.
pub(crate) fn arb_func() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        Fixture::new(CryptoParams::from_security(ParamSet::Toy, true, 11, 0, BinFheMethod::Ginx, false).unwrap())
    })
}

/// Security `TOY` with `logQ = 20` and multi-base keys: `n = 32`, `N = 2048`, `q = 4096`.
pub(crate) fn multi_base() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        Fixture::new(CryptoParams::from_security(ParamSet::Toy, false, 20, 0, BinFheMethod::Ginx, true).unwrap())
    })
}

/// Small explicit parameters for tests that need a private, mutable context.
pub(crate) fn small_params(method: BinFheMethod) -> CryptoParams {
    let big_q: u64 = previous_prime(first_prime(27, 512), 512);
    CryptoParams::explicit(16, 256, 512, big_q, 3.19, 32, 1 << 7, 23, method)
}
