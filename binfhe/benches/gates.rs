use std::hint::black_box;

use binfhe::{BinFheContext, BinFheMethod, BinGate, CryptoParams, KeyGenMode, LWECiphertext, LWESecret, ParamSet};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn setup(set: ParamSet) -> (BinFheContext, LWESecret) {
    let mut ctx: BinFheContext =
        match BinFheContext::with_seed(CryptoParams::from_param_set(set, BinFheMethod::Ginx, 1), [0u8; 32]) {
            Ok(ctx) => ctx,
            Err(err) => panic!("context setup failed: {err}"),
        };
    let sk: LWESecret = ctx.key_gen();
    if let Err(err) = ctx.bt_key_gen(&sk, KeyGenMode::SymEncrypt) {
        panic!("bootstrapping key generation failed: {err}");
    }
    (ctx, sk)
}

fn encrypt_bit(ctx: &mut BinFheContext, sk: &LWESecret, m: u64) -> LWECiphertext {
    match ctx.encrypt(sk, m, 4, None) {
        Ok(ct) => ct,
        Err(err) => panic!("encryption failed: {err}"),
    }
}

fn bench_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_bin_gate");
    group.sample_size(10);

    for set in [ParamSet::Toy, ParamSet::Std128] {
        let (mut ctx, sk) = setup(set);
        let ct1: LWECiphertext = encrypt_bit(&mut ctx, &sk, 1);
        let ct2: LWECiphertext = encrypt_bit(&mut ctx, &sk, 0);

        for gate in [BinGate::And, BinGate::Xor] {
            let id: BenchmarkId = BenchmarkId::new(format!("{:?}", gate), set);
            group.bench_with_input(id, &(), |b, _| {
                b.iter(|| black_box(ctx.eval_bin_gate(gate, &ct1, &ct2)))
            });
        }
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(10);
    let (mut ctx, sk) = setup(ParamSet::Toy);
    let ct: LWECiphertext = encrypt_bit(&mut ctx, &sk, 1);
    group.bench_function("TOY", |b| b.iter(|| black_box(ctx.bootstrap(&ct))));
    group.finish();
}

criterion_group!(benches, bench_gates, bench_bootstrap);
criterion_main!(benches);
