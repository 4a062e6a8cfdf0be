use backend::{
    NttTable,
    prime::{first_prime, previous_prime},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn forward_backward(c: &mut Criterion) {
    fn runner(log_n: usize) -> impl FnMut() {
        let n: usize = 1 << log_n;
        let q: u64 = previous_prime(first_prime(54, 2 * n as u64), 2 * n as u64);
        let table: NttTable = NttTable::new(n, q);
        let mut a: Vec<u64> = (0..n as u64).collect();
        move || {
            table.forward(&mut a);
            table.backward(&mut a);
        }
    }

    let mut group = c.benchmark_group("ntt_forward_backward");
    for log_n in 9..13 {
        let mut runner = runner(log_n);
        let id: BenchmarkId = BenchmarkId::new("prime54", 1 << log_n);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }
    group.finish();
}

criterion_group!(benches, forward_backward);
criterion_main!(benches);
