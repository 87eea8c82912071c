//! BN254 scalar field FFT benchmarks

use bn254::{Bn254, Scalar};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use primefield::{Buffer, Field};

fn bench_fft(c: &mut Criterion) {
    let bn = Bn254::from_name("BN254").unwrap();
    let fr = *bn.fr();

    let mut group = c.benchmark_group("Fr FFT");
    group.sample_size(10);
    for log_n in [10, 14, 18] {
        let n = 1usize << log_n;
        let domain = bn.domain(n).unwrap();
        let coeffs: Buffer<Scalar> = (1..=n as u64).map(|i| fr.from_u64(i)).collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fft", n), &coeffs, |b, coeffs| {
            b.iter_batched_ref(
                || coeffs.clone(),
                |values| domain.fft(bn.pool(), values),
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("ifft", n), &coeffs, |b, coeffs| {
            b.iter_batched_ref(
                || coeffs.clone(),
                |values| domain.ifft(bn.pool(), values),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fft);
criterion_main!(benches);
