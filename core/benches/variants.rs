use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ctr_core::constants::test_vectors::{IV, KEY_128};
use ctr_core::crypto::{sequential_transform, CipherSession};
use ctr_core::engine::Variant;
use ctr_core::utils::random_bytes;

const LEN: usize = 4 * 1024 * 1024;

fn bench_variants(c: &mut Criterion) {
    let workers = num_cpus::get().clamp(1, 8);
    let mut data = random_bytes(LEN, 7);

    let mut group = c.benchmark_group("ctr_4mib");
    group.throughput(Throughput::Bytes(LEN as u64));
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
            sequential_transform(&mut session, black_box(&mut data));
        })
    });

    for variant in Variant::ALL {
        group.bench_with_input(BenchmarkId::new(variant.label(), workers), &workers, |b, &w| {
            b.iter(|| {
                let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
                variant.transform_with_workers(&mut session, black_box(&mut data), w).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
