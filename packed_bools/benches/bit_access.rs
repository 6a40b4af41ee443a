// benches/bit_access.rs

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packed_bools::BoolVec;

fn create_bits(size: usize) -> BoolVec {
    (0..size).map(|i| i % 3 == 0).collect()
}

fn bench_individual_get(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];

    let mut group = c.benchmark_group("bit_get");
    for size in sizes {
        let bits = create_bits(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut ones = 0usize;
                for i in 0..bits.len() {
                    if black_box(bits.get(i).unwrap()) {
                        ones += 1;
                    }
                }
                ones
            });
        });
    }
    group.finish();
}

fn bench_cursor_vs_vec_bool(c: &mut Criterion) {
    let size = 100_000;
    let mut group = c.benchmark_group("iteration");

    group.bench_function("packed_cursor", |b| {
        let bits = create_bits(size);
        b.iter(|| bits.iter().filter(|&b| black_box(b)).count());
    });

    group.bench_function("vec_bool", |b| {
        let bits: Vec<bool> = (0..size).map(|i| i % 3 == 0).collect();
        b.iter(|| bits.iter().filter(|&&b| black_box(b)).count());
    });

    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let size = 100_000;
    let mut group = c.benchmark_group("population_count");

    group.bench_function("popcount_blocks", |b| {
        let bits = create_bits(size);
        b.iter(|| black_box(bits.count()));
    });

    group.bench_function("naive_vec_bool", |b| {
        let bits: Vec<bool> = (0..size).map(|i| i % 3 == 0).collect();
        b.iter(|| bits.iter().filter(|&&b| b).count());
    });

    group.finish();
}

fn bench_push_operations(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000];

    let mut group = c.benchmark_group("bit_push");
    for size in sizes {
        group.bench_with_input(
            BenchmarkId::new("without_reserve", size),
            &size,
            |b, &s| {
                b.iter(|| {
                    let mut bits = BoolVec::new();
                    for i in 0..s {
                        bits.push_back(i & 1 == 1).unwrap();
                    }
                    bits
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("with_reserve", size), &size, |b, &s| {
            b.iter(|| {
                let mut bits = BoolVec::new();
                bits.reserve(s).unwrap();
                for i in 0..s {
                    bits.push_back(i & 1 == 1).unwrap();
                }
                bits
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_individual_get,
    bench_cursor_vs_vec_bool,
    bench_count,
    bench_push_operations
);
criterion_main!(benches);
