use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hashbench::{BenchConfig, Benchmarks, FreshUnitPolicy, PooledUnitPolicy};

fn criterion_benchmark(c: &mut Criterion) {
    let mut suite = Benchmarks::new(BenchConfig::default())
        .expect("default benchmark configuration is valid");

    let mut group = c.benchmark_group("SHA1Initialization");

    group.bench_function(FreshUnitPolicy::NAME, |b| {
        b.iter(|| {
            black_box(
                suite
                    .new_hash_algorithm_per_row()
                    .expect("fresh-unit run failed"),
            )
        })
    });

    group.bench_function(PooledUnitPolicy::NAME, |b| {
        b.iter(|| {
            black_box(suite.using_object_pool().expect("pooled run failed"))
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
