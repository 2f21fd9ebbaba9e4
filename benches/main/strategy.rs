use std::time::Duration;

use criterion::{BenchmarkGroup, Criterion};
use criterion::measurement::WallTime;

use prototype_bench::Strategy;

use crate::bencher_extensions::RegistryBenchmarkGroup;

const PAYLOAD_SIZES: [usize; 3] = [1, 64 * 1024, 3 * 1024 * 1024];
const BATCH_SIZES: [usize; 3] = [1, 50, 200];

fn bench_strategy(group: &mut BenchmarkGroup<WallTime>, strategy: Strategy) {
    for payload_size in PAYLOAD_SIZES {
        for n in BATCH_SIZES {
            group.bench_batch(strategy, payload_size, n);
        }
    }
}

pub(crate) fn prototype_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prototype");
    group.sample_size(50).measurement_time(Duration::from_secs(10));
    bench_strategy(&mut group, Strategy::Prototype);
}

pub(crate) fn full_construct_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_construct");
    group.sample_size(10).measurement_time(Duration::from_secs(30));
    bench_strategy(&mut group, Strategy::FullConstruct);
}
