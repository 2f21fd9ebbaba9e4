use std::time::{Duration, Instant};

use criterion::Criterion;

use prototype_bench::PrototypeRegistry;

use rand::{Rng, SeedableRng};

use rand_xoshiro::Xoshiro256PlusPlus;

use crate::bencher_extensions::{self, RegistryBenchmarkGroup};

const NUM_CLONES: usize = 1000;

fn run_get_clone_benchmark(registry: &PrototypeRegistry, keys: &[String],
        rng: &mut Xoshiro256PlusPlus) {
    for _ in 0..NUM_CLONES {
        let key_index = rng.gen_range(0..keys.len());
        registry.get_clone(&keys[key_index]).unwrap();
    }
}

pub(crate) fn get_clone_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_clone");
    let mut rng = Xoshiro256PlusPlus::from_seed(rand::thread_rng().gen());
    group.sample_size(100).measurement_time(Duration::from_secs(10));

    for count in [1, 16, 256, 4096] {
        group.bench_with_registry(
            |registry, keys| run_get_clone_benchmark(registry, keys, &mut rng),
            count);
    }
}

pub(crate) fn register_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");
    let mut rng = Xoshiro256PlusPlus::from_seed(rand::thread_rng().gen());
    let prototype = bencher_extensions::prepare_registry(1024)
        .get_clone(bencher_extensions::KEY)
        .unwrap();
    group.sample_size(100).measurement_time(Duration::from_secs(10));

    group.bench_function("1000 prototypes", |b| b.iter_custom(|iter_count| {
        let mut total = Duration::ZERO;

        for _ in 0..iter_count {
            let mut registry = PrototypeRegistry::new();
            let keys = (0..NUM_CLONES)
                .map(|_| format!("{:016x}", rng.gen::<u64>()))
                .collect::<Vec<_>>();

            let start = Instant::now();

            for key in keys {
                registry.register(key, prototype.clone());
            }

            total += start.elapsed();
        }

        total
    }));
}
