use std::hint;
use std::time::{Duration, Instant};

use criterion::BenchmarkGroup;
use criterion::measurement::WallTime;

use prototype_bench::{
    Car,
    PrototypeRegistry,
    Strategy,
    produce_batch,
    set_payload_size
};

pub(crate) const KEY: &str = "ev";

/// Creates a registry holding a single prototype under [KEY], whose payload
/// has the given size.
pub(crate) fn prepare_registry(payload_size: usize) -> PrototypeRegistry {
    set_payload_size(payload_size);
    let mut registry = PrototypeRegistry::new();
    registry.register(KEY, Car::new("Tesla", "Model S", "Red", 2025,
        ["Autopilot", "Glass Roof", "Premium Sound"]));
    registry
}

/// A trait with registry-related extensions for [BenchmarkGroup].
pub(crate) trait RegistryBenchmarkGroup {

    /// Benchmarks producing batches of `n` cars with the given `strategy` from
    /// a prototype with a payload of `payload_size` bytes. Only the
    /// production is timed, dropping each batch is excluded.
    fn bench_batch(&mut self, strategy: Strategy, payload_size: usize,
        n: usize);

    /// Benchmarks the given `routine`, which is supplied with the same
    /// registry holding `count` prototypes on each iteration. As a second
    /// argument, a slice of all registered keys is provided.
    fn bench_with_registry<O, R>(&mut self, routine: R, count: usize)
    where
        R: FnMut(&PrototypeRegistry, &[String]) -> O;
}

impl<'a> RegistryBenchmarkGroup for BenchmarkGroup<'a, WallTime> {

    fn bench_batch(&mut self, strategy: Strategy, payload_size: usize,
            n: usize) {
        let id = format!("{}/N={}", crate::get_id(payload_size), n);
        let registry = prepare_registry(payload_size);

        self.bench_function(id, |group| group.iter_custom(|iter_count| {
            let mut total = Duration::ZERO;

            for _ in 0..iter_count {
                let start = Instant::now();
                let cars = produce_batch(&registry, KEY, strategy, n).unwrap();
                total += start.elapsed();
                drop(hint::black_box(cars));
            }

            total
        }));
    }

    fn bench_with_registry<O, R>(&mut self, mut routine: R, count: usize)
    where
        R: FnMut(&PrototypeRegistry, &[String]) -> O
    {
        let id = format!("{} prototypes", count);
        let mut registry = prepare_registry(1024);
        let prototype = registry.get_clone(KEY).unwrap();

        for i in registry.len()..count {
            registry.register(format!("{:016x}", i), prototype.clone());
        }

        let keys = registry.keys().map(str::to_owned).collect::<Vec<_>>();

        self.bench_function(id, |group| group.iter(|| routine(&registry, &keys)));
    }
}
