use std::fmt::{self, Display, Formatter};
use std::hash::BuildHasher;
use std::hint;
use std::thread;
use std::time::{Duration, Instant};

use crate::car::Car;
use crate::config::ExperimentConfig;
use crate::error::{BenchError, RegistryError, RegistryResult};
use crate::mem_size::MemSize;
use crate::payload;
use crate::probe::MemoryProbe;
use crate::registry::PrototypeRegistry;

/// The two ways of producing cars that are compared.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strategy {

    /// Every car is a clone of the registered prototype, obtained via
    /// [PrototypeRegistry::get_clone].
    Prototype,

    /// Every car is created by [Car::copy_construct] from the registered
    /// prototype, paying the full initialization cost.
    FullConstruct
}

impl Strategy {

    /// Both strategies, in the order in which they are measured.
    pub const ALL: [Strategy; 2] = [Strategy::Prototype, Strategy::FullConstruct];

    /// The name used in tables and CSV headers.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Prototype => "Prototype",
            Strategy::FullConstruct => "Constructor"
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The cost of producing one batch of cars.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Measurement {

    /// The wall-clock time spent producing the batch.
    pub elapsed: Duration,

    /// The growth of heap usage reported by the harness's [MemoryProbe]
    /// while the batch was alive, clamped at 0.
    pub memory_bytes: usize,

    /// The structural footprint of the batch according to [MemSize], where
    /// a shared payload is split among its holders.
    pub estimated_bytes: usize
}

impl Measurement {

    /// The elapsed time in milliseconds.
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// The memory delta in KiB.
    pub fn kib(&self) -> f64 {
        self.memory_bytes as f64 / 1024.0
    }
}

/// Creates `n` cars with the given strategy from the prototype registered
/// under `key`. Each car gets `#<i>` appended to its color, where `i` is its
/// index in the batch.
///
/// # Errors
///
/// [RegistryError::NotFound] if no prototype is registered under `key`,
/// for either strategy. No car is created in this case.
pub fn produce_batch<S>(registry: &PrototypeRegistry<S>, key: &str,
        strategy: Strategy, n: usize) -> RegistryResult<Vec<Car>>
where
    S: BuildHasher
{
    let prototype = registry.prototype(key)
        .ok_or_else(|| RegistryError::NotFound {
            key: key.to_owned()
        })?;
    let mut cars = Vec::with_capacity(n);

    for i in 0..n {
        let mut car = match strategy {
            Strategy::Prototype => registry.get_clone(key)?,
            Strategy::FullConstruct => Car::copy_construct(prototype)
        };
        let color = format!("{}#{}", car.color(), i);
        car.set_color(color);
        cars.push(car);
    }

    Ok(cars)
}

/// Runs both strategies against a [PrototypeRegistry] and measures time and
/// memory per batch. Runs are strictly sequential. The harness owns its
/// registry, so prototypes cannot change behind its back during a run.
///
/// # Example
///
/// ```
/// use prototype_bench::{Car, Harness, PrototypeRegistry, Strategy};
///
/// let mut registry = PrototypeRegistry::new();
/// registry.register("ev", Car::new("Tesla", "Model S", "Red", 2025, ["F"]));
///
/// let harness = Harness::new(registry, "ev", ());
/// let prototype = harness.run(Strategy::Prototype, 5).unwrap();
/// let constructed = harness.run(Strategy::FullConstruct, 5).unwrap();
///
/// assert!(prototype.estimated_bytes < constructed.estimated_bytes);
/// ```
#[derive(Debug)]
pub struct Harness<P = ()> {
    registry: PrototypeRegistry,
    key: String,
    probe: P,
    settle_delay: Duration
}

impl<P: MemoryProbe> Harness<P> {

    /// Creates a new harness producing cars from the prototype registered
    /// under `key` and reading memory usage from `probe`.
    pub fn new(registry: PrototypeRegistry, key: impl Into<String>, probe: P)
            -> Harness<P> {
        Harness {
            registry,
            key: key.into(),
            probe,
            settle_delay: Duration::ZERO
        }
    }

    /// Sets a pause applied before each memory reading. This is only useful
    /// for probes that observe memory asynchronously.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Harness<P> {
        self.settle_delay = settle_delay;
        self
    }

    pub fn registry(&self) -> &PrototypeRegistry {
        &self.registry
    }

    /// Gets mutable access to the registry between runs, for example to
    /// modify the prototype.
    pub fn registry_mut(&mut self) -> &mut PrototypeRegistry {
        &mut self.registry
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn settle(&self) {
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }

    /// Produces `n` cars with the given strategy and measures the elapsed
    /// time and the memory held by the batch. The batch is dropped before
    /// this method returns.
    ///
    /// # Errors
    ///
    /// [RegistryError::NotFound] if the harness key is not registered. The
    /// run is aborted without producing a measurement.
    pub fn run(&self, strategy: Strategy, n: usize)
            -> RegistryResult<Measurement> {
        self.settle();
        let before = self.probe.used_bytes();
        let start = Instant::now();
        let cars = produce_batch(&self.registry, &self.key, strategy, n)?;
        let elapsed = start.elapsed();

        self.settle();
        let after = self.probe.used_bytes();
        let cars = hint::black_box(cars);
        let estimated_bytes = cars.mem_size();
        drop(cars);

        let measurement = Measurement {
            elapsed,
            memory_bytes: after.saturating_sub(before),
            estimated_bytes
        };

        tracing::debug!(%strategy, n, elapsed_ms = measurement.millis(),
            memory_bytes = measurement.memory_bytes,
            estimated_bytes, "measured batch");

        Ok(measurement)
    }

    /// Runs both strategies once with `n` objects and discards the results.
    pub fn warm_up(&self, n: usize) -> RegistryResult<()> {
        for strategy in Strategy::ALL {
            self.run(strategy, n)?;
        }

        Ok(())
    }

    /// Measures both strategies for the given object count, prototype first.
    pub fn compare(&self, n: usize) -> RegistryResult<Sample> {
        let prototype = self.run(Strategy::Prototype, n)?;
        let construct = self.run(Strategy::FullConstruct, n)?;

        Ok(Sample {
            n,
            prototype,
            construct
        })
    }
}

/// The measurements of both strategies for one object count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sample {
    pub n: usize,
    pub prototype: Measurement,
    pub construct: Measurement
}

impl Sample {

    /// Gets the measurement of the given strategy.
    pub fn measurement(&self, strategy: Strategy) -> &Measurement {
        match strategy {
            Strategy::Prototype => &self.prototype,
            Strategy::FullConstruct => &self.construct
        }
    }
}

/// One `(N, time, memory)` triple of a strategy's series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub n: usize,
    pub millis: f64,
    pub kib: f64
}

/// The result of [run_experiment]: one [Sample] per configured object
/// count, in ascending order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExperimentReport {
    pub name: String,
    pub payload_size: usize,
    pub samples: Vec<Sample>
}

impl ExperimentReport {

    /// Gets the `(N, time, memory)` triples of the given strategy, which is
    /// the data handed to any presentation of the results.
    pub fn series(&self, strategy: Strategy) -> Vec<SeriesPoint> {
        self.samples.iter()
            .map(|sample| {
                let measurement = sample.measurement(strategy);

                SeriesPoint {
                    n: sample.n,
                    millis: measurement.millis(),
                    kib: measurement.kib()
                }
            })
            .collect()
    }
}

/// Runs a complete experiment. The payload size is set first, then the
/// prototype is constructed and registered, both strategies are warmed up,
/// and finally each configured object count is measured.
///
/// # Errors
///
/// * [BenchError::Config] if the configuration is invalid.
/// * [BenchError::Registry] if a run fails to obtain its prototype.
///
/// There are no partial results in either case.
pub fn run_experiment<P>(config: &ExperimentConfig, probe: P)
    -> Result<ExperimentReport, BenchError>
where
    P: MemoryProbe
{
    config.validate()?;
    payload::set_payload_size(config.payload_size);
    tracing::info!(experiment = %config.name,
        payload_size = config.payload_size, sizes = ?config.sizes,
        "starting experiment");

    let mut registry = PrototypeRegistry::new();
    registry.register(config.key.as_str(), config.prototype.build());
    let harness = Harness::new(registry, config.key.as_str(), probe)
        .with_settle_delay(config.settle_delay);

    if config.warmup > 0 {
        harness.warm_up(config.warmup)?;
    }

    let mut samples = Vec::with_capacity(config.sizes.len());

    for &n in &config.sizes {
        let sample = harness.compare(n)?;

        tracing::info!(n,
            prototype_ms = sample.prototype.millis(),
            prototype_kib = sample.prototype.kib(),
            construct_ms = sample.construct.millis(),
            construct_kib = sample.construct.kib(),
            "measured sample");
        samples.push(sample);
    }

    Ok(ExperimentReport {
        name: config.name.clone(),
        payload_size: config.payload_size,
        samples
    })
}
