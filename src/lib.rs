//! This crate measures what it costs to create many instances of a value
//! whose initialization is expensive, comparing two strategies. Either each
//! instance is cloned from a prototype kept in a [PrototypeRegistry], or it is
//! built from scratch using [Car::copy_construct].
//!
//! The expensive part of a [Car] is its [HeavyPayload], a large immutable
//! buffer. A clone shares the payload of its prototype and only copies the
//! small fields, while every full construction generates a new payload. The
//! [Harness] produces batches of N cars with either strategy and records the
//! elapsed time and the memory held by the batch.
//!
//! # Motivating example
//!
//! Suppose a configurator hands out many slightly customized copies of a few
//! base vehicles. Each base vehicle carries expensive, read-only data. Cloning
//! a registered prototype keeps that data shared, while the customizable
//! fields stay independent per copy.
//!
//! ```
//! use prototype_bench::{Car, PrototypeRegistry};
//!
//! let mut registry = PrototypeRegistry::new();
//! registry.register("sedan", Car::new("Toyota", "Camry", "Blue", 2022,
//!     ["ABS", "Airbags"]));
//!
//! let mut first = registry.get_clone("sedan").unwrap();
//! let second = registry.get_clone("sedan").unwrap();
//! first.features_mut().push("Sunroof".to_owned());
//! first.set_color("Blue#0");
//!
//! assert_eq!(2, second.features().len());
//! assert_eq!("Blue", second.color());
//! assert!(first.shares_payload_with(&second));
//! ```
//!
//! To run a complete comparison over several object counts, see
//! [run_experiment] and the presets of [ExperimentConfig].

mod car;
mod config;
mod error;
mod harness;
mod mem_size;
mod payload;
mod probe;
mod registry;

pub mod chart;
pub mod loc;
pub mod report;


pub use car::Car;
pub use config::{DEFAULT_SIZES, DEFAULT_WARMUP, ExperimentConfig, PrototypeSpec};
pub use error::{
    BenchError,
    ConfigError,
    RegistryError,
    RegistryResult,
    ReportError,
    ReportResult
};
pub use harness::{
    ExperimentReport,
    Harness,
    Measurement,
    Sample,
    SeriesPoint,
    Strategy,
    produce_batch,
    run_experiment
};
pub use mem_size::{HeapSize, MemSize};
pub use payload::{
    DEFAULT_PAYLOAD_SIZE,
    HeavyPayload,
    payload_size,
    set_payload_size
};
pub use probe::{DhatProbe, MemoryProbe};
pub use registry::PrototypeRegistry;
