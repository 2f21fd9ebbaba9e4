use std::time::Duration;

use crate::car::Car;
use crate::error::ConfigError;

/// The object counts measured by the `baseline` and `heavy` experiments.
pub const DEFAULT_SIZES: &[usize] = &[1, 50, 100, 200];

/// The object count of the warm-up run preceding every experiment.
pub const DEFAULT_WARMUP: usize = 20;

/// The field values of the prototype an experiment registers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrototypeSpec {
    pub make: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub features: Vec<String>
}

impl PrototypeSpec {

    /// Constructs the prototype with the current payload size.
    pub fn build(&self) -> Car {
        Car::new(self.make.as_str(), self.model.as_str(), self.color.as_str(),
            self.year, self.features.iter().cloned())
    }
}

/// All parameters of one experiment comparing both strategies. Presets
/// reproduce the standard runs, individual fields can be overridden
/// afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExperimentConfig {

    /// Used for log output and as prefix of the result files.
    pub name: String,

    /// The registry key under which the prototype is registered and looked
    /// up.
    pub key: String,

    /// The process-wide payload size in bytes, applied before the prototype
    /// is constructed.
    pub payload_size: usize,

    /// The strictly ascending object counts to measure.
    pub sizes: Vec<usize>,

    /// The object count of the discarded warm-up run. 0 disables warm-up.
    pub warmup: usize,

    /// An optional pause before each memory reading.
    pub settle_delay: Duration,
    pub prototype: PrototypeSpec
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|&value| value.to_owned()).collect()
}

impl ExperimentConfig {

    /// A one-byte payload, so that both strategies cost about the same. This
    /// shows the overhead floor of the technique.
    pub fn baseline() -> ExperimentConfig {
        ExperimentConfig {
            name: "baseline".to_owned(),
            key: "sedan".to_owned(),
            payload_size: 1,
            sizes: DEFAULT_SIZES.to_vec(),
            warmup: DEFAULT_WARMUP,
            settle_delay: Duration::ZERO,
            prototype: PrototypeSpec {
                make: "Toyota".to_owned(),
                model: "Camry".to_owned(),
                color: "Blue".to_owned(),
                year: 2022,
                features: owned(&["ABS", "Airbags", "Bluetooth",
                    "Cruise Control", "Lane Assist", "Backup Camera",
                    "Heated Seats", "Keyless Entry", "Sunroof",
                    "Android Auto"])
            }
        }
    }

    /// A payload of about 3 MB per full construction.
    pub fn heavy() -> ExperimentConfig {
        ExperimentConfig {
            name: "heavy".to_owned(),
            key: "ev".to_owned(),
            payload_size: 3_000_000,
            sizes: DEFAULT_SIZES.to_vec(),
            warmup: DEFAULT_WARMUP,
            settle_delay: Duration::ZERO,
            prototype: PrototypeSpec {
                make: "Tesla".to_owned(),
                model: "Model S".to_owned(),
                color: "Red".to_owned(),
                year: 2025,
                features: owned(&["Autopilot", "Glass Roof", "Premium Sound"])
            }
        }
    }

    /// Same as [ExperimentConfig::heavy], but skips the single-object run to
    /// amplify the difference.
    pub fn secondary() -> ExperimentConfig {
        ExperimentConfig {
            name: "secondary".to_owned(),
            sizes: vec![50, 100, 200],
            ..ExperimentConfig::heavy()
        }
    }

    /// Checks that the object counts are non-empty, positive, and strictly
    /// ascending.
    ///
    /// # Example
    ///
    /// ```
    /// use prototype_bench::{ConfigError, ExperimentConfig};
    ///
    /// let mut config = ExperimentConfig::heavy();
    /// assert_eq!(Ok(()), config.validate());
    ///
    /// config.sizes = vec![100, 50];
    /// assert_eq!(Err(ConfigError::NotAscending { previous: 100, next: 50 }),
    ///     config.validate());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }

        if self.sizes.contains(&0) {
            return Err(ConfigError::ZeroSize);
        }

        for pair in self.sizes.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NotAscending {
                    previous: pair[0],
                    next: pair[1]
                });
            }
        }

        Ok(())
    }
}
