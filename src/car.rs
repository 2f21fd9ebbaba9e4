use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::mem_size::HeapSize;
use crate::payload::{self, HeavyPayload};

/// The entity created by the benchmark. A car consists of a few cheap scalar
/// fields, an owned list of features, and a [HeavyPayload] which is expensive
/// to produce.
///
/// There are two ways to obtain a new car from an existing one, and their
/// difference in cost is what this crate measures.
///
/// * [Clone::clone] copies the scalar fields, creates an independent copy of
/// the features, and shares the payload of the source. This is cheap
/// regardless of the payload size.
/// * [Car::copy_construct] runs the full construction with the source's
/// field values, which generates a fresh payload. This is linear in the
/// payload size.
///
/// Equality and hashing consider the scalar fields and the features only. The
/// payload is excluded, so a clone and a copy-constructed car with the same
/// fields are equal.
///
/// # Example
///
/// ```
/// use prototype_bench::Car;
///
/// let car = Car::new("Tesla", "Model S", "Red", 2025, ["Autopilot"]);
/// let cloned = car.clone();
/// let constructed = Car::copy_construct(&car);
///
/// assert_eq!(car, cloned);
/// assert_eq!(car, constructed);
/// assert!(cloned.shares_payload_with(&car));
/// assert!(!constructed.shares_payload_with(&car));
/// ```
pub struct Car {
    make: String,
    model: String,
    color: String,
    year: i32,
    features: Vec<String>,
    payload: HeavyPayload
}

impl Car {

    /// Creates a new car from the given field values. This always generates
    /// a new payload with the current [payload_size](crate::payload_size),
    /// so it pays the full initialization cost. The features are copied into
    /// a list owned by the car.
    ///
    /// # Arguments
    ///
    /// * `make`: The manufacturer of the car.
    /// * `model`: The model name.
    /// * `color`: The color, which the benchmark customizes per instance.
    /// * `year`: The model year.
    /// * `features`: The list of features, in order.
    pub fn new<I>(make: impl Into<String>, model: impl Into<String>,
            color: impl Into<String>, year: i32, features: I) -> Car
    where
        I: IntoIterator,
        I::Item: Into<String>
    {
        Car {
            make: make.into(),
            model: model.into(),
            color: color.into(),
            year,
            features: features.into_iter().map(Into::into).collect(),
            payload: HeavyPayload::generate(payload::payload_size())
        }
    }

    /// Creates a new car with the current field values of `source` by running
    /// the full construction again. The payload of `source` is not reused.
    /// This is the baseline that prototype cloning is compared against.
    pub fn copy_construct(source: &Car) -> Car {
        Car::new(source.make.as_str(), source.model.as_str(),
            source.color.as_str(), source.year, source.features.iter().cloned())
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Gets mutable access to the feature list owned by this car. Since every
    /// car owns its features, changes are never visible in any other car.
    pub fn features_mut(&mut self) -> &mut Vec<String> {
        &mut self.features
    }

    pub fn payload(&self) -> &HeavyPayload {
        &self.payload
    }

    pub fn set_make(&mut self, make: impl Into<String>) {
        self.make = make.into();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Replaces the features of this car by a copy of the given ones.
    pub fn set_features<S: AsRef<str>>(&mut self, features: &[S]) {
        self.features = features.iter()
            .map(|feature| feature.as_ref().to_owned())
            .collect();
    }

    /// Indicates whether this car holds the same payload buffer as `other`.
    /// This is the case for a prototype and its clones, but never for cars
    /// obtained by [Car::new] or [Car::copy_construct].
    pub fn shares_payload_with(&self, other: &Car) -> bool {
        self.payload.ptr_eq(&other.payload)
    }
}

impl Clone for Car {
    fn clone(&self) -> Car {
        // The features are deep-copied, the payload handle is shared.
        Car {
            make: self.make.clone(),
            model: self.model.clone(),
            color: self.color.clone(),
            year: self.year,
            features: self.features.clone(),
            payload: self.payload.clone()
        }
    }
}

/// Counts the owned strings and features in full and the payload by its
/// share among all cars holding it.
impl HeapSize for Car {
    fn heap_size(&self) -> usize {
        self.make.heap_size() +
            self.model.heap_size() +
            self.color.heap_size() +
            self.features.heap_size() +
            self.payload.heap_size()
    }
}

impl PartialEq for Car {
    fn eq(&self, other: &Car) -> bool {
        self.year == other.year &&
            self.make == other.make &&
            self.model == other.model &&
            self.color == other.color &&
            self.features == other.features
    }
}

impl Eq for Car { }

impl Hash for Car {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.make.hash(state);
        self.model.hash(state);
        self.color.hash(state);
        self.year.hash(state);
        self.features.hash(state);
    }
}

impl Display for Car {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Car {{ make: '{}', model: '{}', color: '{}', year: {}, \
            features: [{}] }}", self.make, self.model, self.color, self.year,
            self.features.join(", "))
    }
}

impl Debug for Car {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Car")
            .field("make", &self.make)
            .field("model", &self.model)
            .field("color", &self.color)
            .field("year", &self.year)
            .field("features", &self.features)
            .field("payload", &self.payload)
            .finish()
    }
}
