use hashbrown::HashMap;
use hashbrown::hash_map::DefaultHashBuilder;

use std::fmt::{self, Debug, Formatter};
use std::hash::BuildHasher;

use crate::car::Car;
use crate::error::{RegistryError, RegistryResult};

/// A keyed store of prototype [Car]s from which independent clones can be
/// obtained. Registration and lookup both have average-case complexity in
/// O(1).
///
/// The registry takes ownership of every registered prototype. It does not
/// copy it, and no one else keeps a handle to it. The prototype can still be
/// modified in place using [PrototypeRegistry::prototype_mut], in which case
/// every subsequent clone reflects the modification.
///
/// # Example
///
/// ```
/// use prototype_bench::{Car, PrototypeRegistry};
///
/// let mut registry = PrototypeRegistry::new();
/// registry.register("ev", Car::new("Tesla", "Model S", "Red", 2025,
///     ["Autopilot", "Glass Roof"]));
///
/// let first = registry.get_clone("ev").unwrap();
/// let second = registry.get_clone("ev").unwrap();
///
/// assert_eq!(first, second);
/// assert!(first.shares_payload_with(&second));
/// assert!(registry.get_clone("sedan").is_err());
/// ```
pub struct PrototypeRegistry<S = DefaultHashBuilder> {
    prototypes: HashMap<String, Car, S>
}

impl PrototypeRegistry {

    /// Creates a new, empty registry.
    pub fn new() -> PrototypeRegistry {
        PrototypeRegistry::with_hasher(DefaultHashBuilder::default())
    }
}

impl Default for PrototypeRegistry {
    fn default() -> PrototypeRegistry {
        PrototypeRegistry::new()
    }
}

impl<S> PrototypeRegistry<S> {

    /// Creates a new, empty registry which will use the given hash builder to
    /// hash keys.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use prototype_bench::PrototypeRegistry;
    ///
    /// let registry = PrototypeRegistry::with_hasher(RandomState::new());
    /// assert!(registry.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> PrototypeRegistry<S> {
        PrototypeRegistry {
            prototypes: HashMap::with_hasher(hash_builder)
        }
    }

    /// Gets the number of registered prototypes.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Creates an iterator over the keys of all registered prototypes in
    /// arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.prototypes.keys().map(String::as_str)
    }
}

impl<S: BuildHasher> PrototypeRegistry<S> {

    /// Registers `prototype` under the given key, transferring ownership to
    /// the registry. Any prototype previously registered under the same key
    /// is replaced and returned.
    ///
    /// # Arguments
    ///
    /// * `key`: The key under which clones can be requested.
    /// * `prototype`: The car to use as template for clones.
    ///
    /// # Example
    ///
    /// ```
    /// use prototype_bench::{Car, PrototypeRegistry};
    ///
    /// let mut registry = PrototypeRegistry::new();
    /// let blue = Car::new("Toyota", "Camry", "Blue", 2022, ["ABS"]);
    /// let red = Car::new("Toyota", "Camry", "Red", 2022, ["ABS"]);
    ///
    /// assert!(registry.register("sedan", blue).is_none());
    /// assert_eq!(Some("Blue"),
    ///     registry.register("sedan", red).as_ref().map(|c| c.color()));
    /// assert_eq!("Red", registry.get_clone("sedan").unwrap().color());
    /// ```
    pub fn register(&mut self, key: impl Into<String>, prototype: Car)
            -> Option<Car> {
        self.prototypes.insert(key.into(), prototype)
    }

    /// Creates a fresh clone of the prototype registered under the given
    /// key. The clone shares the prototype's payload, but owns its features,
    /// so no two calls ever return cars with shared mutable state.
    ///
    /// # Errors
    ///
    /// [RegistryError::NotFound] if no prototype is registered under `key`.
    pub fn get_clone(&self, key: &str) -> RegistryResult<Car> {
        self.prototype(key)
            .map(Car::clone)
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_owned()
            })
    }

    /// Gets a reference to the prototype registered under the given key
    /// without cloning it.
    pub fn prototype(&self, key: &str) -> Option<&Car> {
        self.prototypes.get(key)
    }

    /// Gets mutable access to the prototype registered under the given key.
    /// Modifications apply to all clones requested afterwards, but never to
    /// clones obtained before.
    pub fn prototype_mut(&mut self, key: &str) -> Option<&mut Car> {
        self.prototypes.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.prototypes.contains_key(key)
    }
}

impl<S> Debug for PrototypeRegistry<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.prototypes.iter())
            .finish()
    }
}
