use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The payload size in bytes used by [Car::new](crate::Car::new) unless
/// [set_payload_size] was called before.
pub const DEFAULT_PAYLOAD_SIZE: usize = 1_000_000;

static PAYLOAD_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_PAYLOAD_SIZE);

/// Gets the number of bytes every full construction of a
/// [Car](crate::Car) currently allocates and fills.
pub fn payload_size() -> usize {
    PAYLOAD_SIZE.load(Ordering::Relaxed)
}

/// Sets the process-wide payload size in bytes. This must happen before any
/// car of an experiment is constructed, and experiments using different
/// sizes must not run concurrently.
///
/// # Example
///
/// ```
/// use prototype_bench::{Car, payload_size, set_payload_size};
///
/// set_payload_size(16);
/// let car = Car::new("Make", "Model", "Color", 2025, ["F"]);
///
/// assert_eq!(16, payload_size());
/// assert_eq!(16, car.payload().len());
/// ```
pub fn set_payload_size(size: usize) {
    PAYLOAD_SIZE.store(size, Ordering::Relaxed);
}

/// The deliberately expensive resource owned by every car. Once generated,
/// the bytes are never modified, so any number of cars may hold a handle to
/// the same buffer. Cloning a `HeavyPayload` only increments a reference
/// count.
#[derive(Clone)]
pub struct HeavyPayload {
    bytes: Arc<[u8]>
}

impl HeavyPayload {

    /// Allocates a buffer of `size` bytes and fills it deterministically with
    /// `i mod 127`, so the work cannot be optimized away. The cost of this
    /// function is linear in `size`.
    ///
    /// # Example
    ///
    /// ```
    /// use prototype_bench::HeavyPayload;
    ///
    /// let payload = HeavyPayload::generate(300);
    ///
    /// assert_eq!(300, payload.len());
    /// assert_eq!(0, payload.as_bytes()[127]);
    /// assert_eq!(45, payload.as_bytes()[299]);
    /// ```
    pub fn generate(size: usize) -> HeavyPayload {
        let bytes = (0..size)
            .map(|i| (i % 127) as u8)
            .collect::<Arc<[u8]>>();

        HeavyPayload {
            bytes
        }
    }

    /// The number of bytes in this payload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Indicates whether this payload has no bytes, which is the case for a
    /// payload size of 0.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Indicates whether both handles refer to the same underlying buffer.
    /// Two independently generated payloads are never the same buffer, even
    /// if their bytes are equal.
    pub fn ptr_eq(&self, other: &HeavyPayload) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// The number of handles currently referring to this buffer, including
    /// this one.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.bytes)
    }
}

impl Debug for HeavyPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeavyPayload")
            .field("len", &self.len())
            .field("holders", &self.holders())
            .finish()
    }
}
