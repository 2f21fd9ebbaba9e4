/// A source of the current heap usage of the process, read by the
/// [Harness](crate::Harness) before and after producing a batch of cars.
pub trait MemoryProbe {

    /// The number of heap bytes currently in use, as far as this probe can
    /// tell.
    fn used_bytes(&self) -> usize;
}

/// A probe that does not measure anything. Memory deltas are always 0, only
/// the structural estimate of a [Measurement](crate::Measurement) remains
/// meaningful.
impl MemoryProbe for () {
    fn used_bytes(&self) -> usize {
        0
    }
}

impl<P: MemoryProbe + ?Sized> MemoryProbe for &P {
    fn used_bytes(&self) -> usize {
        (**self).used_bytes()
    }
}

/// A probe reading the live heap bytes tracked by a running [dhat] heap
/// profiler. Since destruction is deterministic, the count is exact at any
/// point in time and no settling is required before reading it.
///
/// The process must use [dhat::Alloc] as global allocator and keep a
/// [dhat::Profiler] alive while the probe is used.
///
/// # Panics
///
/// [MemoryProbe::used_bytes] panics if no heap profiler is running.
///
/// # Example
///
/// ```
/// use prototype_bench::{DhatProbe, MemoryProbe};
///
/// #[global_allocator]
/// static ALLOCATOR: dhat::Alloc = dhat::Alloc;
///
/// fn main() {
///     let _profiler = dhat::Profiler::builder().testing().build();
///     let before = DhatProbe.used_bytes();
///     let buffer = vec![0u8; 4096];
///
///     assert!(DhatProbe.used_bytes() >= before + 4096);
///
///     drop(buffer);
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DhatProbe;

impl MemoryProbe for DhatProbe {
    fn used_bytes(&self) -> usize {
        dhat::HeapStats::get().curr_bytes
    }
}
