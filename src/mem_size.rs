use std::mem;

use crate::payload::HeavyPayload;

/// A trait for types whose size on the heap can be determined at runtime. For
/// all [Sized] types it is sufficient to implement this trait, as a blanket
/// implementation of [MemSize] is already provided. The harness uses it to
/// estimate the footprint of a batch of cars independently of the allocator.
///
/// # Example
///
/// For simple types which are stored completely in one memory location, it
/// usually suffices to implement this as a constant 0. Types owning
/// referenced data can rely on the implementations of their fields.
///
/// ```
/// use prototype_bench::HeapSize;
///
/// struct Garage {
///     name: String,
///     spots: u32
/// }
///
/// impl HeapSize for Garage {
///     fn heap_size(&self) -> usize {
///         self.name.heap_size() + self.spots.heap_size()
///     }
/// }
///
/// let garage = Garage { name: "north".to_owned(), spots: 12 };
/// assert_eq!(5, garage.heap_size());
/// ```
pub trait HeapSize {

    /// The size of the referenced data that is owned by this value, usually
    /// allocated on the heap (such as the elements and reserved memory of a
    /// [Vec]).
    fn heap_size(&self) -> usize;
}

/// A trait for types whose total size in memory can be determined at runtime.
///
/// For [Sized] types, you do not need to implement this trait. Instead,
/// implement [HeapSize].
pub trait MemSize : HeapSize {

    /// The total size of this value in bytes. This includes the value itself
    /// as well as all owned referenced data.
    ///
    /// # Example
    ///
    /// ```
    /// use prototype_bench::MemSize;
    /// use std::mem;
    ///
    /// assert_eq!(4, 1i32.mem_size());
    /// assert_eq!(5 + mem::size_of::<String>(), "hello".to_owned().mem_size());
    /// ```
    fn mem_size(&self) -> usize;
}

impl<T: Sized + HeapSize> MemSize for T {
    fn mem_size(&self) -> usize {
        mem::size_of::<T>() + self.heap_size()
    }
}

macro_rules! basic_mem_size {
    ( $t: ty ) => {
        impl HeapSize for $t {
            fn heap_size(&self) -> usize {
                0
            }
        }
    };
}

basic_mem_size!(i32);
basic_mem_size!(u32);

impl<T: MemSize> HeapSize for [T] {
    fn heap_size(&self) -> usize {
        self.iter().map(|t| t.heap_size()).sum()
    }
}

impl<T: MemSize> HeapSize for Vec<T> {
    fn heap_size(&self) -> usize {
        let element_heap_size = self.as_slice().heap_size();
        let own_heap_size = self.capacity() * mem::size_of::<T>();
        element_heap_size + own_heap_size
    }
}

impl HeapSize for String {
    fn heap_size(&self) -> usize {
        self.capacity()
    }
}

/// A shared payload is attributed to its holders in equal parts. A payload
/// with a single holder counts in full, while `n` clones of a prototype
/// together with the prototype account for one payload in total.
impl HeapSize for HeavyPayload {
    fn heap_size(&self) -> usize {
        self.len() / self.holders()
    }
}
