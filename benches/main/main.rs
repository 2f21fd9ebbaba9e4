mod bencher_extensions;
mod registry;
mod strategy;

const KIBI: usize = 1024;
const MEBI: usize = KIBI * KIBI;

/// Gets a benchmark ID for the given payload size, using the largest binary
/// unit that divides it into at least 1.
pub(crate) fn get_id(payload_size: usize) -> String {
    if payload_size >= MEBI {
        format!("{} MiB", payload_size / MEBI)
    }
    else if payload_size >= KIBI {
        format!("{} KiB", payload_size / KIBI)
    }
    else {
        format!("{} B", payload_size)
    }
}

criterion::criterion_group!(benches,
    registry::get_clone_benchmark,
    registry::register_benchmark,
    strategy::prototype_benchmark,
    strategy::full_construct_benchmark
);
criterion::criterion_main!(benches);
