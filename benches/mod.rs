use criterion::{criterion_group, criterion_main};

mod console;

criterion_group!(
    benches,
    console::engine::bench_keystrokes,
    console::engine::bench_command_round_trip,
    console::engine::bench_service_ticks
);
criterion_main!(benches);
