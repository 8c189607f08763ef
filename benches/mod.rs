use criterion::{criterion_group, criterion_main};


use order_book::register_benchmarks as register_order_book_benchmarks;
use step_env::register_benchmarks as register_step_env_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_order_book_benchmarks,
    register_step_env_benchmarks,
);

criterion_main!(benches);
