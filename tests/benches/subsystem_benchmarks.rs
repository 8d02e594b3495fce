//! # Quantum-Transport Subsystem Benchmarks
//!
//! | Subsystem | Measured |
//! |-----------|----------|
//! | qt-01 Message Handler | dispatch, wrap per policy, sealed round trip, hostile input |

use criterion::{criterion_group, criterion_main, Criterion};
use qt_tests::benchmarks::qt_01_message_handler;

fn bench_message_handler(c: &mut Criterion) {
    qt_01_message_handler::register_benchmarks(c);
}

criterion_group!(benches, bench_message_handler);
criterion_main!(benches);
