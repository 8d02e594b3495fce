//! # Quantum-Transport Benchmarks
//!
//! Per-subsystem criterion benchmarks, registered from
//! `benches/subsystem_benchmarks.rs`.

pub mod qt_01_message_handler;
