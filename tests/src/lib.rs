//! # Quantum-Transport Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   └── qt_01_message_handler.rs
//! │
//! └── integration/      # Two-peer flows and hostile input
//!     ├── message_flows.rs
//!     └── adversarial.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qt-tests
//!
//! # By category
//! cargo test -p qt-tests integration::message_flows
//! cargo test -p qt-tests integration::adversarial
//!
//! # Benchmarks
//! cargo bench -p qt-tests
//! ```
//!
//! Set `RUST_LOG=qt_01_message_handler=debug` to see drop reasons.

pub mod benchmarks;
pub mod integration;
