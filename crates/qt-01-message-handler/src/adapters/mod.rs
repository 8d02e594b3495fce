//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod securifier;

pub use securifier::{KeyPairSecurifier, PeerKeys};
